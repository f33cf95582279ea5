#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod boot;
mod canvas2d;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod page;
mod portfolio;
mod prefs;
mod render;

use constants::*;
use portfolio::Portfolio;
use render::{HeroSurfaceScene, SkillsScene3d};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("signal-portfolio starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if boot::run_boot(&window, &document)? {
        return Ok(());
    }

    let loading = document
        .body()
        .is_some_and(|b| b.class_list().contains(LOADING_CLASS));
    if loading {
        let result = overlay::run_loader(&window, &document, init_portfolio);
        if let Err(e) = result {
            // Without the splash the page must still come up.
            log::warn!("[loader] unavailable: {:?}", e);
            if let Some(body) = document.body() {
                _ = body.class_list().remove_1(LOADING_CLASS);
                _ = body.class_list().add_1(LOADED_CLASS);
            }
            init_portfolio();
        }
    } else {
        init_portfolio();
    }
    Ok(())
}

/// Start the interactive page. Safe to call more than once.
pub fn init_portfolio() {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Err(e) = start_portfolio() {
        log::error!("[portfolio] init error: {:?}", e);
    }
}

fn start_portfolio() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let page = page::Page::collect(window, document)?;
    let portfolio = Rc::new(RefCell::new(Portfolio::new(page)?));
    portfolio.borrow_mut().start();

    events::wire_input_handlers(&portfolio);
    events::wire_page_handlers(&portfolio);
    frame::start_loop(portfolio.clone());

    spawn_local(create_hero_surface(portfolio.clone()));
    spawn_local(create_skills(portfolio));
    Ok(())
}

async fn create_hero_surface(portfolio: Rc<RefCell<Portfolio>>) {
    let (document, dpr, palette) = scene_inputs(&portfolio);
    let (Ok(canvas), Some(container)) = (
        dom::element_by_id::<web::HtmlCanvasElement>(&document, SURFACE_CANVAS_ID),
        document.get_element_by_id(SURFACE_SECTION_ID),
    ) else {
        log::info!("[surface] no canvas on this page");
        return;
    };
    match HeroSurfaceScene::new(canvas, container, dpr, &palette).await {
        Ok(scene) => {
            let mut p = portfolio.borrow_mut();
            p.attach_hero_surface(scene);
            p.update_scroll_state(instant::now());
        }
        Err(e) => log::warn!("[surface] disabled: {:?}", e),
    }
}

async fn create_skills(portfolio: Rc<RefCell<Portfolio>>) {
    let (document, dpr, palette) = scene_inputs(&portfolio);
    let (Ok(canvas), Some(container)) = (
        dom::element_by_id::<web::HtmlCanvasElement>(&document, FFT_CANVAS_ID),
        document.get_element_by_id(FFT_CONTAINER_ID),
    ) else {
        log::info!("[skills] no canvas on this page");
        return;
    };
    let labels = document.get_element_by_id(FFT_LABELS_ID);
    match SkillsScene3d::new(&document, canvas, container, labels, dpr, &palette).await {
        Ok(scene) => portfolio.borrow_mut().attach_skills(scene),
        Err(e) => log::warn!("[skills] disabled: {:?}", e),
    }
}

fn scene_inputs(portfolio: &Rc<RefCell<Portfolio>>) -> (web::Document, f64, signal_core::Palette) {
    let p = portfolio.borrow();
    (p.page.document.clone(), p.page.dpr(), p.palette.clone())
}
