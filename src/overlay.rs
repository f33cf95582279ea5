//! Signal-acquisition splash shown over the portfolio while it loads.

use signal_core::canvas::Viewport;
use signal_core::loader::{
    DialTick, FmDial, LoaderFrame, LoaderTiming, SignalLoader, LOADER_REMOVE_DELAY_MS,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::canvas2d::WebCanvas;
use crate::constants::*;
use crate::dom;
use crate::events;
use crate::frame;

struct LoaderOverlay {
    loader: SignalLoader,
    canvas: WebCanvas,
    window: web::Window,
    body: web::HtmlElement,
    root: web::HtmlElement,
    status: Option<web::Element>,
    meter: Vec<web::Element>,
    dial: Option<web::Element>,
    strip: Option<web::HtmlElement>,
    on_start: Option<Box<dyn FnOnce()>>,
}

impl LoaderOverlay {
    fn resize(&mut self) {
        let (w, h) = dom::viewport_size(&self.window);
        let vp = Viewport::new(w, h, self.window.device_pixel_ratio());
        self.loader.resize(&mut self.canvas, vp);
        self.canvas.set_css_size(vp);
    }

    /// Returns `false` once the loader is done and the loop can stop.
    fn step(&mut self, time_ms: f64) -> bool {
        let dial_width = self.dial.as_ref().map_or(0.0, |d| d.client_width() as f64);
        let out = self.loader.frame(&mut self.canvas, time_ms, dial_width);
        self.apply(out);
        !self.loader.is_finished()
    }

    fn skip(&mut self) {
        let out = self.loader.skip();
        self.apply(out);
    }

    fn apply(&mut self, out: LoaderFrame) {
        if let (Some(strip), Some(px)) = (&self.strip, out.strip_translate_px) {
            dom::set_style(strip, "transform", &format!("translateX({px}px)"));
        }
        if out.locked {
            if let Some(dial) = &self.dial {
                _ = dial.class_list().add_1(LOCKED_CLASS);
            }
        }
        if let Some(hud) = &out.hud {
            if let (Some(status), Some(text)) = (&self.status, hud.status) {
                status.set_text_content(Some(text));
            }
            for (bar, lit) in self.meter.iter().zip(hud.meter_lit) {
                dom::set_class(bar, ACTIVE_CLASS, lit);
            }
        }
        if let Some(opacity) = out.overlay_opacity {
            dom::set_style(&self.root, "opacity", &opacity.to_string());
        }
        if out.init_portfolio {
            _ = self.body.class_list().remove_1(LOADING_CLASS);
            _ = self.body.class_list().add_1(LOADED_CLASS);
            if let Some(start) = self.on_start.take() {
                start();
            }
        }
        if out.finished {
            let root = self.root.clone();
            dom::set_timeout(LOADER_REMOVE_DELAY_MS as i32, move || root.remove());
        }
    }
}

/// Populate the FM strip with one element per dial tick.
fn build_dial(document: &web::Document, strip: &web::Element, ticks: &[DialTick]) {
    for tick in ticks {
        let Ok(el) = document.create_element("div") else {
            continue;
        };
        el.set_class_name(if tick.target { "fm-tick target" } else { "fm-tick" });
        let line = if tick.major {
            r#"<span class="fm-tick__line fm-tick__line--major"></span>"#
        } else {
            r#"<span class="fm-tick__line"></span>"#
        };
        let label = tick
            .label
            .as_ref()
            .map(|l| format!(r#"<span class="fm-tick__label">{l}</span>"#))
            .unwrap_or_default();
        el.set_inner_html(&format!("{line}{label}"));
        _ = strip.append_child(&el);
    }
}

/// Run the splash; `on_start` fires once, when the page underneath should start.
pub fn run_loader(
    window: &web::Window,
    document: &web::Document,
    on_start: impl FnOnce() + 'static,
) -> anyhow::Result<()> {
    let root: web::HtmlElement = dom::element_by_id(document, LOADER_ID)?;
    let canvas = WebCanvas::by_id(document, LOADER_CANVAS_ID)?;
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let loader = SignalLoader::new(
        LoaderTiming::default(),
        FmDial::default(),
        instant::now(),
        LOADER_SEED,
    )?;

    let strip = dom::element_by_id::<web::HtmlElement>(document, FM_STRIP_ID).ok();
    if let Some(strip) = &strip {
        build_dial(document, strip, &loader.dial().ticks());
    }
    let meter = document
        .get_element_by_id(LOADER_METER_ID)
        .map(|m| dom::query_within(&m, "span"))
        .unwrap_or_default();

    let overlay = Rc::new(RefCell::new(LoaderOverlay {
        loader,
        canvas,
        window: window.clone(),
        body,
        root: root.clone(),
        status: document.get_element_by_id(LOADER_STATUS_ID),
        meter,
        dial: document.get_element_by_id(FM_DIAL_ID),
        strip,
        on_start: Some(Box::new(on_start)),
    }));
    overlay.borrow_mut().resize();

    let o = overlay.clone();
    dom::listen(window, "resize", move |_: web::Event| {
        if let Ok(mut o) = o.try_borrow_mut() {
            o.resize();
        }
    });
    let o = overlay.clone();
    dom::listen(&root, "click", move |_: web::MouseEvent| {
        if let Ok(mut o) = o.try_borrow_mut() {
            o.skip();
        }
    });
    let o = overlay.clone();
    events::wire_skip_keys(document, |_| true, move || {
        if let Ok(mut o) = o.try_borrow_mut() {
            o.skip();
        }
    });

    log::info!("[loader] started");
    frame::animate(move |time_ms| match overlay.try_borrow_mut() {
        Ok(mut o) => o.step(time_ms),
        Err(_) => true,
    });
    Ok(())
}
