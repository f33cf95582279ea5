use signal_core::effects::HitTarget;
use signal_core::tilt::CardRect;
use signal_core::waves::divider::{parse_strength, DividerMode};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas2d::WebCanvas;
use crate::constants::*;
use crate::dom;

const NAV_WAVE_SVG: &str =
    r#"<svg viewBox="0 0 100 20" preserveAspectRatio="none" aria-hidden="true"><path d=""></path></svg>"#;

/// A `.signal-divider` block and the canvas inside it.
pub struct DividerElement {
    pub root: web::Element,
    pub canvas: WebCanvas,
    pub mode: DividerMode,
    pub strength: f64,
}

/// Every DOM handle the portfolio page drives, gathered once at init.
pub struct Page {
    pub window: web::Window,
    pub document: web::Document,
    pub body: web::HtmlElement,
    pub nav: Option<web::Element>,
    pub progress_bar: Option<web::HtmlElement>,
    pub theme_toggle: Option<web::HtmlElement>,
    pub scope_toggle: Option<web::Element>,
    pub hero: Option<web::Element>,
    pub sections: Vec<web::HtmlElement>,
    pub parallax: Vec<(web::HtmlElement, f64)>,
    pub cards: Vec<web::HtmlElement>,
    pub nav_links: Vec<web::HtmlElement>,
    pub nav_paths: Vec<Option<web::Element>>,
    pub dividers: Vec<DividerElement>,
}

impl Page {
    pub fn collect(window: web::Window, document: web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?;

        let parallax = dom::query_html(&document, PARALLAX_SELECTOR)
            .into_iter()
            .map(|el| {
                let speed = el
                    .get_attribute("data-speed")
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .unwrap_or(0.0);
                (el, speed)
            })
            .collect();

        let nav_links = dom::query_html(&document, NAV_LINK_SELECTOR);
        let nav_paths = nav_links
            .iter()
            .map(|link| add_nav_wave(&document, link))
            .collect();

        let dividers = dom::query_all(&document, DIVIDER_SELECTOR)
            .into_iter()
            .filter_map(|el| {
                let canvas = el
                    .query_selector(DIVIDER_CANVAS_SELECTOR)
                    .ok()
                    .flatten()?
                    .dyn_into::<web::HtmlCanvasElement>()
                    .ok()?;
                let canvas = match WebCanvas::new(canvas) {
                    Ok(c) => c,
                    Err(e) => {
                        log::warn!("divider canvas unusable: {e:?}");
                        return None;
                    }
                };
                let mode = DividerMode::parse(el.get_attribute("data-mode").as_deref());
                let strength = parse_strength(el.get_attribute("data-strength").as_deref());
                Some(DividerElement {
                    root: el,
                    canvas,
                    mode,
                    strength,
                })
            })
            .collect::<Vec<_>>();

        let page = Self {
            nav: document.query_selector(NAV_SELECTOR).ok().flatten(),
            progress_bar: dom::element_by_id(&document, PROGRESS_BAR_ID).ok(),
            theme_toggle: dom::element_by_id(&document, THEME_TOGGLE_ID).ok(),
            scope_toggle: document.get_element_by_id(SCOPE_TOGGLE_ID),
            hero: document.get_element_by_id(HERO_ID),
            sections: dom::query_html(&document, SECTION_SELECTOR),
            cards: dom::query_html(&document, CARD_SELECTOR),
            parallax,
            nav_links,
            nav_paths,
            dividers,
            window,
            document,
            body,
        };
        log::info!(
            "[page] {} sections, {} cards, {} nav links, {} dividers",
            page.sections.len(),
            page.cards.len(),
            page.nav_links.len(),
            page.dividers.len()
        );
        Ok(page)
    }

    pub fn viewport_size(&self) -> (f64, f64) {
        dom::viewport_size(&self.window)
    }

    pub fn dpr(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    /// Card centers for ripple hit tests, in viewport space.
    pub fn card_centers(&self) -> Vec<HitTarget> {
        self.cards
            .iter()
            .map(|el| {
                let r = el.get_bounding_client_rect();
                HitTarget {
                    x: r.left() + r.width() / 2.0,
                    y: r.top() + r.height() / 2.0,
                }
            })
            .collect()
    }

    pub fn card_rects(&self) -> Vec<CardRect> {
        self.cards
            .iter()
            .map(|el| {
                let r = el.get_bounding_client_rect();
                CardRect::from_bounds(r.left(), r.top(), r.width(), r.height())
            })
            .collect()
    }

    pub fn reveal_items(section: &web::HtmlElement) -> Vec<web::Element> {
        dom::query_within(section, REVEAL_SELECTOR)
    }
}

/// Append the SVG underline to a nav link and return its path element.
fn add_nav_wave(document: &web::Document, link: &web::HtmlElement) -> Option<web::Element> {
    let wave = document.create_element("span").ok()?;
    wave.set_class_name(NAV_WAVE_CLASS);
    wave.set_inner_html(NAV_WAVE_SVG);
    link.append_child(&wave).ok()?;
    wave.query_selector("path").ok().flatten()
}
