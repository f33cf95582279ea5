use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::constants::*;
use crate::dom;
use crate::portfolio::Portfolio;

/// Scroll, resize, toggles and teardown.
pub fn wire_page_handlers(portfolio: &Rc<RefCell<Portfolio>>) {
    let (window, document) = {
        let p = portfolio.borrow();
        (p.page.window.clone(), p.page.document.clone())
    };

    let p = portfolio.clone();
    dom::listen_passive(&window, "scroll", move |_: web::Event| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.update_scroll_state(instant::now());
        }
    });

    // Coalesced in the frame loop.
    let p = portfolio.clone();
    dom::listen(&window, "resize", move |_: web::Event| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.resize.trigger(instant::now());
        }
    });

    let p = portfolio.clone();
    dom::add_click_listener(&document, THEME_TOGGLE_ID, move || {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.toggle_theme();
        }
    });

    let p = portfolio.clone();
    dom::add_click_listener(&document, SCOPE_TOGGLE_ID, move || {
        if let Ok(mut p) = p.try_borrow_mut() {
            let enabled = !p.scope;
            p.set_scope(enabled, true);
        }
    });

    let p = portfolio.clone();
    dom::add_click_listener(&document, NAV_TOGGLE_ID, move || {
        if let Ok(p) = p.try_borrow() {
            let open = p
                .page
                .nav
                .as_ref()
                .is_some_and(|nav| !nav.class_list().contains(NAV_OPEN_CLASS));
            set_nav_open(&p, open);
        }
    });

    let p = portfolio.clone();
    dom::listen(&window, "pagehide", move |_: web::Event| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.dispose_scenes();
        }
    });
}

pub(super) fn set_nav_open(portfolio: &Portfolio, open: bool) {
    if let Some(nav) = &portfolio.page.nav {
        dom::set_class(nav, NAV_OPEN_CLASS, open);
    }
    if let Some(toggle) = portfolio.page.document.get_element_by_id(NAV_TOGGLE_ID) {
        _ = toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });
    }
}
