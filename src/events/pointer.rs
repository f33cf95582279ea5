use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::dom;
use crate::portfolio::Portfolio;

/// Window pointer tracking, card hover tilt and nav-link waves.
pub fn wire_input_handlers(portfolio: &Rc<RefCell<Portfolio>>) {
    let (window, cards, links) = {
        let p = portfolio.borrow();
        (
            p.page.window.clone(),
            p.page.cards.clone(),
            p.page.nav_links.clone(),
        )
    };
    wire_pointermove(&window, portfolio);
    wire_touchmove(&window, portfolio);
    for (i, card) in cards.iter().enumerate() {
        wire_card(card, i, portfolio);
    }
    for (i, link) in links.iter().enumerate() {
        wire_nav_link(link, i, portfolio);
    }
}

fn wire_pointermove(window: &web::Window, portfolio: &Rc<RefCell<Portfolio>>) {
    let portfolio = portfolio.clone();
    dom::listen(window, "mousemove", move |ev: web::MouseEvent| {
        let Ok(mut p) = portfolio.try_borrow_mut() else {
            return;
        };
        p.on_pointer_move(ev.client_x() as f64, ev.client_y() as f64, instant::now());
    });
}

fn wire_touchmove(window: &web::Window, portfolio: &Rc<RefCell<Portfolio>>) {
    let portfolio = portfolio.clone();
    dom::listen_passive(window, "touchmove", move |ev: web::TouchEvent| {
        let Some(touch) = ev.touches().get(0) else {
            return;
        };
        if let Ok(mut p) = portfolio.try_borrow_mut() {
            p.on_touch_move(touch.client_x() as f64, touch.client_y() as f64);
        }
    });
}

fn wire_card(card: &web::HtmlElement, index: usize, portfolio: &Rc<RefCell<Portfolio>>) {
    let p = portfolio.clone();
    dom::listen(card, "mouseenter", move |_: web::MouseEvent| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.on_card_enter(index);
        }
    });
    let p = portfolio.clone();
    dom::listen(card, "mousemove", move |ev: web::MouseEvent| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.on_card_move(index, ev.client_x() as f64, ev.client_y() as f64);
        }
    });
    let p = portfolio.clone();
    dom::listen(card, "mouseleave", move |_: web::MouseEvent| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.on_card_leave(index);
        }
    });
}

fn wire_nav_link(link: &web::HtmlElement, index: usize, portfolio: &Rc<RefCell<Portfolio>>) {
    let p = portfolio.clone();
    dom::listen(link, "mouseenter", move |_: web::MouseEvent| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.on_nav_enter(index);
        }
    });
    let p = portfolio.clone();
    dom::listen(link, "mouseleave", move |_: web::MouseEvent| {
        if let Ok(mut p) = p.try_borrow_mut() {
            p.on_nav_leave(index, instant::now());
        }
    });
    // Following a link closes the mobile menu.
    let p = portfolio.clone();
    dom::listen(link, "click", move |_: web::MouseEvent| {
        if let Ok(p) = p.try_borrow() {
            super::page::set_nav_open(&p, false);
        }
    });
}
