//! Boot page: typed BIOS log, then the MCU board powering up.

use signal_core::boot::{
    build_trace, is_skip_key, mcu_edge, peripheral_delay_ms, peripheral_edge, trace_delay_ms,
    BootSequence, BootStep, McuSide, PowerOnStage, HIDE_SCREEN_DELAY_MS, POWER_ON_TIMELINE,
    TRACE_CONFIG,
};
use signal_core::RESIZE_DEBOUNCE_MS;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;
use crate::dom;
use crate::events;

struct BootPage {
    window: web::Window,
    document: web::Document,
    screen: web::HtmlElement,
    log: web::Element,
    sequence: BootSequence,
    timer: Option<i32>,
    resize_timer: Option<i32>,
}

type Shared = Rc<RefCell<BootPage>>;

impl BootPage {
    fn print(&self, text: &str) {
        let mut content = self.log.text_content().unwrap_or_default();
        content.push_str(text);
        content.push('\n');
        self.log.set_text_content(Some(&content));
        self.screen.set_scroll_top(self.screen.scroll_height());
    }
}

/// Start the boot page if its markup is present. Returns whether it ran.
pub fn run_boot(window: &web::Window, document: &web::Document) -> anyhow::Result<bool> {
    let Some(screen) = document.get_element_by_id(BOOT_SCREEN_ID) else {
        return Ok(false);
    };
    let screen: web::HtmlElement = screen
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("#{BOOT_SCREEN_ID} is not an HTML element"))?;
    let log = document
        .get_element_by_id(BOOT_LOG_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{BOOT_LOG_ID}"))?;

    let mut sequence = BootSequence::default();
    sequence.start();
    let page = Rc::new(RefCell::new(BootPage {
        window: window.clone(),
        document: document.clone(),
        screen: screen.clone(),
        log,
        sequence,
        timer: None,
        resize_timer: None,
    }));

    let p = page.clone();
    dom::listen(&screen, "click", move |_: web::MouseEvent| skip(&p));
    let p = page.clone();
    events::wire_skip_keys(document, is_skip_key, move || skip(&p));

    let p = page.clone();
    dom::listen(window, "resize", move |_: web::Event| schedule_redraw(&p));

    log::info!("[boot] started");
    type_next(&page);
    Ok(true)
}

fn type_next(page: &Shared) {
    let step = {
        let Ok(mut b) = page.try_borrow_mut() else {
            return;
        };
        let step = b.sequence.advance();
        if let BootStep::Line {
            text,
            next_delay_ms,
        } = &step
        {
            b.print(text);
            let next = page.clone();
            b.timer = dom::set_timeout(*next_delay_ms as i32, move || type_next(&next));
        }
        step
    };
    if let BootStep::Complete { fired: true } = step {
        finish(page);
    }
}

fn skip(page: &Shared) {
    let fired = {
        let Ok(mut b) = page.try_borrow_mut() else {
            return;
        };
        dom::clear_timeout(b.timer.take());
        let outcome = b.sequence.skip();
        for line in &outcome.flushed {
            b.print(line);
        }
        outcome.fired
    };
    if fired {
        finish(page);
    }
}

fn finish(page: &Shared) {
    let Ok(b) = page.try_borrow() else {
        return;
    };
    dom::clear_timeout(b.timer);
    if let Ok(cursor) = dom::element_by_id::<web::HtmlElement>(&b.document, BOOT_CURSOR_ID) {
        dom::set_style(&cursor, "display", "none");
    }
    let document = b.document.clone();
    let screen = b.screen.clone();
    let window = b.window.clone();
    dom::set_timeout(HIDE_SCREEN_DELAY_MS as i32, move || {
        _ = screen.class_list().add_1(HIDDEN_CLASS);
        if let Some(main) = document.get_element_by_id(MAIN_CONTENT_ID) {
            _ = main.class_list().add_1(VISIBLE_CLASS);
        }
        power_on(&window, &document);
    });
}

fn power_on(window: &web::Window, document: &web::Document) {
    for (stage, at) in POWER_ON_TIMELINE {
        let window = window.clone();
        let document = document.clone();
        dom::set_timeout(at as i32, move || {
            log::debug!("[boot] power-on {stage:?}");
            match stage {
                PowerOnStage::Mcu => add_class(&document, MCU_CHIP_ID, POWERED_CLASS),
                PowerOnStage::Traces => draw_traces(&window, &document, true),
                PowerOnStage::Peripherals => power_peripherals(&document),
                PowerOnStage::Tagline => {
                    add_class(&document, TAGLINE_ID, VISIBLE_CLASS);
                    add_class(&document, STATUS_REGISTER_ID, VISIBLE_CLASS);
                }
            }
        });
    }
}

fn add_class(document: &web::Document, id: &str, class: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1(class);
    }
}

fn power_peripherals(document: &web::Document) {
    for (i, el) in dom::query_all(document, PERIPHERAL_SELECTOR).into_iter().enumerate() {
        dom::set_timeout(peripheral_delay_ms(i) as i32, move || {
            _ = el.class_list().add_1(POWERED_CLASS);
        });
    }
}

fn side_property(side: McuSide) -> &'static str {
    match side {
        McuSide::Top => "top",
        McuSide::Right => "right",
        McuSide::Bottom => "bottom",
        McuSide::Left => "left",
    }
}

fn px(value: &str) -> f64 {
    value.trim().trim_end_matches("px").parse().unwrap_or(0.0)
}

/// Route one trace per peripheral. `animate` draws them in with a dash sweep.
fn draw_traces(window: &web::Window, document: &web::Document, animate: bool) {
    let (Some(svg), Some(mcu)) = (
        document.get_element_by_id(TRACE_SVG_ID),
        document.get_element_by_id(MCU_CHIP_ID),
    ) else {
        log::warn!("[boot] trace board markup missing");
        return;
    };
    // Paths only; the <defs> filter stays.
    for old in dom::query_within(&svg, "path") {
        old.remove();
    }
    let (vw, vh) = dom::viewport_size(window);
    _ = svg.set_attribute("viewBox", &format!("0 0 {vw} {vh}"));

    let r = mcu.get_bounding_client_rect();
    let mcu_rect = (r.left(), r.top(), r.width(), r.height());
    for (i, (id, side)) in TRACE_CONFIG.into_iter().enumerate() {
        let Ok(peripheral) = dom::element_by_id::<web::HtmlElement>(document, id) else {
            continue;
        };
        let offset = window
            .get_computed_style(&peripheral)
            .ok()
            .flatten()
            .and_then(|cs| cs.get_property_value(side_property(side)).ok())
            .map(|v| px(&v))
            .unwrap_or(0.0);
        let size = (
            peripheral.offset_width() as f64,
            peripheral.offset_height() as f64,
        );
        let d = build_trace(
            mcu_edge(mcu_rect, side),
            peripheral_edge(side, (vw, vh), size, offset),
            side,
        );
        let Ok(path) = document.create_element_ns(Some(SVG_NS), "path") else {
            continue;
        };
        _ = path.set_attribute("d", &d);
        _ = path.class_list().add_1(TRACE_LINE_CLASS);
        _ = svg.append_child(&path);
        if animate {
            sweep_in(path, trace_delay_ms(i));
        } else {
            _ = path.class_list().add_1(POWERED_CLASS);
        }
    }
}

fn sweep_in(path: web::Element, delay_ms: u32) {
    let len = path
        .dyn_ref::<web::SvgGeometryElement>()
        .map_or(0.0, |g| g.get_total_length());
    let Some(style) = path.dyn_ref::<web::SvgElement>().map(|s| s.style()) else {
        return;
    };
    if len <= 0.0 {
        _ = path.class_list().add_1(POWERED_CLASS);
        return;
    }
    _ = style.set_property("stroke-dasharray", &len.to_string());
    _ = style.set_property("stroke-dashoffset", &len.to_string());
    dom::set_timeout(delay_ms as i32, move || {
        _ = style.set_property("transition", TRACE_TRANSITION);
        _ = style.set_property("stroke-dashoffset", "0");
        _ = path.class_list().add_1(POWERED_CLASS);
    });
}

fn schedule_redraw(page: &Shared) {
    let Ok(mut b) = page.try_borrow_mut() else {
        return;
    };
    dom::clear_timeout(b.resize_timer.take());
    let window = b.window.clone();
    let document = b.document.clone();
    b.resize_timer = dom::set_timeout(RESIZE_DEBOUNCE_MS as i32, move || {
        let shown = document
            .get_element_by_id(MAIN_CONTENT_ID)
            .is_some_and(|m| m.class_list().contains(VISIBLE_CLASS));
        if shown {
            draw_traces(&window, &document, false);
        }
    });
}
