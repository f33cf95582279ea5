use signal_core::Palette;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up `#id` and cast it, with a readable error for the log.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} has the wrong type: {:?}", e)))
}

fn elements(list: Result<web::NodeList, wasm_bindgen::JsValue>, selector: &str) -> Vec<web::Element> {
    let Ok(list) = list else {
        log::warn!("bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Every element in the document matching `selector`, in document order.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    elements(document.query_selector_all(selector), selector)
}

/// Descendants of `root` matching `selector`.
pub fn query_within(root: &web::Element, selector: &str) -> Vec<web::Element> {
    elements(root.query_selector_all(selector), selector)
}

pub fn query_html(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("could not listen for {event}");
    }
    closure.forget();
}

/// Same as [`listen`], registered as passive.
pub fn listen_passive<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(true);
    if target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .is_err()
    {
        log::warn!("could not listen for {event}");
    }
    closure.forget();
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        listen(&el, "click", move |_: web::Event| handler());
    } else {
        log::warn!("missing #{element_id}, click ignored");
    }
}

/// Fire-and-forget timer; the returned handle can be passed to `clearTimeout`.
pub fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web::window()?;
    let cb = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
        .ok()
}

pub fn clear_timeout(handle: Option<i32>) {
    if let (Some(window), Some(handle)) = (web::window(), handle) {
        window.clear_timeout_with_handle(handle);
    }
}

/// CSS viewport size in pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

pub fn scroll_y(window: &web::Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn document_height(document: &web::Document) -> f64 {
    document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

/// Read the theme's color tokens off `body`'s computed style.
pub fn read_palette(window: &web::Window, body: &web::HtmlElement) -> Palette {
    let dark = body.class_list().contains(crate::constants::DARK_CLASS);
    let Ok(Some(css)) = window.get_computed_style(body) else {
        return Palette {
            dark,
            ..Palette::default()
        };
    };
    let var = |name: &str| {
        css.get_property_value(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };
    let carrier = var("--carrier");
    let modulation = var("--modulation");
    if carrier.is_empty() || modulation.is_empty() {
        return Palette {
            dark,
            ..Palette::default()
        };
    }
    Palette::with_glows(
        &carrier,
        &modulation,
        &var("--glow-carrier"),
        &var("--glow-mod"),
        dark,
    )
}
