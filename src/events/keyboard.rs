use web_sys as web;

use crate::dom;

/// Call `on_skip` for every keydown whose key passes `accepts`.
///
/// Both skip targets are idempotent, so the listener stays attached.
pub fn wire_skip_keys(
    document: &web::Document,
    accepts: fn(&str) -> bool,
    mut on_skip: impl FnMut() + 'static,
) {
    dom::listen(document, "keydown", move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if accepts(&key) {
            log::debug!("[keys] skip on {key:?}");
            on_skip();
        }
    });
}
