use signal_core::prefs::PreferenceStore;
use web_sys as web;

/// `window.localStorage`; every operation degrades to a no-op when storage
/// is unavailable (private mode, sandboxed iframes).
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn new(window: &web::Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            log::warn!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(s) = &self.storage {
            _ = s.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(s) = &self.storage {
            _ = s.remove_item(key);
        }
    }
}
