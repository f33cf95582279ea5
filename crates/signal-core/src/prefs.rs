use fnv::FnvHashMap;

use crate::palette::Theme;

pub const THEME_KEY: &str = "theme";
pub const SCOPE_KEY: &str = "scope";
pub const SCOPE_ON: &str = "1";

/// String key/value persistence (browser `localStorage` or memory).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub scope: bool,
}

impl Preferences {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            theme: Theme::parse(store.get(THEME_KEY).as_deref()),
            scope: store.get(SCOPE_KEY).as_deref() == Some(SCOPE_ON),
        }
    }
}

pub fn store_theme(store: &mut dyn PreferenceStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}

/// Enabled writes `"1"`; disabled removes the key.
pub fn store_scope(store: &mut dyn PreferenceStore, enabled: bool) {
    if enabled {
        store.set(SCOPE_KEY, SCOPE_ON);
    } else {
        store.remove(SCOPE_KEY);
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FnvHashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}
