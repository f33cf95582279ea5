use signal_core::palette::{hex_to_rgba, lerp_rgb, parse_rgb01, Palette, Theme};
use signal_core::prefs::{
    store_scope, store_theme, MemoryStore, PreferenceStore, Preferences, SCOPE_KEY, THEME_KEY,
};

#[test]
fn hex_tokens_convert_to_rgba() {
    assert_eq!(hex_to_rgba("#3A86FF", 0.5), "rgba(58,134,255,0.5)");
    assert_eq!(hex_to_rgba("  #000000 ", 1.0), "rgba(0,0,0,1)");
    assert_eq!(hex_to_rgba("2a9df4", 0.35), "rgba(42,157,244,0.35)");
}

#[test]
fn functional_tokens_keep_channels_and_replace_alpha() {
    assert_eq!(hex_to_rgba("rgba(1, 2.5,3,0.4)", 0.9), "rgba(1,2.5,3,0.9)");
    assert_eq!(hex_to_rgba("rgb(10 20 30)", 0.1), "rgba(10,20,30,0.1)");
}

#[test]
fn unparseable_tokens_fall_back_to_default_blue() {
    assert_eq!(hex_to_rgba("nope", 0.2), "rgba(58,134,255,0.2)");
    assert_eq!(hex_to_rgba("#12345", 0.2), "rgba(58,134,255,0.2)");
    assert_eq!(hex_to_rgba("rgb(1,2)", 0.2), "rgba(58,134,255,0.2)");
    assert_eq!(hex_to_rgba("", 0.2), "rgba(58,134,255,0.2)");
}

#[test]
fn normalized_colors_for_uniforms() {
    assert_eq!(parse_rgb01("#ff0000"), [1.0, 0.0, 0.0]);
    assert_eq!(parse_rgb01("rgb(0, 255, 0)"), [0.0, 1.0, 0.0]);
    assert_eq!(lerp_rgb([0.0; 3], [1.0, 0.5, 0.0], 0.5), [0.5, 0.25, 0.0]);
}

#[test]
fn palette_derives_glows_from_tokens() {
    let p = Palette::from_tokens(" #2a9df4", "#1d6fdc", true);
    assert_eq!(p.carrier, "#2a9df4");
    assert_eq!(p.glow_carrier, "rgba(42,157,244,0.35)");
    assert_eq!(p.glow_mod, "rgba(29,111,220,0.26)");
    assert!(p.dark);

    let themed = Palette::with_glows("#2a9df4", "#1d6fdc", "rgba(1,1,1,0.5)", " ", false);
    assert_eq!(themed.glow_carrier, "rgba(1,1,1,0.5)");
    assert_eq!(themed.glow_mod, p.glow_mod);
}

#[test]
fn theme_parsing_and_toggle() {
    assert_eq!(Theme::parse(Some("dark")), Theme::Dark);
    assert_eq!(Theme::parse(Some("sepia")), Theme::Light);
    assert_eq!(Theme::parse(None), Theme::Light);
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled().as_str(), "light");
}

#[test]
fn preferences_round_trip_through_store() {
    let mut store = MemoryStore::default();
    assert_eq!(Preferences::load(&store), Preferences::default());

    store_theme(&mut store, Theme::Dark);
    store_scope(&mut store, true);
    assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(
        Preferences::load(&store),
        Preferences {
            theme: Theme::Dark,
            scope: true
        }
    );

    store_scope(&mut store, false);
    assert_eq!(store.get(SCOPE_KEY), None);
    assert!(!Preferences::load(&store).scope);
}

#[test]
fn scope_requires_exact_marker() {
    let mut store = MemoryStore::default();
    store.set(SCOPE_KEY, "0");
    assert!(!Preferences::load(&store).scope);
    store.set(SCOPE_KEY, "true");
    assert!(!Preferences::load(&store).scope);
}
