use signal_core::canvas::{Renderer, Viewport};
use signal_core::effects::{HitTarget, PulsePool, RipplePool};
use signal_core::frame::Debounce;
use signal_core::prefs::{store_scope, store_theme, Preferences};
use signal_core::scroll::{Activation, ScrollState, SectionActivator};
use signal_core::tilt::{CardTilt, StyleUpdate, TiltConfig};
use signal_core::waves::{Divider, DividerLayout, HeroCarrier, HeroCarrierConfig, NavWaves};
use signal_core::{Palette, PointerTracker, Theme, NAV_RELEASE_MS, RESIZE_DEBOUNCE_MS};
use web_sys as web;

use crate::canvas2d::WebCanvas;
use crate::constants::*;
use crate::dom;
use crate::page::Page;
use crate::prefs::LocalStore;
use crate::render::{HeroSurfaceScene, SkillsScene3d};

/// All page state shared by the event handlers and the frame loop.
pub struct Portfolio {
    pub page: Page,
    pub store: LocalStore,
    pub theme: Theme,
    pub scope: bool,
    pub palette: Palette,

    pub pointer: PointerTracker,
    pub ripples: RipplePool,
    pub pulses: PulsePool,
    pub tilt: CardTilt,
    pub nav_waves: NavWaves,
    pub activator: SectionActivator,
    pub scroll: ScrollState,
    pub resize: Debounce,

    pub overlay: WebCanvas,
    pub overlay_viewport: Viewport,
    pub hero_carrier: Option<HeroCarrier<WebCanvas>>,
    pub dividers: Vec<Divider<WebCanvas>>,
    pub hit_targets: Vec<HitTarget>,
    hit_timers: Vec<Option<i32>>,

    pub hero_surface: Option<HeroSurfaceScene>,
    pub skills: Option<SkillsScene3d>,
    /// Entrance requested before the skills scene finished creating.
    pending_entrance: Option<f64>,
}

impl Portfolio {
    pub fn new(page: Page) -> anyhow::Result<Self> {
        let store = LocalStore::new(&page.window);
        let overlay = WebCanvas::by_id(&page.document, SIGNAL_CANVAS_ID)?;
        let palette = Palette::default();

        let hero_carrier = match Self::build_hero_carrier(&page.document, &palette) {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("[hero] carrier disabled: {e:?}");
                None
            }
        };
        let dividers = page
            .dividers
            .iter()
            .map(|d| Divider::new(d.canvas.clone(), d.mode, d.strength, &palette))
            .collect();

        let (w, h) = page.viewport_size();
        let now = instant::now();
        let tilt = CardTilt::new(&page.card_rects(), TiltConfig::default());
        Ok(Self {
            store,
            theme: Theme::Light,
            scope: false,
            pointer: PointerTracker::new(w, h, now),
            ripples: RipplePool::default(),
            pulses: PulsePool::default(),
            tilt,
            nav_waves: NavWaves::new(page.nav_links.len()),
            activator: SectionActivator::default(),
            scroll: ScrollState::default(),
            resize: Debounce::new(RESIZE_DEBOUNCE_MS),
            overlay,
            overlay_viewport: Viewport::default(),
            hero_carrier,
            dividers,
            hit_targets: page.card_centers(),
            hit_timers: vec![None; page.cards.len()],
            hero_surface: None,
            skills: None,
            pending_entrance: None,
            palette,
            page,
        })
    }

    fn build_hero_carrier(
        document: &web::Document,
        palette: &Palette,
    ) -> anyhow::Result<HeroCarrier<WebCanvas>> {
        Ok(HeroCarrier::new(
            WebCanvas::by_id(document, HERO_CANVAS_ID)?,
            WebCanvas::offscreen(document)?,
            WebCanvas::offscreen(document)?,
            HeroCarrierConfig::default(),
            palette,
        ))
    }

    /// Restore preferences, reveal the landing section and size everything.
    pub fn start(&mut self) {
        let prefs = Preferences::load(&self.store);
        self.apply_theme(prefs.theme, false);
        self.set_scope(prefs.scope, false);

        if let Some(first) = self.page.sections.first() {
            _ = first.class_list().add_1(SECTION_ARRIVED_CLASS);
            for item in Page::reveal_items(first) {
                _ = item.class_list().add_1(VISIBLE_CLASS);
            }
        }
        self.refresh_palette();
        self.resize_canvases();
        self.update_scroll_state(instant::now());
        log::info!(
            "[portfolio] started: theme={} scope={}",
            self.theme.as_str(),
            self.scope
        );
    }

    // ---------------- Preferences ----------------

    pub fn apply_theme(&mut self, theme: Theme, persist: bool) {
        self.theme = theme;
        let body = &self.page.body;
        dom::set_class(body, DARK_CLASS, theme.is_dark());
        dom::set_class(body, LIGHT_CLASS, !theme.is_dark());
        if let Some(toggle) = &self.page.theme_toggle {
            toggle.set_text_content(Some(if theme.is_dark() { "Light" } else { "Dark" }));
        }
        if persist {
            store_theme(&mut self.store, theme);
            self.refresh_palette();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.apply_theme(self.theme.toggled(), true);
    }

    pub fn set_scope(&mut self, enabled: bool, persist: bool) {
        self.scope = enabled;
        dom::set_class(&self.page.body, SCOPE_CLASS, enabled);
        if let Some(toggle) = &self.page.scope_toggle {
            dom::set_class(toggle, ACTIVE_CLASS, enabled);
        }
        if let Some(hero) = &mut self.hero_carrier {
            hero.set_scope(enabled);
        }
        if persist {
            store_scope(&mut self.store, enabled);
        }
    }

    /// Re-read the theme tokens and push them to every renderer.
    pub fn refresh_palette(&mut self) {
        self.palette = dom::read_palette(&self.page.window, &self.page.body);
        let palette = &self.palette;
        if let Some(hero) = &mut self.hero_carrier {
            hero.update_palette(palette);
        }
        for d in &mut self.dividers {
            d.update_palette(palette);
        }
        if let Some(s) = &mut self.hero_surface {
            s.update_palette(palette);
        }
        if let Some(s) = &mut self.skills {
            s.update_palette(palette);
        }
    }

    // ---------------- Geometry ----------------

    pub fn resize_canvases(&mut self) {
        let (w, h) = self.page.viewport_size();
        let dpr = self.page.dpr();
        self.overlay_viewport = Viewport::new(w, h, dpr);
        signal_core::canvas::resize_surface(&mut self.overlay, self.overlay_viewport);
        self.overlay.set_css_size(self.overlay_viewport);

        if let (Some(hero), Some(hero_el)) = (&mut self.hero_carrier, &self.page.hero) {
            let rect = hero_el.get_bounding_client_rect();
            let vp = Viewport::new(rect.width(), rect.height(), dpr);
            hero.resize(vp);
            hero.main().set_css_size(vp);
        }
        for (divider, el) in self.dividers.iter_mut().zip(&self.page.dividers) {
            let rect = el.canvas.element().get_bounding_client_rect();
            divider.resize(Viewport::new(rect.width(), rect.height(), dpr));
        }
        if let Some(s) = &mut self.hero_surface {
            s.refit(dpr);
        }
        if let Some(s) = &mut self.skills {
            s.refit(dpr);
        }
        self.tilt.refresh_rects(&self.page.card_rects());
        self.hit_targets = self.page.card_centers();
        log::debug!("[portfolio] resized to {w}x{h} @{dpr}");
    }

    pub fn update_scroll_state(&mut self, now_ms: f64) {
        let (_, vh) = self.page.viewport_size();
        let scroll_y = dom::scroll_y(&self.page.window);
        self.scroll
            .update(scroll_y, dom::document_height(&self.page.document), vh);
        self.hit_targets = self.page.card_centers();

        if let Some(bar) = &self.page.progress_bar {
            dom::set_style(bar, "width", &self.scroll.progress_width());
        }
        if let Some(nav) = &self.page.nav {
            dom::set_class(nav, NAV_SCROLLED_CLASS, self.scroll.nav_scrolled);
        }

        let arrivals: Vec<(usize, Activation)> = self
            .page
            .sections
            .iter()
            .enumerate()
            .filter_map(|(i, section)| {
                let id = section.id();
                if self.activator.is_active(&id) {
                    return None;
                }
                let top = section.get_bounding_client_rect().top();
                let items = Page::reveal_items(section).len();
                self.activator
                    .observe(&id, top, vh, items)
                    .map(|a| (i, a))
            })
            .collect();
        for (index, activation) in arrivals {
            self.arrive(index, activation, now_ms);
        }

        for (layer, speed) in &self.page.parallax {
            dom::set_style(layer, "transform", &self.scroll.parallax_transform(*speed));
        }
        for (divider, el) in self.dividers.iter_mut().zip(&self.page.dividers) {
            let rect = el.root.get_bounding_client_rect();
            divider.set_layout(DividerLayout {
                top: rect.top(),
                bottom: rect.bottom(),
                viewport_height: vh,
            });
        }
        if let Some(surface) = &mut self.hero_surface {
            let rect = surface.container().get_bounding_client_rect();
            surface.set_visible(rect.bottom() > 0.0 && rect.top() < vh);
        }
        self.tilt.refresh_rects(&self.page.card_rects());
    }

    fn arrive(&mut self, index: usize, activation: Activation, now_ms: f64) {
        let Some(section) = self.page.sections.get(index) else {
            return;
        };
        log::info!("[portfolio] section '{}' arrived", activation.id);
        _ = section.class_list().add_1(SECTION_ARRIVED_CLASS);
        for (item, delay) in Page::reveal_items(section)
            .into_iter()
            .zip(activation.reveal_delays_ms)
        {
            dom::set_timeout(delay as i32, move || {
                _ = item.class_list().add_1(VISIBLE_CLASS);
            });
        }
        if activation.spawn_pulse {
            let rect = section.get_bounding_client_rect();
            self.pulses.spawn_for_section(
                rect.left(),
                rect.top(),
                rect.width(),
                self.scroll.scroll_y,
                now_ms,
            );
        }
        if activation.trigger_skills_entrance {
            match &mut self.skills {
                Some(skills) => skills.trigger_entrance(now_ms),
                None => self.pending_entrance = Some(now_ms),
            }
        }
    }

    // ---------------- 3D scenes (created asynchronously) ----------------

    pub fn attach_hero_surface(&mut self, mut scene: HeroSurfaceScene) {
        scene.update_palette(&self.palette);
        self.hero_surface = Some(scene);
    }

    pub fn attach_skills(&mut self, mut scene: SkillsScene3d) {
        scene.update_palette(&self.palette);
        if let Some(at) = self.pending_entrance.take() {
            scene.trigger_entrance(at);
        }
        self.skills = Some(scene);
    }

    pub fn dispose_scenes(&mut self) {
        if let Some(s) = &mut self.hero_surface {
            s.dispose();
        }
        if let Some(s) = &mut self.skills {
            s.dispose();
        }
    }

    // ---------------- Input ----------------

    pub fn on_pointer_move(&mut self, x: f64, y: f64, now_ms: f64) {
        self.pointer.on_move(x, y, now_ms);
        self.ripples.spawn(x, y, self.pointer.speed, now_ms);
        self.tilt.track_pointer(x, y);
        if let Some(surface) = &mut self.hero_surface {
            let (w, h) = (self.overlay_viewport.width, self.overlay_viewport.height);
            let n = signal_core::pointer::normalize_point(x, y, w, h);
            surface.update_pointer(n.x, n.y);
        }
    }

    /// Touch only steers the 3D surface.
    pub fn on_touch_move(&mut self, x: f64, y: f64) {
        if let Some(surface) = &mut self.hero_surface {
            let (w, h) = (self.overlay_viewport.width, self.overlay_viewport.height);
            let n = signal_core::pointer::normalize_point(x, y, w, h);
            surface.update_pointer(n.x, n.y);
        }
    }

    pub fn on_card_enter(&mut self, index: usize) {
        let update = self.tilt.enter(index);
        self.apply_tilt(update);
    }

    pub fn on_card_move(&mut self, index: usize, x: f64, y: f64) {
        let update = self.tilt.hover_move(index, x, y);
        self.apply_tilt(update);
    }

    pub fn on_card_leave(&mut self, index: usize) {
        let update = self.tilt.leave(index);
        self.apply_tilt(update);
    }

    pub fn apply_tilt(&self, updates: impl IntoIterator<Item = StyleUpdate>) {
        for u in updates {
            let Some(card) = self.page.cards.get(u.index) else {
                continue;
            };
            if let Some(transition) = u.transition {
                dom::set_style(card, "transition", transition);
            }
            if let Some(transform) = &u.transform {
                dom::set_style(card, "transform", transform);
            }
        }
    }

    pub fn on_nav_enter(&mut self, index: usize) {
        self.nav_waves.enter(index);
        if let Some(link) = self.page.nav_links.get(index) {
            _ = link.class_list().remove_1(NAV_RELEASE_CLASS);
            _ = link.class_list().add_1(NAV_HOVER_CLASS);
        }
    }

    pub fn on_nav_leave(&mut self, index: usize, now_ms: f64) {
        self.nav_waves.leave(index, now_ms);
        if let Some(link) = self.page.nav_links.get(index) {
            _ = link.class_list().remove_1(NAV_HOVER_CLASS);
            _ = link.class_list().add_1(NAV_RELEASE_CLASS);
            let link = link.clone();
            dom::set_timeout(NAV_RELEASE_MS as i32, move || {
                _ = link.class_list().remove_1(NAV_RELEASE_CLASS);
            });
        }
    }

    /// Flash cards whose center a ripple's leading ring just crossed.
    pub fn flash_cards(&mut self, hits: &[usize]) {
        for &i in hits {
            let (Some(card), Some(timer)) = (self.page.cards.get(i), self.hit_timers.get_mut(i))
            else {
                continue;
            };
            _ = card.class_list().add_1(CARD_HIT_CLASS);
            dom::clear_timeout(timer.take());
            let el = card.clone();
            *timer = dom::set_timeout(CARD_HIT_MS, move || {
                _ = el.class_list().remove_1(CARD_HIT_CLASS);
            });
        }
    }
}
