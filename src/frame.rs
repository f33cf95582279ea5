use signal_core::canvas::{Canvas2d, Renderer};
use signal_core::frame::{run_frame, FrameStages};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::portfolio::Portfolio;

impl FrameStages for Portfolio {
    fn clear_overlay(&mut self, _time_ms: f64) {
        let vp = self.overlay_viewport;
        self.overlay.clear_rect(0.0, 0.0, vp.width, vp.height);
    }

    fn draw_ripples(&mut self, time_ms: f64) {
        let hits = self
            .ripples
            .draw(&mut self.overlay, time_ms, &self.palette, &self.hit_targets);
        if !hits.is_empty() {
            self.flash_cards(&hits);
        }
    }

    fn draw_pulses(&mut self, time_ms: f64) {
        self.pulses.draw(
            &mut self.overlay,
            time_ms,
            self.scroll.scroll_y,
            self.overlay_viewport.height,
            &self.palette,
            self.scope,
        );
    }

    fn update_nav_waves(&mut self, time_ms: f64) {
        let paths = self.nav_waves.update(self.pointer.smooth_speed, time_ms);
        for (path, el) in paths.iter().zip(&self.page.nav_paths) {
            if let Some(el) = el {
                _ = el.set_attribute("d", path);
            }
        }
    }

    fn draw_hero_carrier(&mut self, time_ms: f64) {
        if let Some(hero) = &mut self.hero_carrier {
            hero.render(time_ms);
        }
    }

    fn render_hero_surface(&mut self, time_ms: f64) {
        if let Some(surface) = &mut self.hero_surface {
            surface.render(time_ms);
        }
    }

    fn draw_dividers(&mut self, time_ms: f64) {
        for divider in &mut self.dividers {
            divider.render(time_ms);
        }
    }

    fn render_skills(&mut self, time_ms: f64) {
        if let Some(skills) = &mut self.skills {
            skills.render(time_ms);
        }
    }

    fn update_card_tilt(&mut self, _time_ms: f64) {
        let updates = self.tilt.update();
        self.apply_tilt(updates);
    }

    fn hero_surface_active(&self) -> bool {
        self.hero_surface.as_ref().is_some_and(|s| s.is_active())
    }
}

impl Portfolio {
    pub fn frame(&mut self, time_ms: f64) {
        if self.resize.poll(time_ms) {
            self.resize_canvases();
            self.update_scroll_state(time_ms);
        }
        run_frame(self, time_ms);
    }
}

/// Drive `step` from `requestAnimationFrame` until it returns `false`.
pub fn animate(mut step: impl FnMut(f64) -> bool + 'static) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |time_ms: f64| {
        if !step(time_ms) {
            // Still executing, so leak rather than drop.
            if let Some(cb) = tick_clone.borrow_mut().take() {
                cb.forget();
            }
            return;
        }
        request(&tick_clone);
    }) as Box<dyn FnMut(f64)>));
    request(&tick);
}

fn request(tick: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(portfolio: Rc<RefCell<Portfolio>>) {
    animate(move |time_ms| {
        // A handler holding the state this turn just costs one frame.
        if let Ok(mut p) = portfolio.try_borrow_mut() {
            p.frame(time_ms);
        }
        true
    });
}
