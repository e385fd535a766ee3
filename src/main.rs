//! RPS Arena entry point
//!
//! On the web this wires the page controls to a session and drives it from
//! `requestAnimationFrame`. Natively it runs one simulation headless and
//! prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use rps_arena::audio::{AudioManager, SoundEffect};
    use rps_arena::renderer::CanvasRenderer;
    use rps_arena::settings::{clamp_speed, parse_count};
    use rps_arena::sim::{KindCounts, SimEvent};
    use rps_arena::{Phase, RunHistory, Session, Settings};

    /// Page state: one session plus its collaborators
    struct App {
        session: Session,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        history: RunHistory,
    }

    impl App {
        /// Step (if running), draw, refresh the stats
        fn frame(&mut self) {
            let now = js_sys::Date::now();
            if let Some(report) = self.session.frame(now) {
                // At most one conversion cue per frame
                if let Some(SimEvent::Conversion { to, .. }) = report.events.last() {
                    self.audio.play(SoundEffect::Convert(*to));
                }

                if report.terminated {
                    if let Some(outcome) = self.session.outcome().cloned() {
                        set_text("result", &outcome.message());
                        self.history.record(outcome);
                        self.history.save();
                        self.update_history();
                    }
                    self.audio.play(SoundEffect::Victory);
                    self.update_start_label();
                }
            }

            self.renderer.render(self.session.sim());
            self.update_stats(self.session.counts());
        }

        /// Start / Pause / Resume button
        fn toggle(&mut self) {
            let now = js_sys::Date::now();
            self.audio.resume();

            if matches!(self.session.phase(), Phase::Idle | Phase::Terminated) {
                // A fresh start always honours the current form values
                let counts = self.read_counts();
                self.session.reset(counts, self.renderer.bounds());
                set_text("result", "");
            }
            self.session.toggle(now);
            self.update_start_label();
        }

        fn reset(&mut self) {
            let counts = self.read_counts();
            let bounds = self.renderer.fit_to_element();
            self.session.reset(counts, bounds);
            set_text("result", "");
            self.update_start_label();
            self.renderer.render(self.session.sim());
            self.update_stats(self.session.counts());
        }

        fn set_speed(&mut self, raw: &str) {
            let Ok(value) = raw.trim().parse::<f32>() else {
                log::warn!("Ignoring speed value {raw:?}");
                return;
            };
            let speed = clamp_speed(value);
            self.session.set_speed(speed);
            self.settings.speed = speed;
            self.settings.save();
        }

        fn set_volume(&mut self, raw: &str) {
            let Some(volume) = self.settings.set_master_volume(raw) else {
                log::warn!("Ignoring volume value {raw:?}");
                return;
            };
            self.audio.set_master_volume(volume);
            self.settings.save();
        }

        fn set_muted(&mut self, muted: bool) {
            self.settings.muted = muted;
            self.audio.set_muted(muted);
            self.settings.save();
        }

        /// Read the count inputs and remember them
        fn read_counts(&mut self) -> KindCounts {
            let read = |id: &str, fallback: u32| {
                input(id).map(|el| parse_count(&el.value())).unwrap_or(fallback)
            };
            self.settings.rock_count = read("rockCount", self.settings.rock_count);
            self.settings.paper_count = read("paperCount", self.settings.paper_count);
            self.settings.scissors_count = read("scissorsCount", self.settings.scissors_count);
            self.settings.save();
            self.settings.counts()
        }

        fn update_start_label(&self) {
            let label = match self.session.phase() {
                Phase::Idle | Phase::Terminated => "Start Simulation",
                Phase::Running => "Pause Simulation",
                Phase::Paused => "Resume Simulation",
            };
            set_text("startBtn", label);
        }

        fn update_stats(&self, counts: KindCounts) {
            set_text("rockStat", &counts.rock.to_string());
            set_text("paperStat", &counts.paper.to_string());
            set_text("scissorsStat", &counts.scissors.to_string());
        }

        fn update_history(&self) {
            set_text("history", &self.history.summary());
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn input(id: &str) -> Option<HtmlInputElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("RPS Arena starting...");

        let Some(canvas) = document()
            .and_then(|d| d.get_element_by_id("simulationCanvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #simulationCanvas on the page");
            return;
        };
        let Some(renderer) = CanvasRenderer::new(canvas) else {
            log::error!("Canvas has no 2D context");
            return;
        };
        let bounds = renderer.fit_to_element();

        let settings = Settings::load();
        let form = [
            ("rockCount", settings.rock_count.to_string()),
            ("paperCount", settings.paper_count.to_string()),
            ("scissorsCount", settings.scissors_count.to_string()),
            ("speed", settings.speed.to_string()),
            ("volume", settings.master_volume.to_string()),
        ];
        for (id, value) in &form {
            if let Some(el) = input(id) {
                el.set_value(value);
            }
        }
        if let Some(el) = input("mute") {
            el.set_checked(settings.muted);
        }

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(settings.counts(), bounds, settings.speed, seed);
        log::info!("Session created with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            session,
            renderer,
            audio,
            settings,
            history: RunHistory::load(),
        }));
        {
            let a = app.borrow();
            a.renderer.render(a.session.sim());
            a.update_stats(a.session.counts());
            a.update_start_label();
            a.update_history();
        }

        setup_controls(app.clone());

        request_animation_frame(app);

        log::info!("RPS Arena running!");
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let Some(document) = document() else { return };

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().toggle();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = input("speed") {
            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_speed(&slider_clone.value());
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = input("volume") {
            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_volume(&slider_clone.value());
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(checkbox) = input("mute") {
            let checkbox_clone = checkbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_muted(checkbox_clone.checked());
            });
            let _ = checkbox.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            app.borrow_mut().frame();
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

/// Headless arena size
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_WIDTH: f32 = 800.0;
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_HEIGHT: f32 = 600.0;
/// Give up on runs that never settle
#[cfg(not(target_arch = "wasm32"))]
const MAX_HEADLESS_STEPS: u64 = 100_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use rps_arena::consts::FRAME_MS;
    use rps_arena::sim::Bounds;
    use rps_arena::{Phase, Session, Settings};

    env_logger::init();
    log::info!("RPS Arena (native) starting headless run...");

    let settings = Settings::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("Seed: {}", seed);

    let bounds = Bounds::new(HEADLESS_WIDTH, HEADLESS_HEIGHT);
    let mut session = Session::new(settings.counts(), bounds, settings.speed, seed);

    // Synthetic 60 Hz clock
    let mut now = 0.0;
    session.start(now);
    while session.phase() == Phase::Running && session.sim().steps < MAX_HEADLESS_STEPS {
        now += FRAME_MS;
        session.frame(now);
    }

    match session.outcome() {
        Some(outcome) => println!("{}", outcome.message()),
        None => log::warn!("No winner after {} steps", session.sim().steps),
    }

    match serde_json::to_string_pretty(&session.counts()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize counts: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
