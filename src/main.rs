//! Fish Orbit entry point
//!
//! On the web, binds the bowl page and runs the frame loop. Natively, runs
//! a headless simulated session and prints its report.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use fish_orbit::error::Result;
    use fish_orbit::orbit::Pose;
    use fish_orbit::settings::{Pulse, parse_leading_f64};
    use fish_orbit::{BowlGeometry, OrbitController, Settings, WiringError, ids};

    // Web Animations keyframes are awkward to build through web-sys
    #[wasm_bindgen(inline_js = "
        export function pulse_scale(el, peak, duration) {
            if (!el || !el.animate) return;
            el.animate(
                [{ transform: 'scale(1.0)' }, { transform: `scale(${peak})` }, { transform: 'scale(1.0)' }],
                { duration, easing: 'ease-out' }
            );
        }

        export function pulse_from(el, base, peak, duration) {
            if (!el || !el.animate) return;
            el.animate(
                [{ transform: base }, { transform: `${base} scale(${peak})` }],
                { duration, easing: 'ease-out' }
            );
        }
    ")]
    extern "C" {
        fn pulse_scale(el: &Element, peak: f64, duration: f64);
        fn pulse_from(el: &Element, base: &str, peak: f64, duration: f64);
    }

    /// Page elements the widget drives
    struct BowlView {
        fish: Element,
        lap_count: Element,
        play_pause: Element,
        speed: HtmlInputElement,
        speed_value: Element,
        reset: Element,
        /// Celebrates laps when present
        header: Option<Element>,
    }

    fn require(document: &Document, id: &'static str) -> Result<Element> {
        document
            .get_element_by_id(id)
            .ok_or(WiringError::MissingElement(id))
    }

    impl BowlView {
        /// Look up every element, reading geometry and slider bounds into `settings`
        fn bind(document: &Document, settings: &mut Settings) -> Result<Self> {
            require(document, ids::BOWL)?;

            let path = require(document, ids::SWIM_PATH)?;
            settings.geometry = BowlGeometry::from_attributes(
                path.get_attribute("cx").as_deref(),
                path.get_attribute("cy").as_deref(),
                path.get_attribute("r").as_deref(),
            );

            let speed: HtmlInputElement = require(document, ids::SPEED)?
                .dyn_into()
                .map_err(|_| WiringError::WrongElementType {
                    id: ids::SPEED,
                    expected: "HtmlInputElement",
                })?;
            settings.speed = settings.speed.with_attributes(
                Some(speed.min().as_str()),
                Some(speed.max().as_str()),
                Some(speed.step().as_str()),
            );

            Ok(Self {
                fish: require(document, ids::FISH)?,
                lap_count: require(document, ids::LAP_COUNT)?,
                play_pause: require(document, ids::PLAY_PAUSE)?,
                speed,
                speed_value: require(document, ids::SPEED_VALUE)?,
                reset: require(document, ids::RESET)?,
                header: document.query_selector(ids::HEADER_SELECTOR).ok().flatten(),
            })
        }

        fn place_fish(&self, pose: &Pose) {
            let _ = self.fish.set_attribute("transform", &pose.svg_transform());
        }

        fn show_laps(&self, laps: u64) {
            self.lap_count.set_text_content(Some(&laps.to_string()));
        }

        fn show_speed(&self, label: &str) {
            self.speed_value.set_text_content(Some(label));
        }

        fn show_running(&self, running: bool) {
            self.play_pause
                .set_text_content(Some(if running { "Pause" } else { "Play" }));
            let _ = self
                .play_pause
                .set_attribute("aria-pressed", if running { "true" } else { "false" });
        }

        fn celebrate_lap(&self, pulse: &Pulse) {
            if let Some(header) = &self.header {
                pulse_scale(header, pulse.peak_scale, pulse.duration_ms);
            }
        }

        fn bounce_fish(&self, pose: &Pose, pulse: &Pulse) {
            pulse_from(&self.fish, &pose.css_transform(), pulse.peak_scale, pulse.duration_ms);
        }
    }

    /// Widget instance shared by the frame loop and event handlers
    struct App {
        controller: OrbitController,
        view: BowlView,
    }

    impl App {
        fn on_frame(&mut self, time: f64) {
            let frame = self.controller.frame(time);
            if frame.advance.lap_incremented {
                log::debug!("Lap {}", frame.advance.lap_count);
                self.view.show_laps(frame.advance.lap_count);
                self.view.celebrate_lap(&self.controller.settings().lap_pulse);
            }
            self.view.place_fish(&frame.pose);
        }

        fn on_play_pause(&mut self) {
            let running = self.controller.toggle_running();
            self.view.show_running(running);
        }

        fn on_speed_input(&mut self) {
            let raw = self.view.speed.value();
            let parsed = parse_leading_f64(&raw)
                .and_then(|v| self.controller.settings().speed.snap(v));
            match parsed {
                Some(speed) => {
                    self.controller.set_speed(speed);
                    self.view.show_speed(&self.controller.speed_label());
                }
                None => log::warn!("Ignoring speed input {:?}", raw),
            }
        }

        fn on_reset(&mut self) {
            let pose = self.controller.reset();
            self.view.show_laps(0);
            self.view.place_fish(&pose);
        }

        fn on_fish_click(&mut self) {
            self.controller.nudge();
            let pose = self.controller.pose();
            self.view
                .bounce_fish(&pose, &self.controller.settings().click_pulse);
        }
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        // Logger already set means a second start; keep the first
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Fish Orbit starting...");

        let window = web_sys::window().ok_or(WiringError::NoWindow)?;
        let document = window.document().ok_or(WiringError::NoDocument)?;

        let mut settings = Settings::default();
        let view = BowlView::bind(&document, &mut settings)?;
        log::info!(
            "Swim path at ({}, {}) r={}",
            settings.geometry.center.x,
            settings.geometry.center.y,
            settings.geometry.radius
        );

        let controller = OrbitController::new(settings);
        view.show_speed(&controller.speed_label());
        view.show_running(controller.is_running());
        view.show_laps(controller.laps());
        view.place_fish(&controller.pose());

        let app = Rc::new(RefCell::new(App { controller, view }));

        setup_controls(app.clone());

        // Start frame loop
        request_animation_frame(app);

        log::info!("Fish Orbit running!");
        Ok(())
    }

    fn on_click(target: &Element, app: Rc<RefCell<App>>, handler: fn(&mut App)) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            handler(&mut app.borrow_mut());
        });
        let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let (play_pause, reset, fish, speed) = {
            let a = app.borrow();
            (
                a.view.play_pause.clone(),
                a.view.reset.clone(),
                a.view.fish.clone(),
                a.view.speed.clone(),
            )
        };

        on_click(&play_pause, app.clone(), App::on_play_pause);
        on_click(&reset, app.clone(), App::on_reset);
        on_click(&fish, app.clone(), App::on_fish_click);

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().on_speed_input();
        });
        let _ = speed.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping frame loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().on_frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run().map_err(|e| {
        log::error!("Fish Orbit failed to start: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fish_orbit::Settings;
    use fish_orbit::session::{SessionConfig, run_session};

    env_logger::init();
    log::info!("Fish Orbit (native) starting...");
    log::info!("The bowl needs a browser - run with `trunk serve`; simulating a session instead");

    let report = run_session(SessionConfig::default(), Settings::default());
    log::info!(
        "Simulated {} frames, {} laps",
        report.frames,
        report.laps
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode session report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
