//! Lane Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use lane_dodge::consts::*;
    use lane_dodge::persistence::LocalStorage;
    use lane_dodge::platform::{command_for_key, setting_toggle_for_key, tap_side};
    use lane_dodge::renderer::{Scene, SdfRenderState};
    use lane_dodge::sim::{Command, GameEvent, GameState, RunPhase, TickInput, tick};
    use lane_dodge::{BestScore, Settings, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        best: BestScore,
        store: LocalStorage,
        rng: Pcg32,
        render_state: Option<SdfRenderState>,
        /// rAF timestamp of the previous frame (0 before the first frame)
        last_time: f64,
        /// Commands queued by input handlers since the last frame
        input: TickInput,
        /// Pending requestAnimationFrame registration
        frame_handle: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = LocalStorage::open();
            let best = BestScore::load(&store);
            let settings = Settings::load(&store);
            Self {
                state: GameState::new(Tuning::load(), best.value()),
                settings,
                best,
                store,
                rng: Pcg32::seed_from_u64(seed),
                render_state: None,
                last_time: 0.0,
                input: TickInput::default(),
                frame_handle: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation step
        fn update(&mut self, dt: f32, time: f64) {
            let events = tick(&mut self.state, &self.input, dt, &mut self.rng);
            self.input.clear();

            for event in events {
                match event {
                    GameEvent::RunEnded {
                        score,
                        new_best: true,
                        ..
                    } => {
                        self.best.record(&mut self.store, score);
                    }
                    GameEvent::ObstacleSpawned { id, lane } => {
                        log::debug!("Obstacle {} spawned in lane {}", id, lane);
                    }
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                let secs = render_state.elapsed_secs(time);
                let scene = Scene::build(&self.state, &self.settings, render_state.size, secs);
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.best_score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Show/hide pause message
            if let Some(el) = document.get_element_by_id("pause-overlay") {
                let class = if self.state.phase == RunPhase::Paused { "overlay" } else { "overlay hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == RunPhase::Dead {
                    let _ = el.set_attribute("class", "overlay");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("final-best") {
                        best_el.set_text_content(Some(&self.state.best_score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }
        }

        fn save_settings(&mut self) {
            self.settings.save(&mut self.store);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical size, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = SdfRenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        render_state.set_start_time(js_sys::Date::now());
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());
        setup_page_lifecycle(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Lane Dodge running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer tap - left/right half of the play area
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let w = canvas_clone.client_width() as f32;
                let side = tap_side(event.offset_x() as f32, w);
                game.borrow_mut().input.push(Command::Tap(side));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = event.key();
                let mut g = game.borrow_mut();
                if let Some(command) = command_for_key(&key) {
                    // Keep arrows from scrolling the page
                    event.prevent_default();
                    g.input.push(command);
                } else if let Some(toggle) = setting_toggle_for_key(&key) {
                    g.settings.toggle(toggle);
                    log::info!("Settings: {:?}", g.settings);
                    g.save_settings();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;

            // Calculate delta time; tick() clamps large gaps
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    /// Withdraw the pending frame so the loop stops
    fn cancel_loop(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if let (Some(handle), Some(window)) = (g.frame_handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
            log::info!("Game loop stopped");
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.push(Command::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == RunPhase::Running {
                        g.input.push(Command::AutoPause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == RunPhase::Running {
                    g.input.push(Command::AutoPause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_page_lifecycle(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Page going away (navigation, bfcache): stop scheduling frames
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                cancel_loop(&game);
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restored from bfcache: resume scheduling
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let idle = {
                    let mut g = game.borrow_mut();
                    g.last_time = 0.0;
                    g.frame_handle.is_none()
                };
                if idle {
                    log::info!("Game loop resumed");
                    request_animation_frame(game.clone());
                }
            });
            let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Dodge (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for web version");

    headless_run(12345, 60.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate one run with a simple dodging bot and log the outcome
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, seconds: f32) {
    use lane_dodge::persistence::default_store;
    use lane_dodge::sim::{Command, GameEvent, GameState, TickInput, tick};
    use lane_dodge::{BestScore, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    let mut store = default_store();
    let mut best = BestScore::load(&store);
    let mut state = GameState::new(Tuning::load(), best.value());
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut input = TickInput::default();

    let frames = (seconds / DT) as u32;
    for _ in 0..frames {
        // Sidestep anything in our lane that is about to arrive
        let lane = state.player.lane;
        let threatened = state
            .obstacles
            .iter()
            .any(|o| o.lane == lane && !o.passed && o.bottom() > state.player.y - 120.0);
        if threatened {
            let left_clear = lane > 0
                && !state
                    .obstacles
                    .iter()
                    .any(|o| o.lane == lane - 1 && o.bottom() > state.player.y - 60.0 && !o.passed);
            input.push(if left_clear { Command::MoveLeft } else { Command::MoveRight });
        }

        for event in tick(&mut state, &input, DT, &mut rng) {
            if let GameEvent::RunEnded { score, .. } = event {
                best.record(&mut store, score);
            }
        }
        input.clear();

        if !state.is_alive() {
            break;
        }
    }

    log::info!(
        "Headless run finished after {:.1}s: score {}, best {}, {}",
        state.elapsed,
        state.score,
        best.value(),
        if state.is_alive() { "survived" } else { "crashed" }
    );
}
