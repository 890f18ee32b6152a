//! Brickfall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use brickfall::audio::{AudioManager, SoundEffect};
    use brickfall::consts::*;
    use brickfall::renderer::{RenderState, build_scene};
    use brickfall::settings::Settings;
    use brickfall::sim::{GameEvent, GameState, Scene, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        canvas_width: f32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                state: GameState::new(seed),
                render_state: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                canvas_width: PLAYFIELD_WIDTH,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Map a canvas-relative x to playfield coordinates
        fn pos_to_playfield_x(&self, x: f32) -> f32 {
            x / self.canvas_width.max(1.0) * PLAYFIELD_WIDTH
        }

        /// Run simulation ticks and dispatch the resulting events
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
            }

            for event in self.state.drain_events() {
                self.audio.play(sound_for(event));
                match event {
                    GameEvent::GameStarted => {
                        log::info!("Round started (seed {})", self.state.seed)
                    }
                    GameEvent::RoundCleared => {
                        log::info!("Round cleared ({} total)", self.state.rounds_cleared)
                    }
                    GameEvent::RoundLost => log::info!("Round lost"),
                    GameEvent::BallSpawned => {
                        log::info!("Bonus ball in play ({})", self.state.spawner.len())
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
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Live brick count
            if let Some(el) = document.query_selector("#hud-bricks .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.bricks.live_count().to_string()));
            }

            // Balls in play
            if let Some(el) = document.query_selector("#hud-balls .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.spawner.len().to_string()));
            }

            // FPS
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                let text = if self.settings.show_fps {
                    self.fps.to_string()
                } else {
                    String::new()
                };
                el.set_text_content(Some(&text));
            }

            // Title overlay
            if let Some(el) = document.get_element_by_id("title-overlay") {
                if self.state.scene == Scene::Title {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Clear overlay
            if let Some(el) = document.get_element_by_id("clear-overlay") {
                if self.state.scene == Scene::Cleared {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // "Get ready" countdown for the next bonus ball
            if let Some(el) = document.get_element_by_id("get-ready") {
                if self.state.scene == Scene::InGame && self.state.spawner.spawn_pending() {
                    let secs = self.state.spawner.countdown_ticks() as f32 * SIM_DT;
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("Get ready... {:.1}", secs)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Map a sim event to its sound effect
    fn sound_for(event: GameEvent) -> SoundEffect {
        match event {
            GameEvent::GameStarted => SoundEffect::GameStart,
            GameEvent::BrickDestroyed => SoundEffect::BrickBreak,
            GameEvent::WallBounce => SoundEffect::WallHit,
            GameEvent::PaddleBounce => SoundEffect::PaddleHit,
            GameEvent::BallSpawned => SoundEffect::BallSpawn,
            GameEvent::BallLost => SoundEffect::BallLost,
            GameEvent::RoundCleared => SoundEffect::RoundClear,
            GameEvent::RoundLost => SoundEffect::RoundLost,
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brickfall starting...");

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

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().canvas_width = client_w as f32;

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Forfeit the round when the tab is hidden; mute on blur
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Brickfall running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - paddle follows the pointer
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.canvas_width = canvas_clone.client_width() as f32;
                let x = g.pos_to_playfield_x(event.offset_x() as f32);
                g.input.pointer_x = Some(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - start a round, resume audio on the gesture
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.canvas_width = canvas_clone.client_width() as f32;
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let x = g.pos_to_playfield_x(x);
                    g.input.pointer_x = Some(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (also starts a round)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.start = true;
                g.audio.resume();
                if let Some(touch) = event.touches().get(0) {
                    g.canvas_width = canvas_clone.client_width() as f32;
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let x = g.pos_to_playfield_x(x);
                    g.input.pointer_x = Some(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        g.input.start = true;
                        g.audio.resume();
                    }
                    "m" | "M" => {
                        let muted = g.audio.muted();
                        g.audio.set_muted(!muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize): forfeit the round -
        // there is no pause state, and the sim must not run unseen
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.scene == Scene::InGame {
                        g.state.return_to_title();
                        log::info!("Round forfeited (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur/focus: mute per settings
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Brickfall (native) starting...");
    log::info!("Native mode requires winit integration - run with `trunk serve` for web version");

    // Smoke-check the sim so a native run still exercises something
    smoke_test_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_round() {
    use brickfall::consts::SIM_DT;
    use brickfall::sim::{GameState, Scene, TickInput, tick};

    let mut state = GameState::new(1);
    let input = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &input, SIM_DT);
    assert_eq!(state.scene, Scene::InGame, "round should start");

    let input = TickInput::default();
    for _ in 0..600 {
        tick(&mut state, &input, SIM_DT);
    }
    println!("✓ Simulated 5s: {} bricks left", state.bricks.live_count());
}
