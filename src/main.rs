//! Leap and Avoid entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use leap_and_avoid::Settings;
    use leap_and_avoid::consts::*;
    use leap_and_avoid::renderer::{RenderState, frame_vertices};
    use leap_and_avoid::sim::{Frame, GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        running: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let input = TickInput {
                autopilot: settings.autopilot,
                ..Default::default()
            };
            Self {
                state: GameState::new(seed),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input,
                running: true,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump = false;
                self.input.restart = false;

                for event in self.state.take_events() {
                    match event {
                        GameEvent::GameOver { cause } => {
                            log::info!("Game over: {:?}", cause);
                        }
                        GameEvent::Restarted => log::info!("Restarted"),
                        other => log::debug!("{:?}", other),
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let frame = Frame::capture(&self.state, self.settings.particles);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame_vertices(&frame)) {
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
            update_hud(&frame);
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(frame: &Frame) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
            el.set_text_content(Some(&frame.score.to_string()));
        }
        if let Some(el) = document.query_selector("#hud-coins .hud-value").ok().flatten() {
            el.set_text_content(Some(&frame.coins.to_string()));
        }

        // "Game Over / Press R to Restart" overlay
        if let Some(el) = document.get_element_by_id("game-over") {
            let class = if frame.game_over { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Leap and Avoid starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No #canvas element");
                return;
            }
        };

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to start renderer: {}", e);
                return;
            }
        }

        setup_input_handlers(game.clone());
        setup_focus_handler(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Leap and Avoid running!");
    }

    /// Keyboard: arrows/A/D move, space jumps, R restarts, I toggles
    /// the autopilot, Escape quits
    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    " " => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.input.jump = true;
                        }
                    }
                    "r" | "R" => g.input.restart = true,
                    "i" | "I" => {
                        // Session only; settings are never written back
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "Escape" => g.input.quit = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Release held keys when the window loses focus
    fn setup_focus_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.input.left = false;
            g.input.right = false;
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            if g.input.quit {
                g.running = false;
                log::info!("Quit requested, stopping");
            }
            if !g.running {
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
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
    use leap_and_avoid::{Settings, headless};

    env_logger::init();
    log::info!("Leap and Avoid (native) starting...");
    log::info!("Native mode runs headless with the autopilot - run with `trunk serve` to play");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!("Seed: {}, tick budget: {}", seed, settings.max_ticks);

    let summary = headless::run(seed, settings.max_ticks);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
