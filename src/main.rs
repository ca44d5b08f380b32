//! Road Hopper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use road_hopper::consts::*;
    use road_hopper::platform::{Command, SwipeTracker, command_for_key};
    use road_hopper::renderer::{RenderState, WgpuRenderer};
    use road_hopper::{DisplaySink, Game, Hud, LoopControl, Settings};

    /// Writes the HUD into the page
    struct DomDisplay {
        document: Document,
        last: Option<Hud>,
        show_fps: bool,
    }

    impl DomDisplay {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            let el = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(el) = el {
                let display = if visible { "block" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    impl DisplaySink for DomDisplay {
        fn publish(&mut self, hud: &Hud) {
            if self.last.as_ref() == Some(hud) {
                return;
            }

            self.set_text("score", &hud.score.to_string());
            self.set_text("lives", &hud.lives.to_string());
            if self.show_fps {
                self.set_text("fps", &hud.fps.to_string());
            }
            if let Some(final_score) = hud.final_score {
                self.set_text("finalScore", &final_score.to_string());
            }
            self.set_visible("gameOverDiv", hud.game_over);

            self.last = Some(*hud);
        }
    }

    struct App {
        game: Game,
        renderer: WgpuRenderer,
        display: DomDisplay,
        settings: Settings,
        swipe: SwipeTracker,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Road Hopper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, same aspect as the field
        let dpr = window.device_pixel_ratio();
        let width = (FIELD_WIDTH as f64 * dpr) as u32;
        let height = (FIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed);
        game.set_autopilot(settings.autopilot);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
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

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");

        let display = DomDisplay {
            document,
            last: None,
            show_fps: settings.show_fps,
        };

        let app = Rc::new(RefCell::new(App {
            game,
            renderer: WgpuRenderer::new(render_state),
            display,
            settings,
            swipe: SwipeTracker::new(),
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Road Hopper running!");
    }

    /// Apply a command and re-enter the frame chain if it had halted
    fn dispatch(app: &Rc<RefCell<App>>, command: Command) {
        let resume = {
            let mut a = app.borrow_mut();
            let resume = a.game.handle(command);
            if command == Command::ToggleAutopilot {
                a.settings.autopilot = a.game.autopilot();
                a.settings.save();
            }
            resume
        };
        if resume {
            request_animation_frame(app.clone());
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let (command, running) = {
                    let a = app.borrow();
                    (
                        command_for_key(&event.key(), a.settings.wasd_keys),
                        a.game.is_running(),
                    )
                };
                match command {
                    // Enter only restarts from the game-over panel
                    Some(Command::Restart) if running => {}
                    Some(command) => {
                        if matches!(command, Command::Move(_)) {
                            // Keep arrow keys from scrolling the page
                            event.prevent_default();
                        }
                        dispatch(&app, command);
                    }
                    None => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    app.borrow_mut().swipe.begin(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end (swipe)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                let dir = {
                    let mut a = app.borrow_mut();
                    let threshold = a.settings.swipe_threshold;
                    a.swipe.end(pos, threshold)
                };
                if let Some(dir) = dir {
                    dispatch(&app, Command::Move(dir));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let Some(document) = window.document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                dispatch(&app, Command::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let control = {
            let mut a = app.borrow_mut();
            let App {
                game,
                renderer,
                display,
                ..
            } = &mut *a;
            game.frame(time, renderer, display)
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use road_hopper::game::Frame;
    use road_hopper::renderer::{Vertex, shapes};
    use road_hopper::{DisplaySink, Hud, Renderer};

    /// Builds the scene every frame without presenting it
    #[derive(Default)]
    pub struct SceneRecorder {
        vertices: Vec<Vertex>,
        pub frames: u64,
    }

    impl SceneRecorder {
        pub fn vertex_count(&self) -> usize {
            self.vertices.len()
        }
    }

    impl Renderer for SceneRecorder {
        fn draw_frame(&mut self, frame: &Frame<'_>) {
            shapes::build_scene(frame, &mut self.vertices);
            self.frames += 1;
        }
    }

    /// Logs score and lives whenever they change
    #[derive(Default)]
    pub struct LogDisplay {
        last: Option<Hud>,
    }

    impl DisplaySink for LogDisplay {
        fn publish(&mut self, hud: &Hud) {
            let changed = self
                .last
                .is_none_or(|last| last.score != hud.score || last.lives != hud.lives);
            if changed {
                log::info!("Score {} | Lives {}", hud.score, hud.lives);
            }
            if hud.game_over && !self.last.is_some_and(|last| last.game_over) {
                log::info!("GAME OVER - final score {}", hud.final_score.unwrap_or(hud.score));
            }
            self.last = Some(*hud);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use road_hopper::{Game, LoopControl, Settings};

    env_logger::init();

    // road-hopper [seed] [ticks]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(seed_from_clock);
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60);

    log::info!("Road Hopper (native) starting with seed {}", seed);
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let settings = Settings::load();
    log::debug!("Settings: {:?}", settings);

    let mut game = Game::new(seed);
    game.set_autopilot(true);

    let mut renderer = headless::SceneRecorder::default();
    let mut display = headless::LogDisplay::default();
    let frame_ms = 1000.0 / 60.0;
    for i in 0..frames {
        let time = frame_ms * (i + 1) as f64;
        if game.frame(time, &mut renderer, &mut display) == LoopControl::Halt {
            break;
        }
    }

    let hud = game.hud();
    println!(
        "Seed {}: score {}, lives {}, {} crossings over {} frames ({} vertices per frame)",
        seed,
        hud.score,
        hud.lives,
        game.state.crossings,
        renderer.frames,
        renderer.vertex_count()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
