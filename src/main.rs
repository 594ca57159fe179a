//! Grow Arena entry point
//!
//! The browser build wires the session to the page (canvas, buttons, audio,
//! LocalStorage) and ticks it from requestAnimationFrame. The native build
//! runs a headless demo with a simple autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use grow_arena::audio::Mixer;
    use grow_arena::audio::web::HtmlAudio;
    use grow_arena::persistence::LocalStorage;
    use grow_arena::platform::canvas2d::Canvas2d;
    use grow_arena::platform::{client_to_canvas, time_seed};
    use grow_arena::{Screen, Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        canvas: Canvas2d,
        audio: HtmlAudio,
        mixer: Mixer,
        settings: Settings,
        /// A frame callback is pending
        frame_requested: bool,
    }

    impl Game {
        fn toggle_mute(&mut self) -> bool {
            let muted = self.mixer.toggle_mute(&mut self.audio);
            self.settings.muted = muted;
            self.settings.save(self.session.store_mut());
            muted
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Grow Arena starting...");

        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let (width, height) = window_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let store = LocalStorage::default();
        let settings = Settings::load(&store);
        let mixer = Mixer::from_settings(&settings);
        let mut audio = HtmlAudio::new();
        mixer.sync_mute(&mut audio);

        let seed = time_seed();
        let session = Session::new(
            Tuning::default(),
            seed,
            Vec2::new(width, height),
            store,
        );
        log::info!("Session created with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            canvas: Canvas2d::new(ctx),
            audio,
            mixer,
            settings,
            frame_requested: false,
        }));

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(&window, canvas, game.clone());

        sync_screens(&game.borrow());
        log::info!("Grow Arena ready");
    }

    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w as f32, h as f32)
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse move anywhere on the page
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pointer =
                    pointer_on_canvas(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().session.pointer_moved(pointer);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move on the canvas
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.session.is_running() {
                    return;
                }
                // Keep the page from scrolling while steering
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pointer =
                        pointer_on_canvas(&canvas_clone, touch.client_x(), touch.client_y());
                    g.session.pointer_moved(pointer);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Client coordinates to canvas space, shared by mouse and touch
    fn pointer_on_canvas(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        client_to_canvas(
            Vec2::new(client_x as f32, client_y as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
        )
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("startButton", move || {
                let started = game.borrow_mut().session.start();
                if started {
                    begin_ticking(game.clone());
                }
            });
        }
        {
            let game = game.clone();
            on_click("restartButton", move || {
                let restarted = game.borrow_mut().session.restart();
                if restarted {
                    begin_ticking(game.clone());
                }
            });
        }
        {
            let game = game.clone();
            on_click("howToPlayButton", move || {
                let mut g = game.borrow_mut();
                g.session.show_instructions();
                sync_screens(&g);
            });
        }
        {
            let game = game.clone();
            on_click("backButton", move || {
                let mut g = game.borrow_mut();
                g.session.show_start();
                sync_screens(&g);
            });
        }
        {
            let game = game.clone();
            on_click("muteButton", move || {
                let muted = game.borrow_mut().toggle_mute();
                set_mute_label(muted);
            });
        }
        set_mute_label(game.borrow().mixer.is_muted());
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = window_size(&window_clone);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            game.borrow_mut().session.resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_mute_label(muted: bool) {
        if let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("muteButton"))
        {
            btn.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
        }
    }

    /// Show/hide the overlay screens for the current session screen
    fn sync_screens(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        let screen = game.session.screen();

        let set_hidden = |id: &str, hidden: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        };
        set_hidden("startScreen", screen != Screen::Start);
        set_hidden("howToPlayScreen", screen != Screen::Instructions);

        if let Some(btn) = document
            .get_element_by_id("restartButton")
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let style = btn.style();
            if screen == Screen::GameOver {
                let _ = style.set_property("top", "60%");
                let _ = style.set_property("display", "block");
            } else {
                let _ = style.set_property("display", "none");
            }
        }
    }

    fn begin_ticking(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            sync_screens(&g);
            if g.frame_requested {
                return;
            }
            g.frame_requested = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame_requested = false;

            let frame = g.session.step();
            let Game {
                canvas,
                audio,
                mixer,
                ..
            } = &mut *g;
            frame.present(canvas);
            mixer.play(&frame.audio, audio);

            if g.session.is_running() {
                g.frame_requested = true;
                true
            } else {
                sync_screens(&g);
                false
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grow Arena (native) starting...");
    log::info!("The playable build targets wasm32; running a headless demo instead");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(grow_arena::platform::time_seed);

    let (score, ticks) = demo::run(seed, 20_000);
    println!("Seed {seed}: scored {score} in {ticks} ticks");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use grow_arena::persistence::MemoryStore;
    use grow_arena::{Session, Tuning, world_to_screen};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    /// Play one run with an autopilot that heads for the nearest item.
    ///
    /// Returns (final score, ticks played).
    pub fn run(seed: u64, max_ticks: u64) -> (u64, u64) {
        let mut session = Session::new(Tuning::default(), seed, VIEWPORT, MemoryStore::new());
        session.start();

        let mut ticks = 0;
        while session.is_running() && ticks < max_ticks {
            if let Some(pointer) = nearest_item(&session) {
                session.pointer_moved(pointer);
            }
            session.step();
            ticks += 1;
            if ticks % 600 == 0 {
                log::info!("tick {}: score {}", ticks, session.score());
            }
        }
        (session.score(), ticks)
    }

    /// Screen-space position of the closest item
    fn nearest_item(session: &Session<MemoryStore>) -> Option<Vec2> {
        let state = session.state();
        let player = state.player.pos;
        state
            .items
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|item| world_to_screen(item.pos, player, state.viewport))
    }
}
