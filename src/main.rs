//! Vibe Knights entry point
//!
//! Browser: wires keyboard input, the animation-frame loop and the DOM HUD to
//! the controller. Native: runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CustomEvent, CustomEventInit, Document, KeyboardEvent};

    use vibe_knights::audio::WebAudio;
    use vibe_knights::highscores::LocalStorageStore;
    use vibe_knights::platform::{FrameLoop, cancel_frame};
    use vibe_knights::sim::{GamePhase, Snapshot};
    use vibe_knights::{Game, Tuning};

    /// DOM event carrying each frame's snapshot as JSON
    const FRAME_EVENT: &str = "vibe-knights:frame";

    /// Controller plus its frame loop, shared by every browser callback
    struct App {
        game: Game,
        frames: FrameLoop,
    }

    type Shared = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Vibe Knights starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            Tuning::default(),
            seed,
            Box::new(WebAudio::new()),
            Box::new(LocalStorageStore),
        );
        let app = Rc::new(RefCell::new(App {
            game,
            frames: FrameLoop::new(),
        }));

        // Title screen with the stored high score
        publish(&app.borrow().game.snapshot());

        setup_keyboard(app.clone());
        setup_teardown(app);
    }

    fn setup_keyboard(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(key.as_str(), " " | "ArrowUp" | "ArrowDown") {
                    event.prevent_default();
                }
                if event.repeat() && key != "ArrowDown" {
                    return;
                }

                {
                    let mut a = app.borrow_mut();
                    match key.as_str() {
                        " " => match a.game.phase() {
                            GamePhase::Start => a.game.start(),
                            GamePhase::GameOver => a.game.restart(),
                            GamePhase::Playing => a.game.jump(),
                        },
                        "ArrowUp" => a.game.jump(),
                        "ArrowDown" => a.game.duck(),
                        "m" | "M" => {
                            a.game.toggle_mute();
                            publish(&a.game.snapshot());
                        }
                        "i" | "I" => {
                            a.game.toggle_idle();
                            publish(&a.game.snapshot());
                        }
                        _ => return,
                    }
                }
                ensure_loop(&app);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "ArrowDown" {
                    app.borrow_mut().game.stop_duck();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop and release audio when the page goes away
    fn setup_teardown(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            if let Some(id) = a.frames.stop() {
                cancel_frame(id);
            }
            a.game.shutdown();
        });
        let _ = window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start the frame loop if the game wants frames and none is pending
    fn ensure_loop(app: &Shared) {
        let needs_frame = {
            let mut a = app.borrow_mut();
            let needed = a.game.is_running() && a.frames.pending().is_none();
            if needed {
                a.frames.resume();
            }
            needed
        };
        if needs_frame {
            request_animation_frame(app.clone());
        }
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let frame_app = app.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(frame_app);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => {
                if !app.borrow_mut().frames.schedule(id) {
                    cancel_frame(id);
                }
            }
            Err(_) => log::warn!("requestAnimationFrame failed"),
        }
        closure.forget();
    }

    fn game_loop(app: Shared) {
        let keep_going = {
            let mut a = app.borrow_mut();
            a.frames.fired();
            if !a.frames.is_running() {
                return;
            }
            a.game.tick();
            publish(&a.game.snapshot());

            let running = a.game.is_running();
            if !running {
                a.frames.stop();
            }
            running
        };

        if keep_going {
            request_animation_frame(app);
        }
    }

    /// Hand the frame to the renderer and refresh the HUD
    fn publish(snapshot: &Snapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&snapshot.to_json()));
        if let Ok(event) = CustomEvent::new_with_event_init_dict(FRAME_EVENT, &init) {
            let _ = document.dispatch_event(&event);
        }

        update_hud(&document, snapshot);
    }

    fn update_hud(document: &Document, snapshot: &Snapshot) {
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&snapshot.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("high-score") {
            el.set_text_content(Some(&snapshot.high_score.to_string()));
        }

        let show = |id: &str, visible: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        };
        show("start-screen", snapshot.phase == GamePhase::Start);
        show("game-over", snapshot.phase == GamePhase::GameOver);

        if snapshot.phase == GamePhase::GameOver {
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use vibe_knights::{Game, MemoryStore, NullAudio, Tuning};

    /// Hard cap so a perfect autopilot run still terminates
    const MAX_FRAMES: u64 = 100_000;

    env_logger::init();
    log::info!("Vibe Knights (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => Tuning::default(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => 42,
    };

    let mut game = Game::new(
        tuning,
        seed,
        Box::new(NullAudio),
        Box::new(MemoryStore::new()),
    );
    game.toggle_idle();
    game.start();

    while game.is_running() && game.state().frame < MAX_FRAMES {
        game.tick();
    }

    let snapshot = game.snapshot();
    log::info!(
        "Autopilot run finished: seed {} frame {} score {} speed {:.2}",
        seed,
        snapshot.frame,
        snapshot.score,
        snapshot.speed
    );
    println!("{}", snapshot.to_json());
    game.shutdown();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
