//! Descent Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use descent_shooter::driver::{FrameOutcome, Game};
    use descent_shooter::input::Key;
    use descent_shooter::platform::Clock;
    use descent_shooter::platform::web::{self, DomDisplay, PerformanceClock};
    use descent_shooter::sim::Action;
    use descent_shooter::StartupError;

    /// Everything the page callbacks share
    struct App {
        game: Game,
        display: DomDisplay,
        clock: PerformanceClock,
    }

    impl App {
        fn act(&mut self, action: Action) -> bool {
            let now = self.clock.now_ms();
            self.game.act(action, now, &mut self.display)
        }
    }

    pub fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Descent Shooter starting...");

        let document = web::document()?;
        let config = web::load_config(&document)?;
        let display = DomDisplay::bind(&document)?;
        let clock = PerformanceClock::new()?;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, seed),
            display,
            clock,
        }));

        // Lay out the start menu before any input arrives
        {
            let mut a = app.borrow_mut();
            let App { game, display, .. } = &mut *a;
            game.present(display);
        }

        setup_buttons(&document, app.clone())?;
        setup_keyboard(app.clone())?;
        setup_auto_pause(&document, app)?;

        log::info!("Descent Shooter ready");
        Ok(())
    }

    /// Apply an action and start the frame chain if it asks for one
    fn dispatch(app: &Rc<RefCell<App>>, action: Action) {
        let schedule = app.borrow_mut().act(action);
        show_notices(app);
        if schedule {
            request_animation_frame(app.clone());
        }
    }

    /// Alerts block and can run other handlers, so the borrow must be gone
    fn show_notices(app: &Rc<RefCell<App>>) {
        let notices = app.borrow_mut().game.take_notices();
        for notice in notices {
            web::alert(&notice);
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), StartupError> {
        let buttons = [
            ("start-button", Action::Start),
            ("resume-button", Action::Resume),
            ("restart-button", Action::Restart),
            ("exit-button", Action::Exit),
        ];
        for (id, action) in buttons {
            let btn = web::element(document, id)?;
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                dispatch(&app, action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), StartupError> {
        let window = web::window()?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom_key(&event.key()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                let schedule = {
                    let mut a = app.borrow_mut();
                    let now = a.clock.now_ms();
                    let App { game, display, .. } = &mut *a;
                    game.key_down(key, now, display)
                };
                show_notices(&app);
                if schedule {
                    request_animation_frame(app.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    app.borrow_mut().game.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(document: &Document, app: Rc<RefCell<App>>) -> Result<(), StartupError> {
        let window = web::window()?;

        fn lose_focus(app: &Rc<RefCell<App>>, reason: &str) {
            let mut a = app.borrow_mut();
            let now = a.clock.now_ms();
            let App { game, display, .. } = &mut *a;
            if game.phase() == descent_shooter::sim::GamePhase::Running {
                log::info!("Auto-paused ({})", reason);
            }
            game.focus_lost(now, display);
        }

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    lose_focus(&app, "tab hidden");
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
                lose_focus(&app, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule frames on");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let outcome = {
            let mut a = app.borrow_mut();
            let App { game, display, .. } = &mut *a;
            game.frame(time, display)
        };
        show_notices(&app);

        if outcome == FrameOutcome::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|e| {
        log::error!("Startup failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Descent Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let config = match std::env::args().nth(1) {
        Some(path) => match descent_shooter::GameConfig::from_path(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => descent_shooter::GameConfig::default(),
    };

    let board = demo::run(config);
    println!(
        "time {}s  score {}  lives {}  fps {}",
        board.time, board.score, board.lives, board.fps
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use descent_shooter::hud::Scoreboard;
    use descent_shooter::input::Key;
    use descent_shooter::platform::headless::HeadlessRunner;
    use descent_shooter::sim::{Action, GamePhase};
    use descent_shooter::{Game, GameConfig};

    /// Longest demo session (ms of simulated wall-clock time)
    const DEMO_LIMIT_MS: f64 = 120_000.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Scripted session: sweep left and right along the bottom, firing twice
    /// a second, until the game ends or the time limit passes
    pub fn run(config: GameConfig) -> Scoreboard {
        let seed = config.seed.unwrap_or(0x5eed);
        let mut game = Game::new(config, seed);
        let mut runner = HeadlessRunner::new(FRAME_MS);

        runner.act(&mut game, Action::Start);
        runner.key_down(&mut game, Key::Down);

        let mut elapsed = 0.0;
        let mut heading = Key::Right;
        while elapsed < DEMO_LIMIT_MS && game.phase() == GamePhase::Running {
            if (elapsed as u64 / 2000) % 2 == 0 {
                if heading != Key::Right {
                    runner.key_up(&mut game, heading);
                    heading = Key::Right;
                }
            } else if heading != Key::Left {
                runner.key_up(&mut game, heading);
                heading = Key::Left;
            }
            runner.key_down(&mut game, heading);

            runner.key_down(&mut game, Key::Shoot);
            runner.run_for(&mut game, 250.0);
            runner.key_up(&mut game, Key::Shoot);
            runner.run_for(&mut game, 250.0);
            elapsed += 500.0;
        }

        log::info!(
            "Demo finished after {} frames in {:?}",
            runner.frames_run(),
            game.phase()
        );
        game.scoreboard()
    }
}
