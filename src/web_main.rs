use crate::clock::StepPacer;
use crate::config::Config;
use crate::game::{Game, Outcome};
use crate::input::InputSource;
use crate::renderer::{draw_frame, draw_winner, Renderer};
use crate::web_renderer::{WebInput, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn to_js(error: std::io::Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
    input: WebInput,
    pacer: StepPacer,
    // The win pause cannot block the browser's event loop; stepping is
    // suspended until this timestamp instead.
    paused_until: Option<f64>,
}

impl GameLoop {
    fn new() -> Result<Self, JsValue> {
        let config = Config::default();
        let mut renderer = WebRenderer::new("gameCanvas")?;
        renderer.init(&config).map_err(to_js)?;

        let window = web_sys::window().ok_or("no window")?;
        let input = WebInput::new();
        input.attach(&window)?;

        let performance = window.performance().ok_or("no performance")?;
        let pacer = StepPacer::new(config.frame_time(), performance.now());

        Ok(Self {
            game: Game::new(config),
            renderer,
            input,
            pacer,
            paused_until: None,
        })
    }

    fn update_frame(&mut self, current_time: f64) -> Result<(), JsValue> {
        if let Some(until) = self.paused_until {
            if current_time < until {
                return Ok(());
            }
            self.paused_until = None;
            self.game.restart();
            self.pacer.restart(current_time);
        }

        // Step game logic at the configured frame rate
        if !self.pacer.due(current_time) {
            return Ok(());
        }

        let frame = self.input.poll().map_err(to_js)?;
        let outcome = self.game.update(&frame.keys);

        draw_frame(&mut self.renderer, &self.game).map_err(to_js)?;

        if let Outcome::Won(winner) = outcome {
            draw_winner(&mut self.renderer, self.game.config(), winner).map_err(to_js)?;
            let pause_ms = self.game.config().win_pause.as_secs_f64() * 1000.0;
            self.paused_until = Some(current_time + pause_ms);
            web_sys::console::log_1(&Game::winner_text(winner).into());
        }

        self.renderer.present().map_err(to_js)
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting Pong...".into());

    let game_loop = match GameLoop::new() {
        Ok(gl) => Rc::new(RefCell::new(gl)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game loop: {:?}", e).into());
            return Err(e);
        }
    };

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    // Create closure for animation frame
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let current_time = performance.now();

        if let Err(e) = game_loop.borrow_mut().update_frame(current_time) {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        // Schedule next frame
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = request_frame(callback) {
                web_sys::console::error_1(&e);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = g.borrow().as_ref() {
        request_frame(callback)?;
    }

    web_sys::console::log_1(&"[WASM] Game loop started".into());

    Ok(())
}
