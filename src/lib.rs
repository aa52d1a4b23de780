pub mod clock;
pub mod collision;
pub mod config;
pub mod entity;
pub mod game;
pub mod headless;
pub mod input;
pub mod renderer;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_input;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_renderer;
#[cfg(target_arch = "wasm32")]
mod web_main;

pub use clock::{Clock, FrameClock, StepPacer};
pub use config::{Color, Config, Params};
pub use entity::{Ball, Direction, Paddle, Rect, Side};
pub use game::{run, Game, GameState, Outcome, Scores};
pub use input::{InputFrame, InputSource, Key, KeyState};
pub use renderer::{Renderer, TextAnchor};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_input::CliInput;
#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;

#[cfg(target_arch = "wasm32")]
pub use web_renderer::{WebInput, WebRenderer};
