#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use pong::{CliInput, CliRenderer, Config, FrameClock, Game, Renderer};

    // Logs go to stderr; redirect it (`2>pong.log`) to keep the court clean.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::default();
    let mut clock = FrameClock::new(config.frame_time());
    let mut renderer = CliRenderer::new();
    let mut input = CliInput::new();

    renderer.init(&config)?;
    input.init()?;

    let mut game = Game::new(config);
    let result = pong::run(&mut game, &mut renderer, &mut input, &mut clock);

    // Restore the terminal before reporting any loop error.
    drop(input);
    renderer.cleanup()?;
    result
}

// The browser build starts from `start_game` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
