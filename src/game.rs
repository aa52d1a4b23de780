use crate::clock::Clock;
use crate::collision::handle_collision;
use crate::config::Config;
use crate::entity::{Ball, Paddle, Side};
use crate::input::{handle_paddle_movement, InputSource, KeyState};
use crate::renderer::{draw_frame, draw_winner, Renderer};
use log::{debug, info};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won(Side),
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ball still in play (or the game is frozen on a win).
    Rally,
    /// Ball left the field; `Side` scored and the ball was re-served.
    Point(Side),
    /// `Side` reached the winning score this step.
    Won(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores {
    pub left: u32,
    pub right: u32,
}

impl Scores {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

/// All mutable game state, owned by the loop and passed by reference.
pub struct Game {
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub scores: Scores,
    pub state: GameState,
    config: Config,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self {
            left_paddle: Paddle::left(&config),
            right_paddle: Paddle::right(&config),
            ball: Ball::from_config(&config),
            scores: Scores::default(),
            state: GameState::Playing,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn winner_text(side: Side) -> String {
        format!("{} Player Won!", side.name())
    }

    /// Advance one frame: move paddles, move the ball, collide, score,
    /// check for a winner. A won game stays frozen until `restart`.
    pub fn update(&mut self, keys: &KeyState) -> Outcome {
        if self.state != GameState::Playing {
            return Outcome::Rally;
        }

        let field_height = self.config.field_height;

        handle_paddle_movement(
            keys,
            &mut self.left_paddle,
            &mut self.right_paddle,
            field_height,
        );

        self.ball.advance();
        handle_collision(
            &mut self.ball,
            &self.left_paddle,
            &self.right_paddle,
            field_height,
        );

        let scorer = self.check_out_of_bounds();

        if let Some(winner) = self.check_winner() {
            info!(
                "{} ({}-{})",
                Self::winner_text(winner),
                self.scores.left,
                self.scores.right
            );
            self.state = GameState::Won(winner);
            return Outcome::Won(winner);
        }

        match scorer {
            Some(side) => Outcome::Point(side),
            None => Outcome::Rally,
        }
    }

    /// Fresh game after a win: scores cleared, entities back home.
    pub fn restart(&mut self) {
        self.ball.reset();
        self.left_paddle.reset();
        self.right_paddle.reset();
        self.scores = Scores::default();
        self.state = GameState::Playing;
        info!("new game");
    }

    fn check_out_of_bounds(&mut self) -> Option<Side> {
        let exited = if self.ball.x < 0.0 {
            Side::Left
        } else if self.ball.x > self.config.field_width {
            Side::Right
        } else {
            return None;
        };

        let scorer = exited.opposite();
        self.scores.award(scorer);
        self.ball.reset();
        debug!(
            "{} scores ({}-{})",
            scorer.name(),
            self.scores.left,
            self.scores.right
        );
        Some(scorer)
    }

    fn check_winner(&self) -> Option<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| self.scores.get(side) >= self.config.winning_score)
    }
}

/// Drive the game until the input source asks to quit.
///
/// Each frame: tick, poll, step, draw, present. A win draws the banner
/// over the winning frame (final score, ball already back at the centre)
/// and blocks for the win pause before restarting.
pub fn run<R, I, C>(game: &mut Game, renderer: &mut R, input: &mut I, clock: &mut C) -> io::Result<()>
where
    R: Renderer + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    info!(
        "starting {}x{} game, first to {}",
        game.config.field_width, game.config.field_height, game.config.winning_score
    );

    loop {
        clock.tick();

        let frame = input.poll()?;
        if frame.quit {
            info!("quit requested");
            break;
        }

        let outcome = game.update(&frame.keys);

        draw_frame(renderer, game)?;

        if let Outcome::Won(winner) = outcome {
            draw_winner(renderer, &game.config, winner)?;
            renderer.present()?;
            clock.delay(game.config.win_pause);
            game.restart();
            continue;
        }

        renderer.present()?;
    }

    Ok(())
}
