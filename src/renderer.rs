use crate::config::{Color, Config};
use crate::entity::{Rect, Side};
use crate::game::Game;
use std::io;

/// Where a line of text is pinned, in field pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    /// Horizontally centred on `x`, top edge at `y`.
    TopCenter { x: f32, y: f32 },
    /// Centred on `(x, y)` both ways.
    Center { x: f32, y: f32 },
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
///
/// Coordinates are field pixels; backends scale to their surface.
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self, config: &Config) -> io::Result<()>;

    fn clear(&mut self, color: Color) -> io::Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) -> io::Result<()>;

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> io::Result<()>;

    /// Show everything drawn since the last present
    fn present(&mut self) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;
}

/// Compose one frame of the court. Does not present.
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, game: &Game) -> io::Result<()> {
    let config = game.config();
    let fg = config.foreground;

    renderer.clear(config.background)?;

    renderer.draw_text(
        &game.scores.left.to_string(),
        TextAnchor::TopCenter {
            x: config.field_width / 4.0,
            y: config.score_top,
        },
        fg,
    )?;
    renderer.draw_text(
        &game.scores.right.to_string(),
        TextAnchor::TopCenter {
            x: config.field_width * 3.0 / 4.0,
            y: config.score_top,
        },
        fg,
    )?;

    renderer.fill_rect(game.left_paddle.rect(), fg)?;
    renderer.fill_rect(game.right_paddle.rect(), fg)?;

    for dash in centre_line(config) {
        renderer.fill_rect(dash, fg)?;
    }

    renderer.fill_circle(game.ball.x, game.ball.y, game.ball.radius, fg)?;
    Ok(())
}

/// Winner banner over the middle of the field.
pub fn draw_winner<R: Renderer + ?Sized>(
    renderer: &mut R,
    config: &Config,
    winner: Side,
) -> io::Result<()> {
    renderer.draw_text(
        &Game::winner_text(winner),
        TextAnchor::Center {
            x: config.field_width / 2.0,
            y: config.field_height / 2.0,
        },
        config.foreground,
    )
}

/// Dashes of the net: 10px wide, a twentieth of the field tall, starting
/// 10px down and skipping every odd offset.
pub fn centre_line(config: &Config) -> Vec<Rect> {
    let height = config.field_height as i32;
    let step = (height / 20).max(1);
    let x = (config.field_width as i32 / 2 - 5) as f32;

    (10..height)
        .step_by(step as usize)
        .filter(|i| i % 2 == 0)
        .map(|i| Rect::new(x, i as f32, 10.0, step as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{DrawCommand, RecordingRenderer};

    #[test]
    fn test_centre_line_dashes() {
        let dashes = centre_line(&Config::default());

        assert_eq!(dashes.first(), Some(&Rect::new(345.0, 10.0, 10.0, 25.0)));
        assert_eq!(dashes[1].y, 60.0);
        assert!(dashes.iter().all(|d| d.y < 500.0));
        assert_eq!(dashes.len(), 10);
    }

    #[test]
    fn test_frame_draws_scores_paddles_net_and_ball() {
        let mut game = Game::new(Config::default());
        game.scores.left = 3;
        game.scores.right = 7;
        let mut renderer = RecordingRenderer::new();

        draw_frame(&mut renderer, &game).unwrap();

        let commands = renderer.commands();
        assert_eq!(commands[0], DrawCommand::Clear(Color::BLACK));
        assert_eq!(
            commands[1],
            DrawCommand::Text {
                text: "3".to_string(),
                anchor: TextAnchor::TopCenter { x: 175.0, y: 20.0 },
                color: Color::WHITE,
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::Text {
                text: "7".to_string(),
                anchor: TextAnchor::TopCenter { x: 525.0, y: 20.0 },
                color: Color::WHITE,
            }
        );
        assert_eq!(
            commands[3],
            DrawCommand::Rect(Rect::new(10.0, 200.0, 20.0, 100.0), Color::WHITE)
        );
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Circle {
                x: 350.0,
                y: 250.0,
                radius: 7.0,
                color: Color::WHITE,
            })
        );
        assert_eq!(renderer.presented(), 0);
    }

    #[test]
    fn test_winner_banner_is_centred() {
        let config = Config::default();
        let mut renderer = RecordingRenderer::new();

        draw_winner(&mut renderer, &config, Side::Right).unwrap();

        assert_eq!(
            renderer.commands(),
            &[DrawCommand::Text {
                text: "Right Player Won!".to_string(),
                anchor: TextAnchor::Center { x: 350.0, y: 250.0 },
                color: Color::WHITE,
            }]
        );
    }
}
