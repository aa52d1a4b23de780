use std::time::Duration;

/// RGB colour handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#FFFFFF`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field (pixels)
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 10.0; // gap between paddle and side edge
    pub const PADDLE_VEL: f32 = 4.0; // pixels per frame

    // Ball
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_MAX_VEL: f32 = 5.0; // pixels per frame

    // Score
    pub const WINNING_SCORE: u32 = 10;

    // Timing
    pub const FPS: u32 = 60;
    pub const WIN_PAUSE: Duration = Duration::from_millis(5000);

    // Presentation
    pub const FONT_SIZE: f32 = 50.0;
    pub const SCORE_TOP: f32 = 20.0;
    pub const CAPTION: &'static str = "Pong";
}

/// Immutable game configuration, injected into the game and the backends.
#[derive(Debug, Clone)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_vel: f32,
    pub ball_radius: f32,
    pub ball_max_vel: f32,
    pub winning_score: u32,
    pub fps: u32,
    pub win_pause: Duration,
    pub font_size: f32,
    pub score_top: f32,
    pub caption: String,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_vel: Params::PADDLE_VEL,
            ball_radius: Params::BALL_RADIUS,
            ball_max_vel: Params::BALL_MAX_VEL,
            winning_score: Params::WINNING_SCORE,
            fps: Params::FPS,
            win_pause: Params::WIN_PAUSE,
            font_size: Params::FONT_SIZE,
            score_top: Params::SCORE_TOP,
            caption: Params::CAPTION.to_string(),
            foreground: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-left corner of the left paddle at game start.
    pub fn left_paddle_origin(&self) -> (f32, f32) {
        (self.paddle_margin, self.paddle_start_y())
    }

    /// Top-left corner of the right paddle at game start.
    pub fn right_paddle_origin(&self) -> (f32, f32) {
        (
            self.field_width - self.paddle_margin - self.paddle_width,
            self.paddle_start_y(),
        )
    }

    /// Ball serves from the centre of the field.
    pub fn ball_origin(&self) -> (f32, f32) {
        (
            (self.field_width / 2.0).floor(),
            (self.field_height / 2.0).floor(),
        )
    }

    /// Duration of one frame at the target rate.
    pub fn frame_time(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }

    fn paddle_start_y(&self) -> f32 {
        (self.field_height / 2.0).floor() - (self.paddle_height / 2.0).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_origins() {
        let config = Config::new();
        assert_eq!(config.left_paddle_origin(), (10.0, 200.0));
        assert_eq!(config.right_paddle_origin(), (670.0, 200.0));
    }

    #[test]
    fn test_ball_origin_is_field_centre() {
        let config = Config::new();
        assert_eq!(config.ball_origin(), (350.0, 250.0));
    }

    #[test]
    fn test_frame_time() {
        let config = Config {
            fps: 50,
            ..Config::default()
        };
        assert_eq!(config.frame_time(), Duration::from_millis(20));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::WHITE.to_hex(), "#FFFFFF");
        assert_eq!(Color::rgb(0x12, 0xAB, 0x00).to_hex(), "#12AB00");
    }
}
