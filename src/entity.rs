use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One half of the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vel: f32,
    original_x: f32,
    original_y: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, vel: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vel,
            original_x: x,
            original_y: y,
        }
    }

    pub fn left(config: &Config) -> Self {
        let (x, y) = config.left_paddle_origin();
        Self::new(x, y, config.paddle_width, config.paddle_height, config.paddle_vel)
    }

    pub fn right(config: &Config) -> Self {
        let (x, y) = config.right_paddle_origin();
        Self::new(x, y, config.paddle_width, config.paddle_height, config.paddle_vel)
    }

    /// Shift one step vertically. Bounds are the caller's concern.
    pub fn move_toward(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.y -= self.vel,
            Direction::Down => self.y += self.vel,
        }
    }

    pub fn reset(&mut self) {
        self.x = self.original_x;
        self.y = self.original_y;
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.original_x, self.original_y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn middle_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub x_vel: f32,
    pub y_vel: f32,
    pub max_vel: f32,
    original_x: f32,
    original_y: f32,
}

impl Ball {
    /// New ball at rest vertically, heading right at full speed.
    pub fn new(x: f32, y: f32, radius: f32, max_vel: f32) -> Self {
        Self {
            x,
            y,
            radius,
            x_vel: max_vel,
            y_vel: 0.0,
            max_vel,
            original_x: x,
            original_y: y,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let (x, y) = config.ball_origin();
        Self::new(x, y, config.ball_radius, config.ball_max_vel)
    }

    pub fn advance(&mut self) {
        self.x += self.x_vel;
        self.y += self.y_vel;
    }

    /// Back to the centre with the horizontal direction flipped, so the
    /// serve heads away from the goal the ball just left.
    pub fn reset(&mut self) {
        self.x = self.original_x;
        self.y = self.original_y;
        self.y_vel = 0.0;
        self.x_vel = -self.x_vel;
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.original_x, self.original_y)
    }

    /// Side the ball is currently travelling toward.
    pub fn heading(&self) -> Side {
        if self.x_vel < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}
