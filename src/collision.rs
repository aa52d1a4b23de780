use crate::entity::{Ball, Paddle, Side};
use log::debug;

/// Resolve wall then paddle collisions for one frame.
///
/// Only velocities change; positions are left as the integrator put them.
/// There is a single contact check per side per frame, so a fast enough
/// ball can pass through a paddle.
pub fn handle_collision(
    ball: &mut Ball,
    left_paddle: &Paddle,
    right_paddle: &Paddle,
    field_height: f32,
) {
    bounce_off_walls(ball, field_height);

    let side = ball.heading();
    let paddle = match side {
        Side::Left => left_paddle,
        Side::Right => right_paddle,
    };

    if touches(ball, paddle, side) {
        ball.x_vel = -ball.x_vel;
        ball.y_vel = deflection(ball, paddle);
        debug!("ball hit {} paddle, y_vel {:.2}", side.name(), ball.y_vel);
    }
}

fn bounce_off_walls(ball: &mut Ball, field_height: f32) {
    if ball.y + ball.radius >= field_height || ball.y - ball.radius <= 0.0 {
        ball.y_vel = -ball.y_vel;
    }
}

fn touches(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    if ball.y < paddle.y || ball.y > paddle.y + paddle.height {
        return false;
    }

    match side {
        Side::Left => ball.x - ball.radius <= paddle.x + paddle.width,
        Side::Right => ball.x + ball.radius >= paddle.x,
    }
}

/// Maps the contact offset from the paddle centre linearly onto
/// `[-max_vel, max_vel]`: top edge sends the ball up at full speed,
/// bottom edge down, centre straight.
pub fn deflection(ball: &Ball, paddle: &Paddle) -> f32 {
    let difference_in_y = paddle.middle_y() - ball.y;
    let reduction_factor = (paddle.height / 2.0) / ball.max_vel;
    -(difference_in_y / reduction_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use proptest::prelude::*;

    const HEIGHT: f32 = 500.0;

    fn paddles() -> (Paddle, Paddle) {
        let config = Config::default();
        (Paddle::left(&config), Paddle::right(&config))
    }

    /// Ball touching the left paddle's face at height `y`, heading left.
    fn ball_at_left_paddle(left: &Paddle, y: f32) -> Ball {
        let mut ball = Ball::new(350.0, 250.0, 7.0, 5.0);
        ball.x = left.x + left.width + ball.radius;
        ball.y = y;
        ball.x_vel = -5.0;
        ball
    }

    #[test]
    fn test_top_wall_flips_y_velocity_only() {
        let (left, right) = paddles();
        let mut ball = Ball::new(350.0, 7.0, 7.0, 5.0);
        ball.y_vel = -3.0;

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!(ball.y_vel, 3.0);
        assert_eq!((ball.x, ball.y), (350.0, 7.0));
        assert_eq!(ball.x_vel, 5.0);
    }

    #[test]
    fn test_bottom_wall_flips_y_velocity() {
        let (left, right) = paddles();
        let mut ball = Ball::new(350.0, 495.0, 7.0, 5.0);
        ball.y_vel = 2.0;

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!(ball.y_vel, -2.0);
        assert_eq!(ball.y, 495.0);
    }

    #[test]
    fn test_open_field_leaves_ball_alone() {
        let (left, right) = paddles();
        let mut ball = Ball::new(350.0, 250.0, 7.0, 5.0);
        ball.y_vel = 1.5;

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!((ball.x, ball.y), (350.0, 250.0));
        assert_eq!((ball.x_vel, ball.y_vel), (5.0, 1.5));
    }

    #[test]
    fn test_centre_contact_bounces_straight() {
        let (left, right) = paddles();
        let mut ball = ball_at_left_paddle(&left, left.middle_y());
        ball.y_vel = 2.0;

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!(ball.x_vel, 5.0);
        assert_eq!(ball.y_vel, 0.0);
    }

    #[test]
    fn test_edge_contacts_deflect_at_full_speed() {
        let (left, right) = paddles();

        let mut top = ball_at_left_paddle(&left, left.y);
        handle_collision(&mut top, &left, &right, HEIGHT);
        assert_eq!(top.y_vel, -5.0);

        let mut bottom = ball_at_left_paddle(&left, left.y + left.height);
        handle_collision(&mut bottom, &left, &right, HEIGHT);
        assert_eq!(bottom.y_vel, 5.0);
    }

    #[test]
    fn test_right_paddle_contact() {
        let (left, right) = paddles();
        let mut ball = Ball::new(350.0, 250.0, 7.0, 5.0);
        ball.x = right.x - ball.radius;
        ball.y = right.y + right.height / 4.0;

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!(ball.x_vel, -5.0);
        assert_eq!(ball.y_vel, -2.5);
    }

    #[test]
    fn test_only_paddle_ahead_is_checked() {
        let (left, right) = paddles();
        // Overlapping the left paddle but travelling right: no bounce.
        let mut ball = ball_at_left_paddle(&left, left.middle_y());
        ball.x_vel = 5.0;

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!(ball.x_vel, 5.0);
        assert_eq!(ball.y_vel, 0.0);
    }

    #[test]
    fn test_ball_beside_paddle_span_misses() {
        let (left, right) = paddles();
        let mut ball = ball_at_left_paddle(&left, left.y - 1.0);

        handle_collision(&mut ball, &left, &right, HEIGHT);

        assert_eq!(ball.x_vel, -5.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_bounce_keeps_x_speed_and_bounds_y_speed(
            offset in 0.0f32..=100.0,
            incoming_y_vel in -5.0f32..=5.0,
        ) {
            let (left, right) = paddles();
            let mut ball = ball_at_left_paddle(&left, left.y + offset);
            ball.y_vel = incoming_y_vel;

            handle_collision(&mut ball, &left, &right, HEIGHT);

            prop_assert_eq!(ball.x_vel.abs(), ball.max_vel);
            prop_assert!(ball.y_vel.abs() <= ball.max_vel + 1e-4);
        }
    }
}
