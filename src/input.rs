use crate::entity::{Direction, Paddle};
use std::io;
use std::time::{Duration, Instant};

/// The four logical keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::LeftUp, Key::LeftDown, Key::RightUp, Key::RightDown];
}

/// Held state of the logical keys for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl KeyState {
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::LeftUp => self.left_up = held,
            Key::LeftDown => self.left_down = held,
            Key::RightUp => self.right_up = held,
            Key::RightDown => self.right_down = held,
        }
    }

    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }
}

/// Everything the game loop reads from the player each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub keys: KeyState,
    pub quit: bool,
}

/// Trait that abstracts where key state comes from (terminal, browser, script).
pub trait InputSource {
    /// Drain pending events and report the current key state.
    fn poll(&mut self) -> io::Result<InputFrame>;
}

/// Move each paddle for the held keys, refusing any step that would
/// leave `[0, field_height]`.
pub fn handle_paddle_movement(
    keys: &KeyState,
    left_paddle: &mut Paddle,
    right_paddle: &mut Paddle,
    field_height: f32,
) {
    steer(left_paddle, keys.left_up, keys.left_down, field_height);
    steer(right_paddle, keys.right_up, keys.right_down, field_height);
}

fn steer(paddle: &mut Paddle, up: bool, down: bool, field_height: f32) {
    if up && paddle.y - paddle.vel >= 0.0 {
        paddle.move_toward(Direction::Up);
    }
    if down && paddle.y + paddle.vel + paddle.height <= field_height {
        paddle.move_toward(Direction::Down);
    }
}

/// Held-key bookkeeping for event-based backends.
///
/// With release reporting a key is held from press to release. Without
/// it (most terminals) only press and auto-repeat events arrive. A fresh
/// press then counts as held for `repeat_delay`, long enough to bridge the
/// pause before the keyboard starts repeating; once repeats are flowing
/// the key is held for `hold_window` after the last one seen.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    holds: [Option<Hold>; 4],
    repeat_delay: Duration,
    hold_window: Duration,
    reports_release: bool,
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    last_seen: Instant,
    repeating: bool,
}

impl HeldKeys {
    pub fn new(repeat_delay: Duration, hold_window: Duration) -> Self {
        Self {
            holds: [None; 4],
            repeat_delay,
            hold_window,
            reports_release: false,
        }
    }

    pub fn set_reports_release(&mut self, reports_release: bool) {
        self.reports_release = reports_release;
    }

    /// Record a press or auto-repeat. An event for a key that is still
    /// held counts as a repeat.
    pub fn press(&mut self, key: Key, now: Instant) {
        let slot = Self::slot(key);
        let repeating = self.holds[slot].map_or(false, |hold| self.lasts(hold, now));
        self.holds[slot] = Some(Hold {
            last_seen: now,
            repeating,
        });
    }

    pub fn release(&mut self, key: Key) {
        self.holds[Self::slot(key)] = None;
    }

    pub fn clear(&mut self) {
        self.holds = [None; 4];
    }

    pub fn snapshot(&self, now: Instant) -> KeyState {
        let mut state = KeyState::default();
        for key in Key::ALL {
            let held = match self.holds[Self::slot(key)] {
                Some(_) if self.reports_release => true,
                Some(hold) => self.lasts(hold, now),
                None => false,
            };
            state.set(key, held);
        }
        state
    }

    fn lasts(&self, hold: Hold, now: Instant) -> bool {
        let window = if hold.repeating {
            self.hold_window
        } else {
            self.repeat_delay
        };
        now.saturating_duration_since(hold.last_seen) <= window
    }

    fn slot(key: Key) -> usize {
        match key {
            Key::LeftUp => 0,
            Key::LeftDown => 1,
            Key::RightUp => 2,
            Key::RightDown => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use proptest::prelude::*;

    fn paddles(config: &Config) -> (Paddle, Paddle) {
        (Paddle::left(config), Paddle::right(config))
    }

    #[test]
    fn test_both_paddles_move_independently() {
        let config = Config::default();
        let (mut left, mut right) = paddles(&config);
        let keys = KeyState::default().with(Key::LeftUp).with(Key::RightDown);

        handle_paddle_movement(&keys, &mut left, &mut right, config.field_height);

        assert_eq!(left.y, 196.0);
        assert_eq!(right.y, 204.0);
    }

    #[test]
    fn test_up_and_down_together_cancel() {
        let config = Config::default();
        let (mut left, mut right) = paddles(&config);
        let keys = KeyState::default().with(Key::LeftUp).with(Key::LeftDown);

        handle_paddle_movement(&keys, &mut left, &mut right, config.field_height);

        assert_eq!(left.y, 200.0);
    }

    #[test]
    fn test_paddle_stops_at_top() {
        let config = Config::default();
        let (mut left, mut right) = paddles(&config);
        left.y = 3.0;
        let keys = KeyState::default().with(Key::LeftUp);

        handle_paddle_movement(&keys, &mut left, &mut right, config.field_height);

        assert_eq!(left.y, 3.0);
    }

    #[test]
    fn test_paddle_stops_at_bottom() {
        let config = Config::default();
        let (mut left, mut right) = paddles(&config);
        right.y = 400.0;
        let keys = KeyState::default().with(Key::RightDown);

        handle_paddle_movement(&keys, &mut left, &mut right, config.field_height);

        assert_eq!(right.y, 400.0);
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_first_press_held_until_repeats_start() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(500), ms(120));
        held.press(Key::LeftUp, start);

        // Keyboards wait a few hundred ms before auto-repeating.
        assert!(held.snapshot(start + ms(300)).left_up);
        assert!(held.snapshot(start + ms(500)).left_up);
        assert!(!held.snapshot(start + ms(600)).left_up);
    }

    #[test]
    fn test_repeating_key_released_after_short_window() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(500), ms(120));
        held.press(Key::RightUp, start);
        held.press(Key::RightUp, start + ms(400));
        held.press(Key::RightUp, start + ms(433));

        assert!(held.snapshot(start + ms(553)).right_up);
        assert!(!held.snapshot(start + ms(580)).right_up);

        // After it lapses the next event is a fresh press again.
        held.press(Key::RightUp, start + ms(1000));
        assert!(held.snapshot(start + ms(1300)).right_up);
    }

    #[test]
    fn test_held_keys_with_release_last_until_released() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(500), ms(120));
        held.set_reports_release(true);
        held.press(Key::LeftDown, start);

        let later = start + Duration::from_secs(5);
        assert!(held.snapshot(later).left_down);

        held.release(Key::LeftDown);
        assert!(!held.snapshot(later).left_down);
    }

    fn key_state_strategy() -> impl Strategy<Value = KeyState> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left_up, left_down, right_up, right_down)| KeyState {
                left_up,
                left_down,
                right_up,
                right_down,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_field(
            frames in prop::collection::vec(key_state_strategy(), 1..400)
        ) {
            let config = Config::default();
            let (mut left, mut right) = paddles(&config);
            let max_y = config.field_height - config.paddle_height;

            for keys in frames {
                handle_paddle_movement(&keys, &mut left, &mut right, config.field_height);

                for paddle in [&left, &right] {
                    prop_assert!(
                        paddle.y >= 0.0 && paddle.y <= max_y,
                        "paddle y {} outside [0, {}]",
                        paddle.y,
                        max_y
                    );
                }
            }
        }
    }
}
