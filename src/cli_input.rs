use crate::input::{HeldKeys, InputFrame, InputSource, Key};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};
use log::{info, warn};
use std::io;
use std::time::{Duration, Instant};

/// How long a fresh press counts as held when the terminal cannot report
/// releases. Covers the keyboard's delay before auto-repeat kicks in.
const REPEAT_DELAY: Duration = Duration::from_millis(500);

/// How long a key counts as held after its last auto-repeat.
const HOLD_WINDOW: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Key(Key),
    Quit,
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Key(Key::LeftUp)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Key(Key::LeftDown)),
        KeyCode::Up => Some(Action::Key(Key::RightUp)),
        KeyCode::Down => Some(Action::Key(Key::RightDown)),
        _ => None,
    }
}

/// Keyboard input from the terminal.
pub struct CliInput {
    held: HeldKeys,
    enhanced: bool,
}

impl CliInput {
    pub fn new() -> Self {
        Self {
            held: HeldKeys::new(REPEAT_DELAY, HOLD_WINDOW),
            enhanced: false,
        }
    }

    /// Ask the terminal for key release events. Call after raw mode is on.
    pub fn init(&mut self) -> io::Result<()> {
        if terminal::supports_keyboard_enhancement()? {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced = true;
            self.held.set_reports_release(true);
            info!("terminal reports key releases");
        } else {
            warn!(
                "terminal does not report key releases, holding keys for {:?} after a press and {:?} after a repeat",
                REPEAT_DELAY, HOLD_WINDOW
            );
        }
        Ok(())
    }

    /// Apply one terminal event. Returns true on quit.
    fn apply(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => match (map_key(code, modifiers), kind) {
                (Some(Action::Quit), KeyEventKind::Press) => return true,
                (Some(Action::Key(key)), KeyEventKind::Release) => self.held.release(key),
                (Some(Action::Key(key)), _) => self.held.press(key, now),
                _ => {}
            },
            Event::FocusLost => self.held.clear(),
            _ => {}
        }
        false
    }
}

impl Default for CliInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for CliInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            quit |= self.apply(event, Instant::now());
        }

        Ok(InputFrame {
            keys: self.held.snapshot(Instant::now()),
            quit,
        })
    }
}

impl Drop for CliInput {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}
