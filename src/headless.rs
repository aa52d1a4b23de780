//! Display-less collaborators for driving the game loop in tests.

use crate::clock::Clock;
use crate::config::{Color, Config};
use crate::entity::Rect;
use crate::input::{InputFrame, InputSource};
use crate::renderer::{Renderer, TextAnchor};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect(Rect, Color),
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        anchor: TextAnchor,
        color: Color,
    },
}

/// Keeps the commands of the frame being drawn; `present` starts a new one.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    presented: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the last present.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Text drawn in the last presented frame.
    pub fn texts(&self) -> Vec<String> {
        self.last_frame
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn init(&mut self, _config: &Config) -> io::Result<()> {
        Ok(())
    }

    fn clear(&mut self, color: Color) -> io::Result<()> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.commands.push(DrawCommand::Rect(rect, color));
        Ok(())
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) -> io::Result<()> {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> io::Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.last_frame = std::mem::take(&mut self.commands);
        self.presented += 1;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replays a fixed list of frames, then reports quit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        Ok(self.frames.pop_front().unwrap_or(InputFrame {
            quit: true,
            ..InputFrame::default()
        }))
    }
}

/// Counts ticks and records delays without sleeping.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: usize,
    delays: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

impl Clock for ManualClock {
    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}
