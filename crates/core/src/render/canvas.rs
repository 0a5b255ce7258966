use serde::{Deserialize, Serialize};

use crate::models::chart::ScreenPoint;
use crate::models::settings::Rgb;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// One primitive drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillRect {
        origin: ScreenPoint,
        width: i32,
        height: i32,
        color: Rgb,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Rgb,
    },
    Text {
        at: ScreenPoint,
        text: String,
        anchor: Anchor,
        color: Rgb,
    },
}

/// Drawing surface. Coordinates are pixels from the top-left corner.
pub trait Canvas {
    fn fill_rect(&mut self, origin: ScreenPoint, width: i32, height: i32, color: Rgb);

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb);

    /// `at.y` is the text baseline.
    fn text(&mut self, at: ScreenPoint, text: &str, anchor: Anchor, color: Rgb);
}

/// A canvas that keeps every command it receives, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Text of every `Text` command, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, origin: ScreenPoint, width: i32, height: i32, color: Rgb) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            width,
            height,
            color,
        });
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, at: ScreenPoint, text: &str, anchor: Anchor, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            anchor,
            color,
        });
    }
}
