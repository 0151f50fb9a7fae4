//! Headless drawing surface that records commands instead of painting.
//!
//! Text is measured with a fixed advance per character so layout decisions
//! are deterministic. Hosts can serialise the command list for snapshots.

use serde::Serialize;

use super::backend::{DrawContext, DrawSurface};

/// Default advance per character, in CSS pixels.
pub const DEFAULT_CHAR_WIDTH: f64 = 7.0;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    SetTransform {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    ClearRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
        line_width: f64,
    },
    Save,
    Restore,
    ClipRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    SetFont {
        font: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: String,
    },
}

/// Surface that keeps every call in memory.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    physical: (u32, u32),
    css: (f64, f64),
    char_width: f64,
    font: String,
    commands: Vec<DrawCommand>,
    measure_calls: usize,
}

impl RecordingSurface {
    pub fn new(physical_w: u32, physical_h: u32) -> Self {
        Self {
            physical: (physical_w, physical_h),
            css: (f64::from(physical_w), f64::from(physical_h)),
            char_width: DEFAULT_CHAR_WIDTH,
            font: String::new(),
            commands: Vec::new(),
            measure_calls: 0,
        }
    }

    /// Use a different per-character advance.
    #[must_use]
    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, keeping counters.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    pub fn reset_measure_calls(&mut self) {
        self.measure_calls = 0;
    }

    pub fn css_size(&self) -> (f64, f64) {
        self.css
    }

    /// Font most recently set on the surface.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Text of every `FillText` call, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of `FillText` calls.
    pub fn text_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillText { .. }))
            .count()
    }
}

impl DrawContext for RecordingSurface {
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.commands
            .push(DrawCommand::SetTransform { a, b, c, d, e, f });
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
            line_width,
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClipRect { x, y, w, h });
    }

    fn set_font(&mut self, font: &str) {
        if self.font != font {
            self.font = font.to_string();
        }
        self.commands.push(DrawCommand::SetFont {
            font: font.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            color: color.to_string(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str) -> f64 {
        self.measure_calls += 1;
        text.chars().count() as f64 * self.char_width
    }
}

impl DrawSurface for RecordingSurface {
    fn backing_size(&self) -> (u32, u32) {
        self.physical
    }

    fn set_backing_size(&mut self, physical_w: u32, physical_h: u32, css_w: f64, css_h: f64) {
        self.physical = (physical_w, physical_h);
        self.css = (css_w, css_h);
    }
}
