// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory renderer that records every call it receives.

use std::path::Path;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::Length;

use crate::render::{Crop, DrawCommand, Font, Pen, Point, Renderer};

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone)]
pub enum RecordedCall {
    NewPage { width: Length, height: Length },
    Draw(DrawCommand),
    Save,
}

/// Records calls in order. Drawing before the first `new_page`, or after
/// `save`, is rejected the way a real backend would reject it.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RecordedCall>,
    has_page: bool,
    saved: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<RecordedCall> {
        self.calls
    }

    /// Number of pages begun.
    pub fn page_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RecordedCall::NewPage { .. }))
            .count()
    }

    /// Draw commands only, in order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.calls.iter().filter_map(|c| match c {
            RecordedCall::Draw(command) => Some(command),
            _ => None,
        })
    }

    fn record(&mut self, command: DrawCommand) -> Result<()> {
        if !self.has_page || self.saved {
            return Err(PagewerkError::MalformedTree(
                "draw call outside an open page".into(),
            ));
        }
        self.calls.push(RecordedCall::Draw(command));
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn new_page(&mut self, width: Length, height: Length) -> Result<()> {
        self.has_page = true;
        self.calls.push(RecordedCall::NewPage { width, height });
        Ok(())
    }

    fn draw_rectangle(&mut self, x: Length, y: Length, width: Length, height: Length, pen: &Pen) -> Result<()> {
        self.record(DrawCommand::Rectangle {
            x,
            y,
            width,
            height,
            pen: pen.clone(),
        })
    }

    fn draw_ellipse(&mut self, x: Length, y: Length, width: Length, height: Length, pen: &Pen) -> Result<()> {
        self.record(DrawCommand::Ellipse {
            x,
            y,
            width,
            height,
            pen: pen.clone(),
        })
    }

    fn draw_line(&mut self, start: Point, end: Point, pen: &Pen) -> Result<()> {
        self.record(DrawCommand::Line {
            start,
            end,
            pen: pen.clone(),
        })
    }

    fn draw_polyline(&mut self, points: &[Point], pen: &Pen) -> Result<()> {
        self.record(DrawCommand::Polyline {
            points: points.to_vec(),
            pen: pen.clone(),
        })
    }

    fn draw_text(&mut self, x: Length, y: Length, font: &Font, text: &str, indent: Length) -> Result<()> {
        self.record(DrawCommand::Text {
            x,
            y,
            font: font.clone(),
            text: text.to_owned(),
            indent,
        })
    }

    fn draw_image(
        &mut self,
        path: &Path,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        crop: Option<Crop>,
    ) -> Result<()> {
        self.record(DrawCommand::Image {
            path: path.to_path_buf(),
            x,
            y,
            width,
            height,
            crop,
        })
    }

    fn save(&mut self) -> Result<()> {
        self.saved = true;
        self.calls.push(RecordedCall::Save);
        Ok(())
    }
}
