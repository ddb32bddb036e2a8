// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator contracts: the rendering surface and the font/metrics provider.
//
// The layout engine never draws or measures anything itself. It talks to a
// `Renderer` with fully resolved absolute coordinates (origin top-left) and
// asks a `MetricsProvider` for font metrics and native image sizes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::{Length, Quantity, pt, require_length};
use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Stroke and fill settings for shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    /// Stroke width.
    pub width: Length,
    /// Stroke colour; `None` draws no outline.
    pub color: Option<Rgb>,
    /// Fill colour; `None` leaves the shape unfilled.
    pub fill: Option<Rgb>,
    pub round_cap: bool,
    pub round_join: bool,
}

impl Pen {
    /// A black pen of the given stroke width.
    pub fn new(width: impl Into<Quantity>) -> Result<Self> {
        Ok(Self {
            width: require_length(width, "pen width")?,
            ..Self::default()
        })
    }

    pub fn with_color(mut self, color: Option<Rgb>) -> Self {
        self.color = color;
        self
    }

    pub fn with_fill(mut self, fill: Option<Rgb>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_round_cap(mut self, round_cap: bool) -> Self {
        self.round_cap = round_cap;
        self
    }

    pub fn with_round_join(mut self, round_join: bool) -> Self {
        self.round_join = round_join;
        self
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            width: pt(0.5),
            color: Some(Rgb::BLACK),
            fill: None,
            round_cap: true,
            round_join: false,
        }
    }
}

/// Source rectangle of an image, as fractions of its pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Crop {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        let inside = |start: f64, extent: f64| {
            (0.0..=1.0).contains(&start) && extent > 0.0 && start + extent <= 1.0
        };
        if inside(x, width) && inside(y, height) {
            Ok(Self {
                x,
                y,
                width,
                height,
            })
        } else {
            Err(PagewerkError::ImageError(format!(
                "crop ({x}, {y}, {width}, {height}) lies outside the image"
            )))
        }
    }
}

/// Metrics of one font at one point size.
pub trait FontMetrics: fmt::Debug + Send + Sync {
    /// Face name the renderer uses to select the font.
    fn face(&self) -> &str;

    /// Size in points.
    fn point_size(&self) -> f64;

    fn ascent(&self) -> Length;

    fn descent(&self) -> Length;

    /// Height of one line (ascent + descent).
    fn height(&self) -> Length;

    /// Extra space between consecutive lines.
    fn leading(&self) -> Length;

    /// Advance width of `text`.
    fn width_of(&self, text: &str) -> Length;
}

/// Shared handle to a measured font.
pub type Font = Arc<dyn FontMetrics>;

/// The font/metrics collaborator.
pub trait MetricsProvider {
    /// Metrics for `face` at `point_size`.
    fn font(&self, face: &str, point_size: f64) -> Result<Font>;

    /// Native pixel dimensions (width, height) of an image file.
    fn peek_image(&self, path: &Path) -> Result<(u32, u32)>;
}

/// An absolute position on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }
}

/// One fully resolved draw call. Produced by the tree walker, consumed by
/// [`Renderer::execute`].
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Rectangle {
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        pen: Pen,
    },
    Ellipse {
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        pen: Pen,
    },
    Line {
        start: Point,
        end: Point,
        pen: Pen,
    },
    Polyline {
        points: Vec<Point>,
        pen: Pen,
    },
    /// `y` is the top of the text line; the baseline lies `font.ascent()`
    /// below it. `indent` shifts the run to the right of `x`.
    Text {
        x: Length,
        y: Length,
        font: Font,
        text: String,
        indent: Length,
    },
    Image {
        path: PathBuf,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        crop: Option<Crop>,
    },
}

/// The rendering collaborator.
///
/// `new_page` begins output on the first call and advances to a fresh page
/// on later calls; every draw call addresses the most recent page.
pub trait Renderer {
    fn new_page(&mut self, width: Length, height: Length) -> Result<()>;

    fn draw_rectangle(
        &mut self,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        pen: &Pen,
    ) -> Result<()>;

    fn draw_ellipse(
        &mut self,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        pen: &Pen,
    ) -> Result<()>;

    fn draw_line(&mut self, start: Point, end: Point, pen: &Pen) -> Result<()>;

    fn draw_polyline(&mut self, points: &[Point], pen: &Pen) -> Result<()>;

    fn draw_text(
        &mut self,
        x: Length,
        y: Length,
        font: &Font,
        text: &str,
        indent: Length,
    ) -> Result<()>;

    fn draw_image(
        &mut self,
        path: &Path,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        crop: Option<Crop>,
    ) -> Result<()>;

    /// Finalise output.
    fn save(&mut self) -> Result<()>;

    /// Dispatch a resolved command to the matching draw operation.
    fn execute(&mut self, command: &DrawCommand) -> Result<()> {
        match command {
            DrawCommand::Rectangle {
                x,
                y,
                width,
                height,
                pen,
            } => self.draw_rectangle(*x, *y, *width, *height, pen),
            DrawCommand::Ellipse {
                x,
                y,
                width,
                height,
                pen,
            } => self.draw_ellipse(*x, *y, *width, *height, pen),
            DrawCommand::Line { start, end, pen } => self.draw_line(*start, *end, pen),
            DrawCommand::Polyline { points, pen } => self.draw_polyline(points, pen),
            DrawCommand::Text {
                x,
                y,
                font,
                text,
                indent,
            } => self.draw_text(*x, *y, font, text, *indent),
            DrawCommand::Image {
                path,
                x,
                y,
                width,
                height,
                crop,
            } => self.draw_image(path, *x, *y, *width, *height, *crop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_width_must_be_a_length() {
        assert_eq!(Pen::new(pt(2.0)).unwrap().width, pt(2.0));
        assert!(matches!(
            Pen::new(2.0).unwrap_err(),
            PagewerkError::Dimension { .. }
        ));
    }

    #[test]
    fn default_pen_strokes_black_without_fill() {
        let pen = Pen::default();
        assert_eq!(pen.color, Some(Rgb::BLACK));
        assert_eq!(pen.fill, None);
        assert!(pen.round_cap);
        assert!(!pen.round_join);
    }

    #[test]
    fn crop_must_stay_inside_image() {
        assert!(Crop::new(0.0, 0.0, 1.0, 1.0).is_ok());
        assert!(Crop::new(0.25, 0.5, 0.5, 0.5).is_ok());
        assert!(Crop::new(0.5, 0.0, 0.6, 1.0).is_err());
        assert!(Crop::new(0.0, 0.0, 0.0, 1.0).is_err());
    }
}
