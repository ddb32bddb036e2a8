// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test helpers: a font whose every character has the same advance, and a
// metrics provider serving it.

use std::path::Path;
use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::{Length, pt};

use crate::render::{Font, FontMetrics, MetricsProvider};

/// Every character (space included) advances `advance`; a line is
/// `ascent + descent` tall.
#[derive(Debug, Clone)]
pub struct FixedFont {
    pub advance: Length,
    pub ascent: Length,
    pub descent: Length,
    pub leading: Length,
}

impl FixedFont {
    /// One point per character, lines ten points tall, no leading.
    pub fn unit() -> Self {
        Self {
            advance: pt(1.0),
            ascent: pt(8.0),
            descent: pt(2.0),
            leading: Length::ZERO,
        }
    }

    pub fn shared(self) -> Font {
        Arc::new(self)
    }
}

impl FontMetrics for FixedFont {
    fn face(&self) -> &str {
        "Fixed"
    }

    fn point_size(&self) -> f64 {
        (self.ascent + self.descent).as_pt()
    }

    fn ascent(&self) -> Length {
        self.ascent
    }

    fn descent(&self) -> Length {
        self.descent
    }

    fn height(&self) -> Length {
        self.ascent + self.descent
    }

    fn leading(&self) -> Length {
        self.leading
    }

    fn width_of(&self, text: &str) -> Length {
        self.advance * text.chars().count() as f64
    }
}

/// Serves [`FixedFont::unit`] for the face `"Fixed"` and reports every
/// image as 600×300 pixels.
#[derive(Debug, Default)]
pub struct FixedMetrics;

impl MetricsProvider for FixedMetrics {
    fn font(&self, face: &str, _point_size: f64) -> Result<Font> {
        if face == "Fixed" {
            Ok(FixedFont::unit().shared())
        } else {
            Err(PagewerkError::UnknownFont(face.to_owned()))
        }
    }

    fn peek_image(&self, _path: &Path) -> Result<(u32, u32)> {
        Ok((600, 300))
    }
}
