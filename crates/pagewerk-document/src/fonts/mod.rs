// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fonts module — metrics for the PDF base-14 faces the renderer can draw
// without embedding, and the metrics provider serving them.

pub mod afm;

use std::path::Path;
use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::{Length, pt};
use pagewerk_layout::render::{Font, FontMetrics, MetricsProvider};
use printpdf::BuiltinFont;
use tracing::debug;

/// Line spacing as a multiple of the point size.
const LINE_SPACING: f64 = 1.2;

/// Glyph width family of a supported face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Helvetica,
    Courier,
}

/// Resolve a face name to the builtin PDF font that draws it.
pub fn builtin_font(face: &str) -> Result<BuiltinFont> {
    let font = match face {
        "Helvetica" => BuiltinFont::Helvetica,
        "Helvetica-Oblique" => BuiltinFont::HelveticaOblique,
        "Courier" => BuiltinFont::Courier,
        "Courier-Oblique" => BuiltinFont::CourierOblique,
        "Courier-Bold" => BuiltinFont::CourierBold,
        "Courier-BoldOblique" => BuiltinFont::CourierBoldOblique,
        other => return Err(PagewerkError::UnknownFont(other.to_owned())),
    };
    Ok(font)
}

fn family(face: &str) -> Result<Family> {
    builtin_font(face)?;
    Ok(if face.starts_with("Courier") {
        Family::Courier
    } else {
        Family::Helvetica
    })
}

/// One base-14 face at one size.
#[derive(Debug, Clone)]
pub struct Base14Font {
    face: String,
    family: Family,
    size: f64,
}

impl Base14Font {
    pub fn new(face: &str, point_size: f64) -> Result<Self> {
        if !(point_size.is_finite() && point_size > 0.0) {
            return Err(PagewerkError::Config(format!(
                "point size must be positive, got {point_size}"
            )));
        }
        Ok(Self {
            face: face.to_owned(),
            family: family(face)?,
            size: point_size,
        })
    }

    fn em(&self, thousandths: u16) -> Length {
        pt(f64::from(thousandths) * self.size / 1000.0)
    }
}

impl FontMetrics for Base14Font {
    fn face(&self) -> &str {
        &self.face
    }

    fn point_size(&self) -> f64 {
        self.size
    }

    fn ascent(&self) -> Length {
        match self.family {
            Family::Helvetica => self.em(afm::HELVETICA_ASCENT),
            Family::Courier => self.em(afm::COURIER_ASCENT),
        }
    }

    fn descent(&self) -> Length {
        match self.family {
            Family::Helvetica => self.em(afm::HELVETICA_DESCENT),
            Family::Courier => self.em(afm::COURIER_DESCENT),
        }
    }

    fn height(&self) -> Length {
        self.ascent() + self.descent()
    }

    fn leading(&self) -> Length {
        (pt(self.size * LINE_SPACING) - self.height()).max(Length::ZERO)
    }

    fn width_of(&self, text: &str) -> Length {
        let units: u32 = match self.family {
            Family::Helvetica => text.chars().map(|c| u32::from(afm::helvetica_width(c))).sum(),
            Family::Courier => u32::from(afm::COURIER_WIDTH) * text.chars().count() as u32,
        };
        pt(f64::from(units) * self.size / 1000.0)
    }
}

/// Serves base-14 fonts and reads image sizes from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base14Metrics;

impl MetricsProvider for Base14Metrics {
    fn font(&self, face: &str, point_size: f64) -> Result<Font> {
        let font = Base14Font::new(face, point_size)?;
        debug!(face, point_size, "Base-14 font loaded");
        Ok(Arc::new(font))
    }

    fn peek_image(&self, path: &Path) -> Result<(u32, u32)> {
        crate::image::probe(path)
    }
}
