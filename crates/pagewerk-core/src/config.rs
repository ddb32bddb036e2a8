// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PagewerkError, Result};
use crate::types::{PaperSize, WrapKind};
use crate::units::{Length, mm, pt};

/// Margins of a facing-pages layout. `inner` is the binding side: left on
/// odd (recto) pages, right on even (verso) pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacingMargins {
    pub top: Length,
    pub bottom: Length,
    pub inner: Length,
    pub outer: Length,
}

impl Default for FacingMargins {
    fn default() -> Self {
        Self {
            top: mm(20.0),
            bottom: mm(25.0),
            inner: mm(20.0),
            outer: mm(25.0),
        }
    }
}

/// How far a line may deviate from the target width when breaking
/// paragraphs with the optimal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Shortfall a non-final line may have.
    pub stretch: Length,
    /// Overflow any line may have.
    pub shrink: Length,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            stretch: pt(24.0),
            shrink: Length::ZERO,
        }
    }
}

/// Persistent layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Paper size of every page.
    pub paper_size: PaperSize,
    /// Page margins (facing pages).
    pub margins: FacingMargins,
    /// Font face of body text.
    pub body_face: String,
    /// Body text size in points.
    pub body_size: f64,
    /// Paragraph line-breaking strategy.
    pub wrap: WrapKind,
    /// Tolerance for the optimal strategy.
    pub tolerance: Tolerance,
    /// Penalty (in pt²) for ending a paragraph with a single-word line.
    pub runt_penalty: f64,
    /// Move paragraph breaks that would strand a single line.
    pub avoid_widows_and_orphans: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margins: FacingMargins::default(),
            body_face: "Helvetica".into(),
            body_size: 11.0,
            wrap: WrapKind::Greedy,
            tolerance: Tolerance::default(),
            runt_penalty: 1_000.0,
            avoid_widows_and_orphans: true,
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(paper = %config.paper_size, wrap = ?config.wrap, "Layout configuration parsed");
        Ok(config)
    }

    /// Read, parse, and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded layout configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Width and height left for content on every page.
    pub fn content_size(&self) -> (Length, Length) {
        let (width, height) = self.paper_size.dimensions();
        let m = &self.margins;
        (width - m.inner - m.outer, height - m.top - m.bottom)
    }

    /// Check that the settings describe a page that can hold text.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.content_size();
        if width <= Length::ZERO || height <= Length::ZERO {
            return Err(PagewerkError::Config(format!(
                "margins leave no content area on {} paper",
                self.paper_size
            )));
        }
        if !(self.body_size.is_finite() && self.body_size > 0.0) {
            return Err(PagewerkError::Config(format!(
                "body size must be positive, got {}",
                self.body_size
            )));
        }
        if self.tolerance.stretch < Length::ZERO || self.tolerance.shrink < Length::ZERO {
            return Err(PagewerkError::Config(
                "tolerance stretch and shrink must not be negative".into(),
            ));
        }
        if self.body_face.trim().is_empty() {
            return Err(PagewerkError::Config("body face is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        let (w, h) = config.content_size();
        assert!((w.as_mm() - 165.0).abs() < 1e-9);
        assert!((h.as_mm() - 252.0).abs() < 1e-9);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{ "paper_size": "A5", "body_size": 9.0, "wrap": "Optimal",
                 "margins": { "top": "10mm", "bottom": "10mm", "inner": "15mm", "outer": "10mm" } }"#,
        )
        .unwrap();
        assert_eq!(config.paper_size, PaperSize::A5);
        assert_eq!(config.wrap, WrapKind::Optimal);
        assert!((config.margins.inner.as_mm() - 15.0).abs() < 1e-9);
        assert_eq!(config.body_face, "Helvetica");
        assert!(config.avoid_widows_and_orphans);
    }

    #[test]
    fn json_round_trip() {
        let config = LayoutConfig {
            paper_size: PaperSize::Letter,
            ..Default::default()
        };
        let json = config.to_json_string().unwrap();
        let back = LayoutConfig::from_json_str(&json).unwrap();
        assert_eq!(back.paper_size, PaperSize::Letter);
        assert_eq!(back.wrap, config.wrap);
        assert!((back.margins.top.as_mm() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn margins_wider_than_paper_are_rejected() {
        let json = r#"{ "paper_size": "A9",
            "margins": { "top": "30mm", "bottom": "30mm", "inner": "10mm", "outer": "10mm" } }"#;
        assert!(matches!(
            LayoutConfig::from_json_str(json).unwrap_err(),
            PagewerkError::Config(_)
        ));
    }

    #[test]
    fn bare_number_margin_is_rejected() {
        let json = r#"{ "margins": { "top": 30, "bottom": "30mm", "inner": "10mm", "outer": "10mm" } }"#;
        assert!(LayoutConfig::from_json_str(json).is_err());
    }

    #[test]
    fn config_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{ "body_face": "Courier" }"#).unwrap();
        let config = LayoutConfig::from_json_file(&path).unwrap();
        assert_eq!(config.body_face, "Courier");
    }
}
