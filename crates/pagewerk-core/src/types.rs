// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: paper sizes, page margins, line-breaking strategy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PagewerkError, Result};
use crate::units::{Length, Quantity, mm, optional_length, require_length};

/// Standard paper sizes (ISO A and B series, envelopes, common US sizes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    B8,
    B9,
    B10,
    C5E,
    Comm10E,
    DLE,
    Executive,
    Folio,
    Ledger,
    Legal,
    Letter,
    Tabloid,
    Custom { width: Length, height: Length },
}

impl PaperSize {
    /// Every named size, in table order.
    pub const NAMED: [PaperSize; 30] = [
        Self::A0,
        Self::A1,
        Self::A2,
        Self::A3,
        Self::A4,
        Self::A5,
        Self::A6,
        Self::A7,
        Self::A8,
        Self::A9,
        Self::B0,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::B4,
        Self::B5,
        Self::B6,
        Self::B7,
        Self::B8,
        Self::B9,
        Self::B10,
        Self::C5E,
        Self::Comm10E,
        Self::DLE,
        Self::Executive,
        Self::Folio,
        Self::Ledger,
        Self::Legal,
        Self::Letter,
        Self::Tabloid,
    ];

    /// Table entry in millimetres (width, height).
    fn table_mm(&self) -> (f64, f64) {
        match self {
            Self::A0 => (841.0, 1189.0),
            Self::A1 => (594.0, 841.0),
            Self::A2 => (420.0, 594.0),
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::A5 => (148.0, 210.0),
            Self::A6 => (105.0, 148.0),
            Self::A7 => (74.0, 105.0),
            Self::A8 => (52.0, 74.0),
            Self::A9 => (37.0, 52.0),
            Self::B0 => (1000.0, 1414.0),
            Self::B1 => (707.0, 1000.0),
            Self::B2 => (500.0, 707.0),
            Self::B3 => (353.0, 500.0),
            Self::B4 => (250.0, 353.0),
            Self::B5 => (176.0, 250.0),
            Self::B6 => (125.0, 176.0),
            Self::B7 => (88.0, 125.0),
            Self::B8 => (62.0, 88.0),
            Self::B9 => (44.0, 62.0),
            Self::B10 => (31.0, 44.0),
            Self::C5E => (163.0, 229.0),
            Self::Comm10E => (105.0, 241.0),
            Self::DLE => (110.0, 220.0),
            Self::Executive => (190.5, 254.0),
            Self::Folio => (210.0, 330.0),
            Self::Ledger => (431.8, 279.4),
            Self::Legal => (215.9, 355.6),
            Self::Letter => (215.9, 279.4),
            Self::Tabloid => (279.4, 431.8),
            Self::Custom { width, height } => (width.as_mm(), height.as_mm()),
        }
    }

    /// Page dimensions (width, height).
    pub fn dimensions(&self) -> (Length, Length) {
        match self {
            Self::Custom { width, height } => (*width, *height),
            named => {
                let (w, h) = named.table_mm();
                (mm(w), mm(h))
            }
        }
    }

    /// An explicit size; both values must be lengths.
    pub fn custom(width: impl Into<Quantity>, height: impl Into<Quantity>) -> Result<Self> {
        Ok(Self::Custom {
            width: require_length(width, "page width")?,
            height: require_length(height, "page height")?,
        })
    }

    /// Table name of the size (`"A4"`, `"Comm10E"`), or `"Custom"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::A0 => "A0",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::A6 => "A6",
            Self::A7 => "A7",
            Self::A8 => "A8",
            Self::A9 => "A9",
            Self::B0 => "B0",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::B4 => "B4",
            Self::B5 => "B5",
            Self::B6 => "B6",
            Self::B7 => "B7",
            Self::B8 => "B8",
            Self::B9 => "B9",
            Self::B10 => "B10",
            Self::C5E => "C5E",
            Self::Comm10E => "Comm10E",
            Self::DLE => "DLE",
            Self::Executive => "Executive",
            Self::Folio => "Folio",
            Self::Ledger => "Ledger",
            Self::Legal => "Legal",
            Self::Letter => "Letter",
            Self::Tabloid => "Tabloid",
            Self::Custom { .. } => "Custom",
        }
    }
}

impl FromStr for PaperSize {
    type Err = PagewerkError;

    /// Resolve a table name. Names are case-sensitive, as in the table.
    fn from_str(name: &str) -> Result<Self> {
        Self::NAMED
            .iter()
            .find(|size| size.name() == name)
            .copied()
            .ok_or_else(|| PagewerkError::SizeResolution(name.to_owned()))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { width, height } => {
                write!(f, "{:.1}×{:.1}mm", width.as_mm(), height.as_mm())
            }
            named => f.write_str(named.name()),
        }
    }
}

/// Page margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margins {
    /// Margins with CSS-style defaulting: `right` defaults to `top`,
    /// `bottom` to `top`, and `left` to `right`.
    pub fn new<Q: Into<Quantity>>(
        top: impl Into<Quantity>,
        right: Option<Q>,
        bottom: Option<Q>,
        left: Option<Q>,
    ) -> Result<Self> {
        let top = require_length(top, "top margin")?;
        let right = optional_length(right, "right margin")?.unwrap_or(top);
        let bottom = optional_length(bottom, "bottom margin")?.unwrap_or(top);
        let left = optional_length(left, "left margin")?.unwrap_or(right);
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// The same margin on every side.
    pub fn uniform(margin: Length) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }

    /// Total horizontal margin (left + right).
    pub fn horizontal(&self) -> Length {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    pub fn vertical(&self) -> Length {
        self.top + self.bottom
    }
}

/// Which paragraph line-breaking strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapKind {
    /// First-fit, left to right.
    #[default]
    Greedy,
    /// Minimum total badness over the whole paragraph.
    Optimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::pt;

    #[test]
    fn named_sizes_resolve() {
        let (w, h) = "A4".parse::<PaperSize>().unwrap().dimensions();
        assert!((w.as_mm() - 210.0).abs() < 1e-9);
        assert!((h.as_mm() - 297.0).abs() < 1e-9);

        let (w, _) = "Letter".parse::<PaperSize>().unwrap().dimensions();
        assert!((w.as_mm() - 215.9).abs() < 1e-9);

        for size in PaperSize::NAMED {
            assert_eq!(size.name().parse::<PaperSize>().unwrap(), size);
        }
    }

    #[test]
    fn unknown_size_is_resolution_error() {
        match "A11".parse::<PaperSize>().unwrap_err() {
            PagewerkError::SizeResolution(name) => assert_eq!(name, "A11"),
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn custom_size_requires_lengths() {
        let size = PaperSize::custom(pt(100.0), pt(200.0)).unwrap();
        assert_eq!(size.dimensions(), (pt(100.0), pt(200.0)));
        assert!(PaperSize::custom(100.0, pt(200.0)).is_err());
    }

    #[test]
    fn margins_default_like_css() {
        let m = Margins::new(pt(10.0), None::<Length>, None, None).unwrap();
        assert_eq!(m, Margins::uniform(pt(10.0)));

        let m = Margins::new(pt(10.0), Some(pt(20.0)), None, None).unwrap();
        assert_eq!(m.bottom, pt(10.0));
        assert_eq!(m.left, pt(20.0));
        assert_eq!(m.horizontal(), pt(40.0));
        assert_eq!(m.vertical(), pt(20.0));
    }

    #[test]
    fn margins_reject_bare_numbers() {
        assert!(Margins::new(10.0, None::<Length>, None, None).is_err());
        assert!(Margins::new(pt(10.0), Some(5.0), None, None).is_err());
    }
}
