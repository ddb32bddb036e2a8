// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dimensioned quantities. Every geometric value in Pagewerk carries its unit:
// `Length` is the statically typed form used inside the engine, `Quantity` is
// the dynamically tagged form accepted at public boundaries and validated into
// a `Length` with `require_length` / `optional_length`.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PagewerkError, Result};

/// Points per inch; the point is the base unit.
pub const POINTS_PER_INCH: f64 = 72.0;

const INCHES_PER_METRE: f64 = 1.0 / 0.0254;

/// Units of length understood by Pagewerk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Point,
    Inch,
    Metre,
    Decimetre,
    Centimetre,
    Millimetre,
    Micrometre,
}

impl Unit {
    /// Size of one of this unit, in points.
    pub fn points(self) -> f64 {
        let metre = POINTS_PER_INCH * INCHES_PER_METRE;
        match self {
            Self::Point => 1.0,
            Self::Inch => POINTS_PER_INCH,
            Self::Metre => metre,
            Self::Decimetre => metre * 1e-1,
            Self::Centimetre => metre * 1e-2,
            Self::Millimetre => metre * 1e-3,
            Self::Micrometre => metre * 1e-6,
        }
    }

    /// Short symbol used when formatting.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Point => "pt",
            Self::Inch => "in",
            Self::Metre => "m",
            Self::Decimetre => "dm",
            Self::Centimetre => "cm",
            Self::Millimetre => "mm",
            Self::Micrometre => "µm",
        }
    }

    /// Parse a unit symbol or name (`"mm"`, `"inch"`, `"\""`, `"points"` …).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "pt" | "point" | "points" => Some(Self::Point),
            "in" | "inch" | "inches" | "\"" => Some(Self::Inch),
            "m" | "meter" | "metre" => Some(Self::Metre),
            "dm" => Some(Self::Decimetre),
            "cm" => Some(Self::Centimetre),
            "mm" => Some(Self::Millimetre),
            "µm" | "um" => Some(Self::Micrometre),
            _ => None,
        }
    }
}

// -- Length -------------------------------------------------------------------

/// A length, stored in points.
///
/// Serialised as a string with its unit (`"56.7pt"`); deserialised from any
/// unit `Unit::from_symbol` understands (`"20mm"`, `"1in"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Length(f64);

impl Length {
    pub const ZERO: Self = Self(0.0);

    /// A length of `magnitude` in `unit`.
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self(magnitude * unit.points())
    }

    pub const fn from_pt(points: f64) -> Self {
        Self(points)
    }

    /// Magnitude expressed in `unit`.
    pub fn to(self, unit: Unit) -> f64 {
        self.0 / unit.points()
    }

    pub fn as_pt(self) -> f64 {
        self.0
    }

    pub fn as_mm(self) -> f64 {
        self.to(Unit::Millimetre)
    }

    pub fn as_inch(self) -> f64 {
        self.to(Unit::Inch)
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

/// Points.
pub fn pt(value: f64) -> Length {
    Length::from_pt(value)
}

/// Millimetres.
pub fn mm(value: f64) -> Length {
    Length::new(value, Unit::Millimetre)
}

/// Centimetres.
pub fn cm(value: f64) -> Length {
    Length::new(value, Unit::Centimetre)
}

/// Inches.
pub fn inch(value: f64) -> Length {
    Length::new(value, Unit::Inch)
}

impl Add for Length {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Mul<Length> for f64 {
    type Output = Length;
    fn mul(self, rhs: Length) -> Length {
        Length(self * rhs.0)
    }
}

impl Div<f64> for Length {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

/// Length ÷ length is a plain ratio.
impl Div for Length {
    type Output = f64;
    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Length> for Length {
    fn sum<I: Iterator<Item = &'a Length>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

impl FromStr for Length {
    type Err = PagewerkError;

    /// Parse `"<number><unit>"`, e.g. `"20mm"`, `"12.5 pt"`, `"1e2in"`.
    /// A bare number is rejected: lengths always name their unit.
    fn from_str(source: &str) -> Result<Self> {
        let text = source.trim();
        // The unit is the trailing run of letters, so an exponent stays
        // with the number.
        let split = text
            .trim_end_matches(|c: char| c.is_alphabetic() || c == '"')
            .len();
        let (number, symbol) = text.split_at(split);
        let magnitude: f64 = number
            .trim()
            .parse()
            .map_err(|_| PagewerkError::dimension("length", format!("{source:?}")))?;
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(PagewerkError::dimension(
                "length",
                format!("bare number {magnitude}"),
            ));
        }
        let unit = Unit::from_symbol(symbol).ok_or_else(|| {
            PagewerkError::dimension("length", format!("unknown unit {symbol:?}"))
        })?;
        Ok(Self::new(magnitude, unit))
    }
}

impl TryFrom<String> for Length {
    type Error = PagewerkError;
    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.to_string()
    }
}

// -- Quantity -----------------------------------------------------------------

/// A magnitude tagged with a power of length.
///
/// Power 0 is a bare number, 1 a length, 2 an area. The magnitude is held in
/// points raised to that power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    length_power: i32,
}

impl Quantity {
    /// A dimensionless number.
    pub const fn number(value: f64) -> Self {
        Self {
            magnitude: value,
            length_power: 0,
        }
    }

    /// A length of `magnitude` in `unit`.
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Length::new(magnitude, unit).into()
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn length_power(&self) -> i32 {
        self.length_power
    }

    pub fn is_length(&self) -> bool {
        self.length_power == 1
    }

    fn same_dimension(&self, other: &Self, operation: &str) -> Result<()> {
        if self.length_power == other.length_power {
            Ok(())
        } else {
            Err(PagewerkError::dimension(
                format!("right-hand side of {operation} with {}", self.describe()),
                other.describe(),
            ))
        }
    }

    /// Sum of two quantities of the same dimension.
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.same_dimension(&other, "addition")?;
        Ok(Self {
            magnitude: self.magnitude + other.magnitude,
            ..self
        })
    }

    /// Difference of two quantities of the same dimension.
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.same_dimension(&other, "subtraction")?;
        Ok(Self {
            magnitude: self.magnitude - other.magnitude,
            ..self
        })
    }

    /// Ordering of two quantities of the same dimension.
    pub fn checked_cmp(self, other: Self) -> Result<Ordering> {
        self.same_dimension(&other, "comparison")?;
        Ok(self.magnitude.total_cmp(&other.magnitude))
    }

    /// Magnitude in `unit`; only lengths convert.
    pub fn to(self, unit: Unit) -> Result<f64> {
        Ok(self.into_length("converted quantity")?.to(unit))
    }

    /// Validate that this is a length and unwrap it. `what` names the field
    /// in the error.
    pub fn into_length(self, what: &str) -> Result<Length> {
        if self.is_length() {
            Ok(Length(self.magnitude))
        } else {
            Err(PagewerkError::dimension(what, self.describe()))
        }
    }

    fn describe(&self) -> String {
        match self.length_power {
            0 => format!("bare number {}", self.magnitude),
            1 => format!("{}pt", self.magnitude),
            2 => format!("{}pt²", self.magnitude),
            power => format!("{}pt^{power}", self.magnitude),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<Length> for Quantity {
    fn from(value: Length) -> Self {
        Self {
            magnitude: value.0,
            length_power: 1,
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Self::number(f64::from(value))
    }
}

impl Mul for Quantity {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            magnitude: self.magnitude * rhs.magnitude,
            length_power: self.length_power + rhs.length_power,
        }
    }
}

impl Div for Quantity {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self {
            magnitude: self.magnitude / rhs.magnitude,
            length_power: self.length_power - rhs.length_power,
        }
    }
}

impl Mul<f64> for Quantity {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self {
            magnitude: self.magnitude * rhs,
            ..self
        }
    }
}

impl Div<f64> for Quantity {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self {
            magnitude: self.magnitude / rhs,
            ..self
        }
    }
}

// -- Boundary validation ------------------------------------------------------

/// Validate a geometric argument at a public boundary.
pub fn require_length(value: impl Into<Quantity>, what: &str) -> Result<Length> {
    value.into().into_length(what)
}

/// Like [`require_length`], for arguments that may be explicitly absent.
pub fn optional_length<Q: Into<Quantity>>(value: Option<Q>, what: &str) -> Result<Option<Length>> {
    value.map(|v| require_length(v, what)).transpose()
}
