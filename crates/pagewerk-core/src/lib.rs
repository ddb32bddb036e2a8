// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagewerk — Core types, units, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;
pub mod units;

pub use config::{FacingMargins, LayoutConfig, Tolerance};
pub use error::{PagewerkError, Result};
pub use types::*;
pub use units::{Length, Quantity, Unit, cm, inch, mm, optional_length, pt, require_length};
