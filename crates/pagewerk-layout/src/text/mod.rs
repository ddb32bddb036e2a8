// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — paragraph line breaking.
//
// Both strategies honour one contract: given a font, a paragraph and a target
// width, produce the paragraph's words grouped into lines. Callers do not
// know which strategy they are using. Widow/orphan control is not done here:
// it depends on where the flow puts the paragraph (see `flow::story`).

pub mod greedy;
pub mod optimal;

use std::fmt;

use pagewerk_core::config::LayoutConfig;
use pagewerk_core::types::WrapKind;
use pagewerk_core::units::Length;

use crate::render::FontMetrics;

pub use greedy::{Greedy, NaiveWrap, naive_wrap};
pub use optimal::Optimal;

/// A paragraph line-breaking strategy.
pub trait WrapStrategy: fmt::Debug + Send + Sync {
    /// Words of `text` grouped into lines no wider than `width` where
    /// possible. Never empty: an empty paragraph is one empty line.
    fn wrap<'t>(&self, font: &dyn FontMetrics, text: &'t str, width: Length) -> Vec<Vec<&'t str>>;
}

/// The strategy a configuration asks for.
pub fn strategy_for(config: &LayoutConfig) -> Box<dyn WrapStrategy> {
    match config.wrap {
        WrapKind::Greedy => Box::new(Greedy),
        WrapKind::Optimal => Box::new(Optimal {
            tolerance: config.tolerance,
            runt_penalty: config.runt_penalty,
        }),
    }
}
