// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Penalty-minimising line breaking over a whole paragraph.
//
// Badness of a non-final line is the squared difference between the target
// width and the line's natural width. A line is feasible when that difference
// lies within [-shrink, +stretch]; the final line only has to respect the
// shrink bound, and a line holding a single word is always feasible because
// it cannot be broken further. Ending the paragraph on a single-word line
// (a runt) costs `runt_penalty`.

use pagewerk_core::config::Tolerance;
use pagewerk_core::units::Length;
use tracing::trace;

use super::WrapStrategy;
use crate::render::FontMetrics;

/// Optimal strategy parameters.
#[derive(Debug, Clone, Copy)]
pub struct Optimal {
    pub tolerance: Tolerance,
    /// Cost in pt² of a final line with one word.
    pub runt_penalty: f64,
}

impl Default for Optimal {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            runt_penalty: 1_000.0,
        }
    }
}

impl Optimal {
    /// Line end indices (exclusive) minimising total badness.
    ///
    /// `widths` are word widths, `space` the inter-word gap. Returns one
    /// entry per line; the last entry is always `widths.len()`.
    pub fn break_points(&self, widths: &[Length], space: Length, width: Length) -> Vec<usize> {
        let n = widths.len();
        if n == 0 {
            return Vec::new();
        }
        let target = width.as_pt();
        let shrink = self.tolerance.shrink.as_pt();
        let stretch = self.tolerance.stretch.as_pt();
        let space = space.as_pt();

        // cost[j]: cheapest way to set words[..j]; from[j]: start of its last line.
        let mut cost = vec![f64::INFINITY; n + 1];
        let mut from = vec![0usize; n + 1];
        cost[0] = 0.0;

        for end in 1..=n {
            let last = end == n;
            let mut natural = -space;
            for start in (0..end).rev() {
                natural += widths[start].as_pt() + space;
                let words = end - start;
                let slack = target - natural;
                if words > 1 && slack < -shrink {
                    // Wider still for every earlier start.
                    break;
                }
                if words > 1 && !last && slack > stretch {
                    continue;
                }
                let mut badness = if last && slack >= 0.0 { 0.0 } else { slack * slack };
                if last && words == 1 && n > 1 {
                    badness += self.runt_penalty;
                }
                let total = cost[start] + badness;
                if total < cost[end] {
                    cost[end] = total;
                    from[end] = start;
                }
            }
        }

        let mut ends = Vec::new();
        let mut end = n;
        while end > 0 {
            ends.push(end);
            end = from[end];
        }
        ends.reverse();
        trace!(lines = ends.len(), cost = cost[n], "Paragraph broken");
        ends
    }
}

impl WrapStrategy for Optimal {
    fn wrap<'t>(&self, font: &dyn FontMetrics, text: &'t str, width: Length) -> Vec<Vec<&'t str>> {
        let words: Vec<&'t str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![Vec::new()];
        }
        let widths: Vec<Length> = words.iter().map(|w| font.width_of(w)).collect();
        let mut start = 0;
        self.break_points(&widths, font.width_of(" "), width)
            .into_iter()
            .map(|end| {
                let line = words[start..end].to_vec();
                start = end;
                line
            })
            .collect()
    }
}
