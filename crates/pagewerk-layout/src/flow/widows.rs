// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Widow and orphan control at column boundaries.

/// How many of a paragraph's `remaining` lines to place in the current
/// column, which has room for `fit` of them.
///
/// - Everything fits: place everything.
/// - Orphan: only the paragraph's first line would fit at the bottom of a
///   column that already holds content. Place nothing; the paragraph starts
///   in the next column.
/// - Widow: exactly one line would be left for the next column. Place one
///   line fewer so two lines cross the boundary together.
///
/// A `fresh` column is never left empty, so the result is at least one line
/// when `fresh` is set.
pub fn split_point(start_of_paragraph: bool, fresh: bool, remaining: usize, fit: usize) -> usize {
    if fit >= remaining {
        return remaining;
    }
    if start_of_paragraph && fit == 1 && !fresh {
        return 0;
    }
    let take = if remaining - fit == 1 { fit.saturating_sub(1) } else { fit };
    if take == 0 && fresh { fit.max(1) } else { take }
}
