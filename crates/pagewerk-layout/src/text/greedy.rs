// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// First-fit line breaking.

use std::str::SplitWhitespace;

use pagewerk_core::units::Length;

use super::WrapStrategy;
use crate::render::FontMetrics;

/// Lazy first-fit wrapper over the words of one paragraph.
///
/// The running width restarts with every line. A word joins the current line
/// unless the line plus one space plus the word would be strictly wider than
/// the target; a line that exactly fills the target is not an overflow. Words
/// are never split, so a word wider than the target sits on a line of its
/// own. The trailing partial line is always produced, which makes an empty
/// paragraph a single empty line.
pub struct NaiveWrap<'f, 't> {
    font: &'f dyn FontMetrics,
    words: SplitWhitespace<'t>,
    width: Length,
    space: Length,
    line: Vec<&'t str>,
    running: Length,
    finished: bool,
}

/// Start wrapping `text` to `width`.
pub fn naive_wrap<'f, 't>(font: &'f dyn FontMetrics, text: &'t str, width: Length) -> NaiveWrap<'f, 't> {
    NaiveWrap {
        font,
        words: text.split_whitespace(),
        width,
        space: font.width_of(" "),
        line: Vec::new(),
        running: Length::ZERO,
        finished: false,
    }
}

impl<'t> Iterator for NaiveWrap<'_, 't> {
    type Item = Vec<&'t str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        for word in self.words.by_ref() {
            let advance = self.font.width_of(word);
            let candidate = if self.line.is_empty() {
                advance
            } else {
                self.running + self.space + advance
            };
            if candidate > self.width && !self.line.is_empty() {
                self.running = advance;
                return Some(std::mem::replace(&mut self.line, vec![word]));
            }
            self.line.push(word);
            self.running = candidate;
        }
        self.finished = true;
        Some(std::mem::take(&mut self.line))
    }
}

/// [`naive_wrap`] behind the strategy contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl WrapStrategy for Greedy {
    fn wrap<'t>(&self, font: &dyn FontMetrics, text: &'t str, width: Length) -> Vec<Vec<&'t str>> {
        naive_wrap(font, text, width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixedFont;
    use pagewerk_core::units::pt;

    // "aaa" "bbbb" "ccccc": widths 3, 4, 5 with a one-point space.
    const THREE_WORDS: &str = "aaa bbbb ccccc";

    #[test]
    fn filling_the_width_exactly_is_not_an_overflow() {
        let font = FixedFont::unit();
        // 3 + 1 + 4 = 8 fits a target of 8.
        let lines: Vec<_> = naive_wrap(&font, THREE_WORDS, pt(8.0)).collect();
        assert_eq!(lines, vec![vec!["aaa", "bbbb"], vec!["ccccc"]]);
    }

    #[test]
    fn one_point_short_breaks_before_the_second_word() {
        let font = FixedFont::unit();
        // 3 + 1 + 4 = 8 exceeds 7.
        let lines: Vec<_> = naive_wrap(&font, THREE_WORDS, pt(7.0)).collect();
        assert_eq!(lines, vec![vec!["aaa"], vec!["bbbb"], vec!["ccccc"]]);
    }

    #[test]
    fn width_is_measured_per_line() {
        let font = FixedFont::unit();
        // Each line holds two three-letter words (3 + 1 + 3 = 7).
        let lines: Vec<_> = naive_wrap(&font, "aaa bbb ccc ddd eee fff", pt(7.0)).collect();
        assert_eq!(
            lines,
            vec![vec!["aaa", "bbb"], vec!["ccc", "ddd"], vec!["eee", "fff"]]
        );
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let font = FixedFont::unit();
        let lines: Vec<_> = naive_wrap(&font, "a extraordinarily b", pt(5.0)).collect();
        assert_eq!(lines, vec![vec!["a"], vec!["extraordinarily"], vec!["b"]]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let font = FixedFont::unit();
        let mut wrap = naive_wrap(&font, "   ", pt(5.0));
        assert_eq!(wrap.next(), Some(Vec::new()));
        assert_eq!(wrap.next(), None);
        assert_eq!(wrap.next(), None);
    }

    #[test]
    fn strategy_collects_the_iterator() {
        let font = FixedFont::unit();
        let lines = Greedy.wrap(&font, THREE_WORDS, pt(8.0));
        assert_eq!(lines.len(), 2);
    }
}
