// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph metrics of the base-14 faces, in thousandths of an em, taken from
// the Adobe Font Metrics files (WinAnsi code points 32..=126).

/// Helvetica advance widths for code points 32 (space) to 126 (`~`).
pub const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica width used outside the table.
pub const HELVETICA_FALLBACK: u16 = 556;
pub const HELVETICA_ASCENT: u16 = 718;
pub const HELVETICA_DESCENT: u16 = 207;

/// Every Courier glyph.
pub const COURIER_WIDTH: u16 = 600;
pub const COURIER_ASCENT: u16 = 629;
pub const COURIER_DESCENT: u16 = 157;

/// Helvetica advance of `c` in thousandths of an em.
pub fn helvetica_width(c: char) -> u16 {
    (c as u32)
        .checked_sub(32)
        .and_then(|i| HELVETICA_WIDTHS.get(i as usize))
        .copied()
        .unwrap_or(HELVETICA_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lines_up_with_code_points() {
        assert_eq!(helvetica_width(' '), 278);
        assert_eq!(helvetica_width('0'), 556);
        assert_eq!(helvetica_width('@'), 1015);
        assert_eq!(helvetica_width('I'), 278);
        assert_eq!(helvetica_width('W'), 944);
        assert_eq!(helvetica_width('i'), 222);
        assert_eq!(helvetica_width('m'), 833);
        assert_eq!(helvetica_width('~'), 584);
    }

    #[test]
    fn outside_the_table_falls_back() {
        assert_eq!(helvetica_width('\t'), HELVETICA_FALLBACK);
        assert_eq!(helvetica_width('é'), HELVETICA_FALLBACK);
    }
}
