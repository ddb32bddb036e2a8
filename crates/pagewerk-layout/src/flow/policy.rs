// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagination policies — where the next column comes from.

use std::sync::Arc;

use pagewerk_core::config::LayoutConfig;
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::{Length, Quantity, require_length};
use tracing::debug;

use super::{Column, Sheet};

/// Decides whether a line fits its column and supplies new columns.
///
/// Implementations must be pure: asking twice for the column after the same
/// `previous` yields equal geometry, so a placement can be peeked before it
/// is committed.
pub trait LayoutPolicy {
    /// Whether a line `height` tall, separated by `leading` from a line
    /// ending at `y`, still ends within `column`.
    fn fits(&self, column: &Column, y: Length, leading: Length, height: Length) -> bool {
        y + height + leading <= column.height
    }

    /// The column after `previous`, or the first column of the document.
    fn next_column(&self, previous: Option<&Column>) -> Arc<Column>;
}

/// One column per sheet, with facing-page margins: odd columns put the
/// inner margin on the left, even columns the outer margin.
#[derive(Debug, Clone)]
pub struct SingleColumnLayout {
    pub width: Length,
    pub height: Length,
    pub top: Length,
    pub bottom: Length,
    pub inner: Length,
    pub outer: Length,
}

impl SingleColumnLayout {
    pub fn new(
        width: impl Into<Quantity>,
        height: impl Into<Quantity>,
        top: impl Into<Quantity>,
        bottom: impl Into<Quantity>,
        inner: impl Into<Quantity>,
        outer: impl Into<Quantity>,
    ) -> Result<Self> {
        Ok(Self {
            width: require_length(width, "sheet width")?,
            height: require_length(height, "sheet height")?,
            top: require_length(top, "top margin")?,
            bottom: require_length(bottom, "bottom margin")?,
            inner: require_length(inner, "inner margin")?,
            outer: require_length(outer, "outer margin")?,
        })
    }

    /// Sheet size from the configured paper, margins as configured.
    pub fn from_config(config: &LayoutConfig) -> Self {
        let (width, height) = config.paper_size.dimensions();
        let margins = &config.margins;
        Self {
            width,
            height,
            top: margins.top,
            bottom: margins.bottom,
            inner: margins.inner,
            outer: margins.outer,
        }
    }
}

impl LayoutPolicy for SingleColumnLayout {
    fn next_column(&self, previous: Option<&Column>) -> Arc<Column> {
        let id = previous.map_or(1, |c| c.id + 1);
        let sheet = Arc::new(Sheet {
            number: previous.map_or(1, |c| c.sheet.number + 1),
            width: self.width,
            height: self.height,
        });
        let left = if id % 2 == 1 { self.inner } else { self.outer };
        debug!(sheet = sheet.number, column = id, "New single-column sheet");
        Arc::new(Column {
            sheet,
            id,
            region: 0,
            x: left,
            y: self.top,
            width: self.width - self.inner - self.outer,
            height: self.height - self.top - self.bottom,
        })
    }
}

/// A rectangular placement region on a sheet, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
}

impl Region {
    pub fn new(
        x: impl Into<Quantity>,
        y: impl Into<Quantity>,
        width: impl Into<Quantity>,
        height: impl Into<Quantity>,
    ) -> Result<Self> {
        Ok(Self {
            x: require_length(x, "region x")?,
            y: require_length(y, "region y")?,
            width: require_length(width, "region width")?,
            height: require_length(height, "region height")?,
        })
    }
}

/// Explicit regions per sheet, filled in order. The first sheet may use its
/// own set of regions; every later sheet uses `regions`.
#[derive(Debug, Clone)]
pub struct FrameLayout {
    pub width: Length,
    pub height: Length,
    first_page: Vec<Region>,
    regions: Vec<Region>,
}

impl FrameLayout {
    pub fn new(width: impl Into<Quantity>, height: impl Into<Quantity>, regions: Vec<Region>) -> Result<Self> {
        if regions.is_empty() {
            return Err(PagewerkError::Config(
                "frame layout needs at least one region".into(),
            ));
        }
        Ok(Self {
            width: require_length(width, "sheet width")?,
            height: require_length(height, "sheet height")?,
            first_page: regions.clone(),
            regions,
        })
    }

    /// Use `regions` on the first sheet only.
    pub fn with_first_page(mut self, regions: Vec<Region>) -> Result<Self> {
        if regions.is_empty() {
            return Err(PagewerkError::Config(
                "frame layout needs at least one first-page region".into(),
            ));
        }
        self.first_page = regions;
        Ok(self)
    }

    fn regions_of(&self, sheet: &Sheet) -> &[Region] {
        if sheet.number == 1 {
            &self.first_page
        } else {
            &self.regions
        }
    }
}

impl LayoutPolicy for FrameLayout {
    fn next_column(&self, previous: Option<&Column>) -> Arc<Column> {
        let (sheet, region) = match previous {
            Some(column) if column.region + 1 < self.regions_of(&column.sheet).len() => {
                (column.sheet.clone(), column.region + 1)
            }
            _ => {
                let sheet = Arc::new(Sheet {
                    number: previous.map_or(1, |c| c.sheet.number + 1),
                    width: self.width,
                    height: self.height,
                });
                debug!(sheet = sheet.number, "New frame-layout sheet");
                (sheet, 0)
            }
        };
        let area = self.regions_of(&sheet)[region];
        debug!(sheet = sheet.number, region, "Next region");
        Arc::new(Column {
            id: previous.map_or(1, |c| c.id + 1),
            region,
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height,
            sheet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewerk_core::units::{mm, pt};

    fn facing() -> SingleColumnLayout {
        SingleColumnLayout::new(mm(210.0), mm(297.0), mm(20.0), mm(25.0), mm(20.0), mm(25.0)).unwrap()
    }

    #[test]
    fn single_column_alternates_inner_and_outer() {
        let layout = facing();
        let first = layout.next_column(None);
        let second = layout.next_column(Some(&first));
        let third = layout.next_column(Some(&second));
        assert_eq!((first.id, second.id, third.id), (1, 2, 3));
        assert_eq!(first.x, mm(20.0));
        assert_eq!(second.x, mm(25.0));
        assert_eq!(third.x, mm(20.0));
        assert!((first.width.as_mm() - 165.0).abs() < 1e-9);
        assert!((first.height.as_mm() - 252.0).abs() < 1e-9);
    }

    #[test]
    fn single_column_starts_a_sheet_per_column() {
        let layout = facing();
        let first = layout.next_column(None);
        let second = layout.next_column(Some(&first));
        assert!(!Arc::ptr_eq(&first.sheet, &second.sheet));
        assert_eq!((first.sheet.number, second.sheet.number), (1, 2));
    }

    #[test]
    fn single_column_rejects_bare_numbers() {
        let result = SingleColumnLayout::new(210.0, mm(297.0), mm(1.0), mm(1.0), mm(1.0), mm(1.0));
        assert!(matches!(result, Err(PagewerkError::Dimension { .. })));
    }

    #[test]
    fn default_fit_allows_exact_fill() {
        let layout = facing();
        let column = layout.next_column(None);
        let full = column.height - pt(10.0);
        assert!(layout.fits(&column, full, Length::ZERO, pt(10.0)));
        assert!(!layout.fits(&column, full, pt(0.5), pt(10.0)));
    }

    fn region(x: f64, y: f64) -> Region {
        Region::new(mm(x), mm(y), mm(50.0), mm(80.0)).unwrap()
    }

    #[test]
    fn frame_layout_cycles_regions_before_new_sheet() {
        let layout = FrameLayout::new(mm(210.0), mm(297.0), vec![region(10.0, 10.0), region(70.0, 10.0)]).unwrap();
        let a = layout.next_column(None);
        let b = layout.next_column(Some(&a));
        let c = layout.next_column(Some(&b));
        assert!(Arc::ptr_eq(&a.sheet, &b.sheet));
        assert!(!Arc::ptr_eq(&b.sheet, &c.sheet));
        assert_eq!((a.region, b.region, c.region), (0, 1, 0));
        assert_eq!(b.x, mm(70.0));
        assert_eq!(c.sheet.number, 2);
    }

    #[test]
    fn frame_layout_first_page_may_differ() {
        let layout = FrameLayout::new(mm(210.0), mm(297.0), vec![region(10.0, 10.0), region(70.0, 10.0)])
            .unwrap()
            .with_first_page(vec![region(30.0, 100.0)])
            .unwrap();
        let a = layout.next_column(None);
        let b = layout.next_column(Some(&a));
        let c = layout.next_column(Some(&b));
        assert_eq!(a.y, mm(100.0));
        assert_eq!(b.sheet.number, 2);
        assert_eq!((b.x, c.x), (mm(10.0), mm(70.0)));
        assert!(Arc::ptr_eq(&b.sheet, &c.sheet));
    }

    #[test]
    fn frame_layout_needs_regions() {
        assert!(matches!(
            FrameLayout::new(mm(210.0), mm(297.0), Vec::new()),
            Err(PagewerkError::Config(_))
        ));
    }
}
