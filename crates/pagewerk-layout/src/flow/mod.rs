// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flow module — threads lines of content through columns and sheets.
//
// Lines live in an append-only arena owned by `Flow`; each records the handle
// of its predecessor, so a document is a backward chain that `unroll` turns
// into a forward sequence once flow is finished. Sheets and columns are
// created by the `LayoutPolicy` and shared through `Arc` by every line placed
// in them; the walker compares them by identity to detect page changes.

pub mod policy;
pub mod story;
pub mod widows;

use std::fmt;
use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::Length;
use tracing::{trace, warn};

use crate::model::Node;

pub use policy::{FrameLayout, LayoutPolicy, Region, SingleColumnLayout};
pub use story::{Block, Story, StoryOptions};
pub use widows::split_point;

/// A physical page produced by a policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// 1-based position in the document.
    pub number: usize,
    pub width: Length,
    pub height: Length,
}

/// A rectangular placement region on a sheet.
#[derive(Debug, Clone)]
pub struct Column {
    pub sheet: Arc<Sheet>,
    /// Sequence number across the whole document, starting at 1.
    pub id: usize,
    /// Index of the region on its sheet.
    pub region: usize,
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
}

/// Handle of a line in its flow's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

impl LineId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line #{}", self.0)
    }
}

/// One placed row of content.
#[derive(Debug, Clone)]
pub struct Line {
    /// `None` for the first line of the document.
    pub previous: Option<LineId>,
    pub column: Arc<Column>,
    /// Bottom of the line, measured from the column top.
    pub y: Length,
    pub height: Length,
    /// Content positioned relative to the top-left corner of the line.
    pub graphics: Vec<Node>,
}

impl Line {
    /// Top of the line, measured from the column top.
    pub fn top(&self) -> Length {
        self.y - self.height
    }
}

/// Where the next line would go.
#[derive(Debug, Clone)]
pub struct Placement {
    pub column: Arc<Column>,
    /// Bottom of the line in `column`.
    pub y: Length,
    /// The column holds no line yet.
    pub fresh: bool,
}

/// A line arena under one policy.
#[derive(Debug)]
pub struct Flow<P> {
    policy: P,
    lines: Vec<Line>,
}

impl<P: LayoutPolicy> Flow<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            lines: Vec::new(),
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The line `previous` names, `None` at the document start. A handle
    /// from another arena is an error rather than a fresh start.
    fn predecessor(&self, previous: Option<LineId>) -> Result<Option<&Line>> {
        match previous {
            None => Ok(None),
            Some(id) => self
                .line(id)
                .map(Some)
                .ok_or_else(|| PagewerkError::ForeignLine(id.to_string())),
        }
    }

    /// Where a line of `height` following `previous` would land. With
    /// `force` it always opens the next column.
    pub fn peek(&self, previous: Option<LineId>, leading: Length, height: Length, force: bool) -> Result<Placement> {
        let previous = self.predecessor(previous)?;
        if let Some(line) = previous {
            if !force && self.policy.fits(&line.column, line.y, leading, height) {
                return Ok(Placement {
                    column: line.column.clone(),
                    y: line.y + height + leading,
                    fresh: false,
                });
            }
        }
        let column = self.policy.next_column(previous.map(|l| l.column.as_ref()));
        if height > column.height {
            warn!(
                column = column.id,
                height = %height,
                available = %column.height,
                "Line taller than a fresh column; placing it anyway"
            );
        }
        Ok(Placement {
            column,
            y: height,
            fresh: true,
        })
    }

    /// Append a line placed where `peek` said it would go.
    pub fn place(&mut self, previous: Option<LineId>, placement: Placement, height: Length, graphics: Vec<Node>) -> Result<LineId> {
        self.predecessor(previous)?;
        let id = LineId(self.lines.len());
        trace!(%id, column = placement.column.id, y = %placement.y, fresh = placement.fresh, "Line placed");
        self.lines.push(Line {
            previous,
            column: placement.column,
            y: placement.y,
            height,
            graphics,
        });
        Ok(id)
    }

    /// Append a line after `previous`, in the same column if it fits.
    pub fn next_line(&mut self, previous: Option<LineId>, leading: Length, height: Length, graphics: Vec<Node>) -> Result<LineId> {
        let placement = self.peek(previous, leading, height, false)?;
        self.place(previous, placement, height, graphics)
    }

    /// Append a line at the top of the column after `previous`'s.
    pub fn next_line_in_new_column(&mut self, previous: Option<LineId>, height: Length, graphics: Vec<Node>) -> Result<LineId> {
        let placement = self.peek(previous, Length::ZERO, height, true)?;
        self.place(previous, placement, height, graphics)
    }

    /// How many more lines of `height` fit in `previous`'s column. Zero
    /// before the first line.
    pub fn room(&self, previous: Option<LineId>, leading: Length, height: Length) -> Result<usize> {
        let Some(line) = self.predecessor(previous)? else {
            return Ok(0);
        };
        if height + leading <= Length::ZERO {
            return Ok(usize::MAX);
        }
        let mut y = line.y;
        let mut count = 0;
        while self.policy.fits(&line.column, y, leading, height) {
            y += height + leading;
            count += 1;
        }
        Ok(count)
    }

    /// How many lines of `height` a fresh column after `previous` holds.
    /// At least one: an oversized first line is placed regardless.
    pub fn fresh_room(&self, previous: Option<LineId>, leading: Length, height: Length) -> Result<usize> {
        let previous = self.predecessor(previous)?;
        let column = self.policy.next_column(previous.map(|l| l.column.as_ref()));
        if height + leading <= Length::ZERO {
            return Ok(usize::MAX);
        }
        let mut y = height;
        let mut count = 1;
        while self.policy.fits(&column, y, leading, height) {
            y += height + leading;
            count += 1;
        }
        Ok(count)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.0)
    }

    /// The most recently appended line.
    pub fn last(&self) -> Option<LineId> {
        self.lines.len().checked_sub(1).map(LineId)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines after `start` up to and including `end`, in flow order.
    ///
    /// `start` is excluded, so `unroll(x, x)` is empty and `unroll(None,
    /// end)` is the whole chain ending at `end`. Fails when walking back
    /// from `end` never meets `start`.
    pub fn unroll(&self, start: Option<LineId>, end: Option<LineId>) -> Result<Vec<&Line>> {
        let unreachable = || PagewerkError::UnreachableChain {
            start: start.map_or_else(|| "document start".to_owned(), |id| id.to_string()),
            end: end.map_or_else(|| "document start".to_owned(), |id| id.to_string()),
        };
        let mut lines = Vec::new();
        let mut cursor = end;
        while cursor != start {
            let id = cursor.ok_or_else(unreachable)?;
            let line = self.line(id).ok_or_else(unreachable)?;
            lines.push(line);
            cursor = line.previous;
        }
        lines.reverse();
        Ok(lines)
    }
}
