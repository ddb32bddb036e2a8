// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Story runner — flows paragraphs, figures and breaks into a `Flow`.

use pagewerk_core::error::Result;
use pagewerk_core::units::Length;
use tracing::{debug, instrument};

use super::widows::split_point;
use super::{Flow, LayoutPolicy, LineId};
use crate::compose;
use crate::model::Node;
use crate::render::Font;
use crate::text::WrapStrategy;

/// One unit of a story.
#[derive(Debug, Clone)]
pub enum Block {
    /// Text wrapped to the width of the column it starts in.
    Paragraph { font: Font, text: String },
    /// A composed node placed as a single line of its own height.
    Figure(Node),
    /// The next block starts in a new column. A break with no block after
    /// it in the same story does nothing.
    ColumnBreak,
}

#[derive(Debug, Clone, Copy)]
pub struct StoryOptions {
    pub avoid_widows_and_orphans: bool,
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self {
            avoid_widows_and_orphans: true,
        }
    }
}

/// An ordered list of blocks.
#[derive(Debug, Clone, Default)]
pub struct Story {
    blocks: Vec<Block>,
}

impl Story {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, font: &Font, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph {
            font: font.clone(),
            text: text.into(),
        });
        self
    }

    pub fn figure(mut self, node: Node) -> Self {
        self.blocks.push(Block::Figure(node));
        self
    }

    pub fn column_break(mut self) -> Self {
        self.blocks.push(Block::ColumnBreak);
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Flow every block after `after`, returning the last line placed
    /// (`after` itself when nothing was placed).
    ///
    /// A trailing `ColumnBreak` is not carried into a later `run`; a story
    /// continuing `after` that must start a new column opens with its own
    /// break.
    #[instrument(skip_all, fields(blocks = self.blocks.len()))]
    pub fn run<P: LayoutPolicy>(
        &self,
        flow: &mut Flow<P>,
        strategy: &dyn WrapStrategy,
        options: StoryOptions,
        after: Option<LineId>,
    ) -> Result<Option<LineId>> {
        let mut last = after;
        let mut force = false;
        for block in &self.blocks {
            match block {
                Block::ColumnBreak => force = true,
                Block::Figure(node) => {
                    let height = node.height();
                    let graphics = vec![node.at(Length::ZERO, Length::ZERO)];
                    let placement = flow.peek(last, Length::ZERO, height, force)?;
                    last = Some(flow.place(last, placement, height, graphics)?);
                    force = false;
                }
                Block::Paragraph { font, text } => {
                    last = run_paragraph(flow, strategy, options, last, force, font, text)?;
                    force = false;
                }
            }
        }
        if force {
            debug!("Trailing column break ignored");
        }
        debug!(lines = flow.len(), "Story flowed");
        Ok(last)
    }
}

fn run_paragraph<P: LayoutPolicy>(
    flow: &mut Flow<P>,
    strategy: &dyn WrapStrategy,
    options: StoryOptions,
    mut last: Option<LineId>,
    mut force: bool,
    font: &Font,
    text: &str,
) -> Result<Option<LineId>> {
    let height = font.height();
    let leading = font.leading();
    let width = flow.peek(last, leading, height, force)?.column.width;
    let wrapped = strategy.wrap(font.as_ref(), text, width);
    let mut remaining: &[Vec<&str>] = &wrapped;
    let mut start_of_paragraph = true;

    while !remaining.is_empty() {
        let room = if force { 0 } else { flow.room(last, leading, height)? };
        let fresh = room == 0;
        let fit = if fresh {
            flow.fresh_room(last, leading, height)?
        } else {
            room
        };
        let take = if options.avoid_widows_and_orphans {
            split_point(start_of_paragraph, fresh, remaining.len(), fit)
        } else {
            fit.min(remaining.len())
        };
        if take == 0 {
            debug!(remaining = remaining.len(), fit, "Moving lines to the next column");
            force = true;
            continue;
        }

        let (now, later) = remaining.split_at(take);
        for (i, words) in now.iter().enumerate() {
            let graphics = vec![compose::text(font, &words.join(" "))];
            let id = if i == 0 && fresh {
                flow.next_line_in_new_column(last, height, graphics)?
            } else {
                flow.next_line(last, leading, height, graphics)?
            };
            last = Some(id);
        }
        remaining = later;
        start_of_paragraph = false;
        force = false;
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::SingleColumnLayout;
    use crate::model::{DrawOp, Node};
    use crate::test_utils::FixedFont;
    use crate::text::Greedy;
    use pagewerk_core::units::pt;
    use std::sync::Arc;

    /// Columns 30pt tall and 10pt wide; FixedFont lines are 10pt.
    fn short_columns() -> Flow<SingleColumnLayout> {
        Flow::new(SingleColumnLayout::new(pt(10.0), pt(30.0), Length::ZERO, Length::ZERO, Length::ZERO, Length::ZERO).unwrap())
    }

    fn text_of(node: &Node) -> &str {
        match node {
            Node::Graphic(g) => match &g.draw {
                DrawOp::Text { text, .. } => text,
                _ => "",
            },
            _ => "",
        }
    }

    #[test]
    fn widow_moves_two_lines_together() {
        let font = FixedFont::unit().shared();
        let mut flow = short_columns();
        let before = Story::new().paragraph(&font, "intro").run(&mut flow, &Greedy, StoryOptions::default(), None).unwrap();

        // Three lines at width 10; the column has room for two.
        let last = Story::new()
            .paragraph(&font, "aaaaa bbbbb ccccc")
            .run(&mut flow, &Greedy, StoryOptions::default(), before).unwrap();
        let lines = flow.unroll(before, last).unwrap();
        assert_eq!(lines.len(), 3);
        let first_column = &flow.line(before.unwrap()).unwrap().column;
        assert!(Arc::ptr_eq(&lines[0].column, first_column));
        assert!(!Arc::ptr_eq(&lines[1].column, first_column));
        assert!(Arc::ptr_eq(&lines[1].column, &lines[2].column));
        assert_eq!(text_of(&lines[1].graphics[0]), "bbbbb");
    }

    #[test]
    fn without_control_the_column_is_filled() {
        let font = FixedFont::unit().shared();
        let mut flow = short_columns();
        let options = StoryOptions {
            avoid_widows_and_orphans: false,
        };
        let last = Story::new()
            .paragraph(&font, "intro")
            .paragraph(&font, "aaaaa bbbbb ccccc")
            .run(&mut flow, &Greedy, options, None).unwrap();
        let lines = flow.unroll(None, last).unwrap();
        assert_eq!(lines[2].column.id, 1);
        assert_eq!(lines[3].column.id, 2);
    }

    #[test]
    fn orphan_moves_whole_paragraph() {
        let font = FixedFont::unit().shared();
        let mut flow = short_columns();
        let last = Story::new()
            .paragraph(&font, "oneoneone twotwotwo")
            .paragraph(&font, "aaaaa bbbbb ccccc ddddd")
            .run(&mut flow, &Greedy, StoryOptions::default(), None).unwrap();
        let lines = flow.unroll(None, last).unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1].column.id, 1);
        // First paragraph line would sit alone at the bottom of column 1.
        assert_eq!(lines[2].column.id, 2);
        assert_eq!(text_of(&lines[2].graphics[0]), "aaaaa");
    }

    #[test]
    fn column_break_forces_new_column() {
        let font = FixedFont::unit().shared();
        let mut flow = short_columns();
        let last = Story::new()
            .paragraph(&font, "a")
            .column_break()
            .paragraph(&font, "b")
            .run(&mut flow, &Greedy, StoryOptions::default(), None).unwrap();
        let lines = flow.unroll(None, last).unwrap();
        assert_eq!((lines[0].column.id, lines[1].column.id), (1, 2));
        assert_eq!(lines[1].y, pt(10.0));
    }

    #[test]
    fn figure_is_one_line_of_its_height() {
        let font = FixedFont::unit().shared();
        let mut flow = short_columns();
        let figure = compose::padding(pt(10.0), pt(25.0)).unwrap();
        let last = Story::new()
            .paragraph(&font, "a")
            .figure(figure)
            .run(&mut flow, &Greedy, StoryOptions::default(), None).unwrap();
        let lines = flow.unroll(None, last).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].column.id, 2);
        assert_eq!(lines[1].height, pt(25.0));
    }

    #[test]
    fn empty_story_places_nothing() {
        let mut flow = short_columns();
        assert_eq!(Story::new().run(&mut flow, &Greedy, StoryOptions::default(), None).unwrap(), None);
        assert!(flow.is_empty());
    }

    #[test]
    fn trailing_break_is_not_carried_over() {
        let font = FixedFont::unit().shared();
        let mut flow = short_columns();
        let first = Story::new()
            .paragraph(&font, "a")
            .column_break()
            .run(&mut flow, &Greedy, StoryOptions::default(), None)
            .unwrap();
        assert_eq!(flow.len(), 1);

        let continued = Story::new()
            .paragraph(&font, "b")
            .run(&mut flow, &Greedy, StoryOptions::default(), first)
            .unwrap();
        assert_eq!(flow.line(continued.unwrap()).unwrap().column.id, 1);

        let broken = Story::new()
            .column_break()
            .paragraph(&font, "c")
            .run(&mut flow, &Greedy, StoryOptions::default(), continued)
            .unwrap();
        assert_eq!(flow.line(broken.unwrap()).unwrap().column.id, 2);
    }
}
