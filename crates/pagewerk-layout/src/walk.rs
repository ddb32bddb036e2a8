// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tree walker — drives a `Renderer` from composed pages or flowed lines.

use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::Length;
use tracing::{info, instrument, trace};

use crate::flow::{Line, Sheet};
use crate::model::{DrawOp, Graphic, Node, Page};
use crate::render::{DrawCommand, Point, Renderer};

/// Render each page on a page of its own, then finalise the output.
///
/// A page placed with `at` shifts its content by its own `(x, y)`.
#[instrument(skip_all, fields(pages = pages.len()))]
pub fn render_pages(renderer: &mut dyn Renderer, pages: &[Page]) -> Result<()> {
    for page in pages {
        renderer.new_page(page.width, page.height)?;
        trace!(depth = 0, node = %Node::from(page.clone()), "Walking page");
        for child in page.children() {
            draw_node(renderer, &child, page.x, page.y, 1)?;
        }
    }
    renderer.save()?;
    info!(pages = pages.len(), "Pages rendered");
    Ok(())
}

/// Draw `node` with its parent's origin at `(x, y)`.
pub fn draw_node(renderer: &mut dyn Renderer, node: &Node, x: Length, y: Length, depth: usize) -> Result<()> {
    trace!(depth, node = %node, "Walking node");
    match node {
        Node::Frame(frame) => {
            let (x, y) = (x + frame.x, y + frame.y);
            for child in frame.children.iter() {
                draw_node(renderer, child, x, y, depth + 1)?;
            }
            Ok(())
        }
        Node::Graphic(graphic) => renderer.execute(&resolve(graphic, x, y)?),
        Node::Page(page) => Err(PagewerkError::MalformedTree(format!(
            "page {} nested at depth {depth}",
            node_label(page)
        ))),
    }
}

fn node_label(page: &Page) -> String {
    page.name.clone().unwrap_or_else(|| "(unnamed)".to_owned())
}

/// The absolute draw command for `graphic` under a parent at `(x, y)`.
pub fn resolve(graphic: &Graphic, x: Length, y: Length) -> Result<DrawCommand> {
    let (x, y) = (x + graphic.x, y + graphic.y);
    let command = match &graphic.draw {
        DrawOp::Rectangle { pen } => DrawCommand::Rectangle {
            x,
            y,
            width: graphic.width,
            height: graphic.height,
            pen: pen.clone(),
        },
        DrawOp::Ellipse { pen } => DrawCommand::Ellipse {
            x,
            y,
            width: graphic.width,
            height: graphic.height,
            pen: pen.clone(),
        },
        DrawOp::Line { dx, dy, pen } => DrawCommand::Line {
            start: Point::new(x, y),
            end: Point::new(x + *dx, y + *dy),
            pen: pen.clone(),
        },
        DrawOp::Polyline { points, pen } => {
            if points.len() < 2 {
                return Err(PagewerkError::MalformedTree(format!(
                    "polyline with {} point(s)",
                    points.len()
                )));
            }
            DrawCommand::Polyline {
                points: points.iter().map(|&(px, py)| Point::new(x + px, y + py)).collect(),
                pen: pen.clone(),
            }
        }
        DrawOp::Text { font, text, indent } => DrawCommand::Text {
            x,
            y,
            font: font.clone(),
            text: text.clone(),
            indent: *indent,
        },
        DrawOp::Image { path, crop } => DrawCommand::Image {
            path: path.clone(),
            x,
            y,
            width: graphic.width,
            height: graphic.height,
            crop: *crop,
        },
    };
    Ok(command)
}

/// Replay flowed lines, starting a page whenever the sheet changes.
///
/// Each line's graphics are drawn relative to the line's top-left corner in
/// its column.
#[instrument(skip_all, fields(lines = lines.len()))]
pub fn render_lines(renderer: &mut dyn Renderer, lines: &[&Line]) -> Result<()> {
    let mut current: Option<&Arc<Sheet>> = None;
    let mut pages = 0usize;
    for line in lines {
        let sheet = &line.column.sheet;
        if !current.is_some_and(|c| Arc::ptr_eq(c, sheet)) {
            renderer.new_page(sheet.width, sheet.height)?;
            current = Some(sheet);
            pages += 1;
        }
        let x = line.column.x;
        let y = line.column.y + line.top();
        for node in &line.graphics {
            draw_node(renderer, node, x, y, 1)?;
        }
    }
    renderer.save()?;
    info!(pages, lines = lines.len(), "Lines rendered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose;
    use crate::flow::{Flow, FrameLayout, Region, SingleColumnLayout, Story, StoryOptions};
    use crate::model::Frame;
    use crate::recording::{RecordedCall, RecordingRenderer};
    use crate::render::Pen;
    use crate::test_utils::FixedFont;
    use crate::text::Greedy;
    use pagewerk_core::types::{Margins, PaperSize};
    use pagewerk_core::units::{mm, pt};

    fn boxed(w: f64, h: f64) -> Node {
        compose::rectangle(&Pen::default(), pt(w), pt(h)).unwrap()
    }

    #[test]
    fn offsets_accumulate_through_frames() {
        let inner = compose::framed(vec![boxed(5.0, 5.0).at(pt(1.0), pt(2.0))]).at(pt(10.0), pt(20.0));
        let outer = compose::framed(vec![inner]).at(pt(100.0), pt(200.0));
        let mut recorder = RecordingRenderer::new();
        recorder.new_page(pt(500.0), pt(500.0)).unwrap();
        draw_node(&mut recorder, &outer, Length::ZERO, Length::ZERO, 0).unwrap();
        let [_, RecordedCall::Draw(DrawCommand::Rectangle { x, y, .. })] = recorder.calls() else {
            panic!("unexpected calls: {:?}", recorder.calls());
        };
        assert_eq!((*x, *y), (pt(111.0), pt(222.0)));
    }

    #[test]
    fn pages_shift_children_by_content_origin() {
        let page = Page::new(PaperSize::A5, Margins::uniform(mm(10.0)), vec![boxed(5.0, 5.0)]);
        let mut recorder = RecordingRenderer::new();
        render_pages(&mut recorder, &[page.clone(), page]).unwrap();
        let calls = recorder.calls();
        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], RecordedCall::NewPage { .. }));
        let RecordedCall::Draw(DrawCommand::Rectangle { x, y, .. }) = &calls[1] else {
            panic!("expected a rectangle");
        };
        assert_eq!((*x, *y), (mm(10.0), mm(10.0)));
        assert!(matches!(calls[2], RecordedCall::NewPage { .. }));
        assert!(matches!(calls[4], RecordedCall::Save));
    }

    #[test]
    fn placed_page_offsets_its_content() {
        let page = Page::new(PaperSize::A5, Margins::uniform(Length::ZERO), vec![boxed(1.0, 1.0)]);
        let Node::Page(page) = Node::from(page).at(pt(30.0), pt(40.0)) else {
            panic!("expected a page");
        };
        let mut recorder = RecordingRenderer::new();
        render_pages(&mut recorder, &[page]).unwrap();
        let RecordedCall::Draw(DrawCommand::Rectangle { x, y, .. }) = &recorder.calls()[1] else {
            panic!("unexpected calls: {:?}", recorder.calls());
        };
        assert_eq!((*x, *y), (pt(30.0), pt(40.0)));
    }

    #[test]
    fn nested_page_is_malformed() {
        let inner = Page::new(PaperSize::A6, Margins::uniform(mm(5.0)), Vec::new()).named("inner");
        let tree = Node::Frame(Frame::new(vec![inner.into()], None, None));
        let mut recorder = RecordingRenderer::new();
        let err = draw_node(&mut recorder, &tree, Length::ZERO, Length::ZERO, 0).unwrap_err();
        assert!(matches!(err, PagewerkError::MalformedTree(ref m) if m.contains("inner")));
    }

    #[test]
    fn short_polyline_is_malformed() {
        let line = compose::polyline(&Pen::default(), vec![(pt(1.0), pt(1.0))]).unwrap();
        let Node::Graphic(graphic) = line else { panic!() };
        assert!(matches!(
            resolve(&graphic, Length::ZERO, Length::ZERO),
            Err(PagewerkError::MalformedTree(_))
        ));
    }

    #[test]
    fn line_endpoints_are_absolute() {
        let line = compose::line_to(&Pen::default(), pt(3.0), pt(-4.0)).unwrap().at(pt(1.0), pt(10.0));
        let Node::Graphic(graphic) = line else { panic!() };
        let DrawCommand::Line { start, end, .. } = resolve(&graphic, pt(100.0), Length::ZERO).unwrap() else {
            panic!("expected a line");
        };
        assert_eq!(start, Point::new(pt(101.0), pt(10.0)));
        assert_eq!(end, Point::new(pt(104.0), pt(6.0)));
    }

    #[test]
    fn lines_start_a_page_per_sheet() {
        let font = FixedFont::unit().shared();
        let policy = SingleColumnLayout::new(pt(50.0), pt(40.0), pt(5.0), pt(5.0), pt(3.0), pt(7.0)).unwrap();
        let mut flow = Flow::new(policy);
        let mut last = None;
        for word in ["a", "b", "c", "d"] {
            last = Some(flow.next_line(last, Length::ZERO, pt(10.0), vec![compose::text(&font, word)]).unwrap());
        }
        let lines = flow.unroll(None, last).unwrap();
        let mut recorder = RecordingRenderer::new();
        render_lines(&mut recorder, &lines).unwrap();

        let calls = recorder.calls();
        // Three lines on the first sheet, one on the second.
        let pages = calls.iter().filter(|c| matches!(c, RecordedCall::NewPage { .. })).count();
        assert_eq!(pages, 2);
        assert!(matches!(calls[0], RecordedCall::NewPage { .. }));
        assert!(matches!(calls[4], RecordedCall::NewPage { .. }));
        let RecordedCall::Draw(DrawCommand::Text { x, y, .. }) = &calls[2] else {
            panic!("expected text");
        };
        // Second line: column at (3, 5), line top at 10.
        assert_eq!((*x, *y), (pt(3.0), pt(15.0)));
        let RecordedCall::Draw(DrawCommand::Text { x, .. }) = &calls[5] else {
            panic!("expected text");
        };
        // Even column: outer margin on the left.
        assert_eq!(*x, pt(7.0));
        assert!(matches!(calls.last(), Some(RecordedCall::Save)));
    }

    #[test]
    fn regions_on_one_sheet_share_a_page() {
        let font = FixedFont::unit().shared();
        // Two regions per sheet, each holding two 10pt lines.
        let policy = FrameLayout::new(
            pt(100.0),
            pt(50.0),
            vec![
                Region::new(pt(5.0), pt(5.0), pt(40.0), pt(20.0)).unwrap(),
                Region::new(pt(55.0), pt(5.0), pt(40.0), pt(20.0)).unwrap(),
            ],
        )
        .unwrap();
        let mut flow = Flow::new(policy);
        let story = ["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .fold(Story::new(), |story, word| story.paragraph(&font, word));
        let last = story.run(&mut flow, &Greedy, StoryOptions::default(), None).unwrap();
        let lines = flow.unroll(None, last).unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5].column.id, 3);

        let mut recorder = RecordingRenderer::new();
        render_lines(&mut recorder, &lines).unwrap();
        // Three columns over two sheets: one page per sheet.
        assert_eq!(recorder.page_count(), 2);
        let calls = recorder.calls();
        assert!(matches!(calls[0], RecordedCall::NewPage { .. }));
        assert!(matches!(calls[5], RecordedCall::NewPage { .. }));
        let RecordedCall::Draw(DrawCommand::Text { x, y, .. }) = &calls[3] else {
            panic!("expected text");
        };
        // Third line: top of the second region.
        assert_eq!((*x, *y), (pt(55.0), pt(5.0)));
    }
}
