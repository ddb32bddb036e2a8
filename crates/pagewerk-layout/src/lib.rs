// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewerk-layout — The layout engine of Pagewerk.
//
// Provides the immutable draw-tree model and its composer, paragraph line
// breaking (first-fit and penalty-minimising), column/page flow under a
// pluggable policy with widow/orphan control, and the walker that drives a
// rendering backend from either a composed tree or flowed lines.

pub mod compose;
pub mod flow;
pub mod model;
pub mod pipeline;
pub mod recording;
pub mod render;
pub mod text;
pub mod walk;

#[cfg(test)]
mod test_utils;

// Re-export the primary types so callers can use `pagewerk_layout::Node` etc.
pub use flow::{Column, Flow, FrameLayout, LayoutPolicy, Line, LineId, Region, Sheet, SingleColumnLayout, Story};
pub use model::{DrawOp, Frame, Graphic, Node, Page};
pub use pipeline::{TypesetDocument, Typesetter};
pub use recording::{RecordedCall, RecordingRenderer};
pub use render::{Crop, DrawCommand, Font, FontMetrics, MetricsProvider, Pen, Point, Renderer, Rgb};
pub use text::{Greedy, Optimal, WrapStrategy};
pub use walk::{render_lines, render_pages};
