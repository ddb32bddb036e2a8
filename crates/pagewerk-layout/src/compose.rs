// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tree composer — builders that assemble draw trees.
//
// Every builder validates its geometric arguments with `require_length` /
// `optional_length`, so a bare number anywhere a length belongs is a
// `PagewerkError::Dimension`. Builders return nodes at the parent origin;
// position them with `Node::at` before composing them into a frame.

use std::path::PathBuf;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::{Length, Quantity, inch, optional_length, require_length};
use tracing::debug;

use crate::model::{DrawOp, Frame, Graphic, Node};
use crate::render::{Crop, Font, MetricsProvider, Pen};
use crate::text::WrapStrategy;

/// Resolution at which an image's native pixel size becomes its default
/// physical size.
pub const IMAGE_REFERENCE_DPI: f64 = 300.0;

// -- Containers ---------------------------------------------------------------

/// A frame around already-positioned children. A missing dimension is the
/// tight bounding box of the children.
pub fn frame<Q: Into<Quantity>>(children: Vec<Node>, width: Option<Q>, height: Option<Q>) -> Result<Node> {
    let width = optional_length(width, "frame width")?;
    let height = optional_length(height, "frame height")?;
    Ok(Frame::new(children, width, height).into())
}

/// A frame sized to its children.
pub fn framed(children: Vec<Node>) -> Node {
    Frame::new(children, None, None).into()
}

/// Empty space of the given size.
pub fn padding(width: impl Into<Quantity>, height: impl Into<Quantity>) -> Result<Node> {
    let width = require_length(width, "padding width")?;
    let height = require_length(height, "padding height")?;
    Ok(Frame::new(Vec::new(), Some(width), Some(height)).into())
}

/// Nodes one below the other with no gap; each keeps its own `x`.
pub fn stack(nodes: Vec<Node>) -> Node {
    let mut y = Length::ZERO;
    let children = nodes
        .into_iter()
        .map(|node| {
            let placed = node.at(node.x(), y);
            y += node.height();
            placed
        })
        .collect();
    framed(children)
}

/// `node` centred in a frame of the given outer size.
///
/// Content larger than the frame is clamped to the frame origin on that axis
/// and overflows to the right or bottom; the frame keeps its declared size.
pub fn center(node: Node, width: impl Into<Quantity>, height: impl Into<Quantity>) -> Result<Node> {
    let width = require_length(width, "centering width")?;
    let height = require_length(height, "centering height")?;
    let x = ((width - node.width()) / 2.0).max(Length::ZERO);
    let y = ((height - node.height()) / 2.0).max(Length::ZERO);
    if node.width() > width || node.height() > height {
        debug!(node = %node, "Centred content exceeds its frame; clamped to origin");
    }
    Ok(Frame::new(vec![node.at(x, y)], Some(width), Some(height)).into())
}

// -- Shapes -------------------------------------------------------------------

pub fn rectangle(pen: &Pen, width: impl Into<Quantity>, height: impl Into<Quantity>) -> Result<Node> {
    let width = require_length(width, "rectangle width")?;
    let height = require_length(height, "rectangle height")?;
    Ok(Graphic::new(width, height, DrawOp::Rectangle { pen: pen.clone() }).into())
}

/// An ellipse inscribed in the given box.
pub fn ellipse(pen: &Pen, width: impl Into<Quantity>, height: impl Into<Quantity>) -> Result<Node> {
    let width = require_length(width, "ellipse width")?;
    let height = require_length(height, "ellipse height")?;
    Ok(Graphic::new(width, height, DrawOp::Ellipse { pen: pen.clone() }).into())
}

/// A segment from the origin to `(end_x, end_y)`. The bounding box covers
/// the part of the segment right of and below the origin.
pub fn line_to(pen: &Pen, end_x: impl Into<Quantity>, end_y: impl Into<Quantity>) -> Result<Node> {
    let dx = require_length(end_x, "line end x")?;
    let dy = require_length(end_y, "line end y")?;
    Ok(Graphic::new(
        dx.max(Length::ZERO),
        dy.max(Length::ZERO),
        DrawOp::Line {
            dx,
            dy,
            pen: pen.clone(),
        },
    )
    .into())
}

/// A polyline through `points`, relative to the origin.
pub fn polyline<Q: Into<Quantity>>(pen: &Pen, points: Vec<(Q, Q)>) -> Result<Node> {
    let points = points
        .into_iter()
        .map(|(x, y)| Ok((require_length(x, "polyline x")?, require_length(y, "polyline y")?)))
        .collect::<Result<Vec<_>>>()?;
    let width = points.iter().map(|p| p.0).fold(Length::ZERO, Length::max);
    let height = points.iter().map(|p| p.1).fold(Length::ZERO, Length::max);
    Ok(Graphic::new(
        width,
        height,
        DrawOp::Polyline {
            points,
            pen: pen.clone(),
        },
    )
    .into())
}

// -- Text ---------------------------------------------------------------------

fn text_graphic(font: &Font, string: &str, width: Length, height: Length, indent: Length) -> Node {
    Graphic::new(
        width,
        height,
        DrawOp::Text {
            font: font.clone(),
            text: string.to_owned(),
            indent,
        },
    )
    .into()
}

/// How a run of text is sized.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Widen the graphic to this column, the glyphs centred within it. A run
    /// wider than the column keeps its own width and is not indented.
    pub center_of: Option<Quantity>,
    /// Only as tall as the font's ascent.
    pub shrink_to_ascent: bool,
}

/// One run of text, as wide as the font measures it and one line tall.
pub fn text(font: &Font, string: &str) -> Node {
    text_graphic(font, string, font.width_of(string), font.height(), Length::ZERO)
}

/// A run of text sized by `options`.
pub fn text_with(font: &Font, string: &str, options: TextOptions) -> Result<Node> {
    let natural = font.width_of(string);
    let height = if options.shrink_to_ascent {
        font.ascent()
    } else {
        font.height()
    };
    let (width, indent) = match optional_length(options.center_of, "centering width")? {
        Some(column) => (column.max(natural), ((column - natural) / 2.0).max(Length::ZERO)),
        None => (natural, Length::ZERO),
    };
    Ok(text_graphic(font, string, width, height, indent))
}

/// Like [`text`], but only as tall as the font's ascent.
pub fn ascent_text(font: &Font, string: &str) -> Node {
    text_graphic(font, string, font.width_of(string), font.ascent(), Length::ZERO)
}

/// A run of text widened to `column_width`, centred within it.
pub fn centered_text(font: &Font, string: &str, column_width: impl Into<Quantity>) -> Result<Node> {
    text_with(
        font,
        string,
        TextOptions {
            center_of: Some(column_width.into()),
            shrink_to_ascent: false,
        },
    )
}

/// A paragraph broken with `strategy`: one text line per group, stacked,
/// each `font.height()` tall.
pub fn paragraph(
    font: &Font,
    string: &str,
    width: impl Into<Quantity>,
    strategy: &dyn WrapStrategy,
) -> Result<Node> {
    let width = require_length(width, "paragraph width")?;
    let mut y = Length::ZERO;
    let mut children = Vec::new();
    for words in strategy.wrap(font.as_ref(), string, width) {
        children.push(text(font, &words.join(" ")).at(Length::ZERO, y));
        y += font.height();
    }
    Ok(Frame::new(children, Some(width), Some(y)).into())
}

// -- Images -------------------------------------------------------------------

/// An image. With neither dimension given it takes its native pixel size at
/// [`IMAGE_REFERENCE_DPI`]; with one given the other follows the aspect
/// ratio.
pub fn image<Q: Into<Quantity>>(
    provider: &dyn MetricsProvider,
    path: impl Into<PathBuf>,
    width: Option<Q>,
    height: Option<Q>,
) -> Result<Node> {
    image_with_crop(provider, path, width, height, None)
}

/// Like [`image`], showing only the `crop` region of the source; the native
/// size is the size of that region.
pub fn image_with_crop<Q: Into<Quantity>>(
    provider: &dyn MetricsProvider,
    path: impl Into<PathBuf>,
    width: Option<Q>,
    height: Option<Q>,
    crop: Option<Crop>,
) -> Result<Node> {
    let path = path.into();
    let width = optional_length(width, "image width")?;
    let height = optional_length(height, "image height")?;

    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (width, height) => {
            let (px_w, px_h) = provider.peek_image(&path)?;
            if px_w == 0 || px_h == 0 {
                return Err(PagewerkError::ImageError(format!(
                    "{} has no pixels",
                    path.display()
                )));
            }
            let (crop_w, crop_h) = crop.map_or((1.0, 1.0), |c| (c.width, c.height));
            let native_w = f64::from(px_w) * crop_w;
            let native_h = f64::from(px_h) * crop_h;
            match (width, height) {
                (Some(w), None) => (w, w * (native_h / native_w)),
                (None, Some(h)) => (h * (native_w / native_h), h),
                _ => (
                    inch(native_w / IMAGE_REFERENCE_DPI),
                    inch(native_h / IMAGE_REFERENCE_DPI),
                ),
            }
        }
    };
    Ok(Graphic::new(width, height, DrawOp::Image { path, crop }).into())
}
