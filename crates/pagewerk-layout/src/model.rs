// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Draw-tree model — immutable positioned nodes.
//
// A `Node` is a `Frame` (positioned container), a `Graphic` (positioned leaf
// holding one primitive draw operation) or a `Page` (root carrying paper size
// and margins). Nodes are never mutated: `at` and `move_by` return a copy.
// Children are held in `Arc<[Node]>`, so copies share their subtrees.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use pagewerk_core::error::Result;
use pagewerk_core::types::{Margins, PaperSize};
use pagewerk_core::units::Length;

use crate::render::{Crop, Font, Pen};

/// The closed set of primitive draw operations, with their arguments.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Rectangle {
        pen: Pen,
    },
    Ellipse {
        pen: Pen,
    },
    /// A segment from the graphic origin to `(dx, dy)`.
    Line {
        dx: Length,
        dy: Length,
        pen: Pen,
    },
    /// Points relative to the graphic origin.
    Polyline {
        points: Vec<(Length, Length)>,
        pen: Pen,
    },
    Text {
        font: Font,
        text: String,
        indent: Length,
    },
    Image {
        path: PathBuf,
        crop: Option<Crop>,
    },
}

impl DrawOp {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Ellipse { .. } => "ellipse",
            Self::Line { .. } => "line",
            Self::Polyline { .. } => "polyline",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
        }
    }
}

/// A positioned leaf.
#[derive(Debug, Clone)]
pub struct Graphic {
    pub width: Length,
    pub height: Length,
    pub x: Length,
    pub y: Length,
    pub draw: DrawOp,
}

impl Graphic {
    /// A graphic with the given bounding box, at the parent origin.
    pub fn new(width: Length, height: Length, draw: DrawOp) -> Self {
        Self {
            width,
            height,
            x: Length::ZERO,
            y: Length::ZERO,
            draw,
        }
    }
}

/// A positioned container of already-positioned children.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: Length,
    pub height: Length,
    pub x: Length,
    pub y: Length,
    pub children: Arc<[Node]>,
    pub name: Option<String>,
}

impl Frame {
    /// Compose a frame at the parent origin. A missing width or height is
    /// the tight bounding box of the children.
    pub fn new(children: Vec<Node>, width: Option<Length>, height: Option<Length>) -> Self {
        let (fit_width, fit_height) = Self::bounding_box(&children);
        Self {
            width: width.unwrap_or(fit_width),
            height: height.unwrap_or(fit_height),
            x: Length::ZERO,
            y: Length::ZERO,
            children: children.into(),
            name: None,
        }
    }

    /// `(max(x + width), max(y + height))` over `children`; zero when empty.
    pub fn bounding_box(children: &[Node]) -> (Length, Length) {
        let right = children.iter().map(|c| c.x() + c.width()).reduce(Length::max);
        let bottom = children.iter().map(|c| c.y() + c.height()).reduce(Length::max);
        (right.unwrap_or(Length::ZERO), bottom.unwrap_or(Length::ZERO))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A page: the root of a drawable tree.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: Length,
    pub height: Length,
    pub x: Length,
    pub y: Length,
    pub margins: Margins,
    children: Arc<[Node]>,
    pub name: Option<String>,
}

impl Page {
    pub fn new(size: PaperSize, margins: Margins, children: Vec<Node>) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            x: Length::ZERO,
            y: Length::ZERO,
            margins,
            children: children.into(),
            name: None,
        }
    }

    /// A page whose size is looked up by table name (`"A4"`, `"Letter"` …).
    pub fn with_named_size(name: &str, margins: Margins, children: Vec<Node>) -> Result<Self> {
        Ok(Self::new(name.parse()?, margins, children))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Offset of the content area from the page origin.
    pub fn content_origin(&self) -> (Length, Length) {
        (self.margins.left, self.margins.top)
    }

    pub fn content_width(&self) -> Length {
        self.width - self.margins.horizontal()
    }

    pub fn content_height(&self) -> Length {
        self.height - self.margins.vertical()
    }

    /// Children shifted into the content area, produced as they are consumed.
    pub fn children(&self) -> impl Iterator<Item = Node> + '_ {
        let (dx, dy) = self.content_origin();
        self.children.iter().map(move |child| child.move_by(dx, dy))
    }

    /// Children as given, relative to the content origin.
    pub fn content(&self) -> &[Node] {
        &self.children
    }
}

/// Any node of a draw tree.
#[derive(Debug, Clone)]
pub enum Node {
    Frame(Frame),
    Graphic(Graphic),
    Page(Page),
}

impl Node {
    pub fn width(&self) -> Length {
        match self {
            Self::Frame(f) => f.width,
            Self::Graphic(g) => g.width,
            Self::Page(p) => p.width,
        }
    }

    pub fn height(&self) -> Length {
        match self {
            Self::Frame(f) => f.height,
            Self::Graphic(g) => g.height,
            Self::Page(p) => p.height,
        }
    }

    pub fn x(&self) -> Length {
        match self {
            Self::Frame(f) => f.x,
            Self::Graphic(g) => g.x,
            Self::Page(p) => p.x,
        }
    }

    pub fn y(&self) -> Length {
        match self {
            Self::Frame(f) => f.y,
            Self::Graphic(g) => g.y,
            Self::Page(p) => p.y,
        }
    }

    /// Display name: the frame or page name, or the graphic's draw kind.
    pub fn name(&self) -> &str {
        match self {
            Self::Frame(f) => f.name.as_deref().unwrap_or("-"),
            Self::Graphic(g) => g.draw.kind(),
            Self::Page(p) => p.name.as_deref().unwrap_or("-"),
        }
    }

    /// A copy placed at `(x, y)` in its parent.
    pub fn at(&self, x: Length, y: Length) -> Node {
        let mut node = self.clone();
        match &mut node {
            Self::Frame(f) => (f.x, f.y) = (x, y),
            Self::Graphic(g) => (g.x, g.y) = (x, y),
            Self::Page(p) => (p.x, p.y) = (x, y),
        }
        node
    }

    /// A copy moved by `(dx, dy)`.
    pub fn move_by(&self, dx: Length, dy: Length) -> Node {
        self.at(self.x() + dx, self.y() + dy)
    }
}

impl From<Frame> for Node {
    fn from(frame: Frame) -> Self {
        Self::Frame(frame)
    }
}

impl From<Graphic> for Node {
    fn from(graphic: Graphic) -> Self {
        Self::Graphic(graphic)
    }
}

impl From<Page> for Node {
    fn from(page: Page) -> Self {
        Self::Page(page)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Frame(_) => "Frame",
            Self::Graphic(_) => "Graphic",
            Self::Page(_) => "Page",
        };
        write!(
            f,
            "{kind} ({}) {:.1}×{:.1} @ {:.1},{:.1} [mm]",
            self.name(),
            self.width().as_mm(),
            self.height().as_mm(),
            self.x().as_mm(),
            self.y().as_mm(),
        )
    }
}
