// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF renderer — draws layout output with `printpdf` 0.8.
//
// The layout engine addresses pages from the top-left corner with y growing
// downwards; PDF puts the origin bottom-left with y growing upwards. Every
// coordinate is flipped against the height of the page it lands on. Each
// page collects a `Vec<Op>`; the pages are handed to `PdfDocument` on save.
//
// With a crop margin every sheet grows by the margin on each side, content is
// shifted inwards by it, and trim marks are drawn in the margin.

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use pagewerk_core::PaperSize;
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::units::Length;
use pagewerk_layout::render::{Crop, Font, Pen, Point, Renderer, Rgb};
use printpdf::{
    Color, Line as PdfLine, LineCapStyle, LineJoinStyle, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage,
    PdfSaveOptions, PdfWarnMsg, Point as PdfPoint, Polygon, PolygonRing, Pt, RawImage, RawImageData,
    RawImageFormat, Rgb as PdfRgb, TextItem, WindingOrder, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::fonts::builtin_font;
use crate::image::load_rgb;

/// Segments used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 72;

/// Gap between the trim box and the inner end of each crop mark.
const CROP_MARK_OFFSET: f64 = 9.0;

/// Stroke width of crop marks, in points.
const CROP_MARK_WEIGHT: f64 = 0.25;

fn pt(length: Length) -> Pt {
    Pt(length.as_pt() as f32)
}

fn mm(length: Length) -> Mm {
    Mm(length.as_mm() as f32)
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb {
        r: f32::from(rgb.r) / 255.0,
        g: f32::from(rgb.g) / 255.0,
        b: f32::from(rgb.b) / 255.0,
        icc_profile: None,
    })
}

/// Identifies one decoded image: its file and crop as exact bit patterns.
type ImageKey = (PathBuf, Option<[u64; 4]>);

fn image_key(path: &Path, crop: Option<Crop>) -> ImageKey {
    let crop = crop.map(|c| [c.x.to_bits(), c.y.to_bits(), c.width.to_bits(), c.height.to_bits()]);
    (path.to_path_buf(), crop)
}

/// An embedded image and its pixel size.
#[derive(Debug, Clone)]
struct EmbeddedImage {
    id: XObjectId,
    width: u32,
    height: u32,
}

/// The page currently receiving draw calls.
struct OpenPage {
    /// Trimmed size, as requested by the caller.
    width: Length,
    height: Length,
    /// Crop margin on each side of the trimmed page.
    margin: Length,
    ops: Vec<Op>,
}

impl OpenPage {
    fn media_width(&self) -> Length {
        self.width + self.margin * 2.0
    }

    fn media_height(&self) -> Length {
        self.height + self.margin * 2.0
    }

    /// Top-left layout coordinates to PDF coordinates.
    fn flip(&self, x: Length, y: Length) -> PdfPoint {
        PdfPoint {
            x: pt(x + self.margin),
            y: pt(self.media_height() - self.margin - y),
        }
    }

    fn path(&self, points: impl IntoIterator<Item = (Length, Length)>) -> Vec<LinePoint> {
        points
            .into_iter()
            .map(|(x, y)| LinePoint {
                p: self.flip(x, y),
                bezier: false,
            })
            .collect()
    }

    /// Stroke and/or fill a path with `pen`, inside its own graphics state.
    fn paint(&mut self, points: Vec<LinePoint>, closed: bool, pen: &Pen) {
        let mode = match (pen.color.is_some(), closed && pen.fill.is_some()) {
            (true, true) => PaintMode::FillStroke,
            (false, true) => PaintMode::Fill,
            (true, false) => PaintMode::Stroke,
            (false, false) => return,
        };

        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetOutlineThickness { pt: pt(pen.width) });
        if let Some(stroke) = pen.color {
            self.ops.push(Op::SetOutlineColor { col: color(stroke) });
        }
        if let Some(fill) = pen.fill {
            self.ops.push(Op::SetFillColor { col: color(fill) });
        }
        self.ops.push(Op::SetLineCapStyle {
            cap: if pen.round_cap {
                LineCapStyle::Round
            } else {
                LineCapStyle::Butt
            },
        });
        self.ops.push(Op::SetLineJoinStyle {
            join: if pen.round_join {
                LineJoinStyle::Round
            } else {
                LineJoinStyle::Miter
            },
        });
        if closed {
            self.ops.push(Op::DrawPolygon {
                polygon: Polygon {
                    rings: vec![PolygonRing { points }],
                    mode,
                    winding_order: WindingOrder::NonZero,
                },
            });
        } else {
            self.ops.push(Op::DrawLine {
                line: PdfLine {
                    points,
                    is_closed: false,
                },
            });
        }
        self.ops.push(Op::RestoreGraphicsState);
    }

    /// Trim marks at the four corners, outside the trimmed page.
    fn draw_crop_marks(&mut self) {
        let offset = Length::from_pt(CROP_MARK_OFFSET);
        let m = self.margin;
        if m <= offset {
            return;
        }
        let pen = Pen {
            width: Length::from_pt(CROP_MARK_WEIGHT),
            ..Pen::default()
        };
        let (w, h) = (self.width, self.height);
        for x in [Length::ZERO, w] {
            let above = self.path([(x, -m), (x, -offset)]);
            self.paint(above, false, &pen);
            let below = self.path([(x, h + offset), (x, h + m)]);
            self.paint(below, false, &pen);
        }
        for y in [Length::ZERO, h] {
            let left = self.path([(-m, y), (-offset, y)]);
            self.paint(left, false, &pen);
            let right = self.path([(w + offset, y), (w + m, y)]);
            self.paint(right, false, &pen);
        }
    }
}

/// A [`Renderer`] producing a PDF document.
///
/// `save` serialises the document; the bytes are kept in memory and, when
/// the renderer was created with [`PdfRenderer::to_file`], also written to
/// that path. An image drawn more than once with the same crop is embedded
/// once.
pub struct PdfRenderer {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    current: Option<OpenPage>,
    output: Option<PathBuf>,
    bytes: Option<Vec<u8>>,
    crop_margin: Length,
    images: HashMap<ImageKey, EmbeddedImage>,
}

impl PdfRenderer {
    /// A renderer keeping its output in memory.
    pub fn new(title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            current: None,
            output: None,
            bytes: None,
            crop_margin: Length::ZERO,
            images: HashMap::new(),
        }
    }

    /// Grow every sheet by `margin` on each side and draw crop marks in it.
    /// Margins no wider than the mark offset (9pt) enlarge the sheet
    /// without marks.
    pub fn with_crop_margin(mut self, margin: Length) -> Self {
        self.crop_margin = margin.max(Length::ZERO);
        self
    }

    /// A renderer that writes its output to `path` on save.
    pub fn to_file(title: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
            ..Self::new(title)
        }
    }

    /// The serialised document, once saved.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.bytes
            .ok_or_else(|| PagewerkError::PdfError("document has not been saved".into()))
    }

    fn page(&mut self) -> Result<&mut OpenPage> {
        if self.bytes.is_some() {
            return Err(PagewerkError::PdfError("document already saved".into()));
        }
        self.current
            .as_mut()
            .ok_or_else(|| PagewerkError::PdfError("draw call before the first page".into()))
    }

    fn close_page(&mut self) {
        if let Some(page) = self.current.take() {
            debug!(page = self.pages.len() + 1, ops = page.ops.len(), "Page closed");
            self.pages.push(PdfPage::new(mm(page.media_width()), mm(page.media_height()), page.ops));
        }
    }

    /// The XObject for `path` under `crop`, decoding and adding it on first
    /// use.
    fn embed(&mut self, path: &Path, crop: Option<Crop>) -> Result<EmbeddedImage> {
        let key = image_key(path, crop);
        if let Some(image) = self.images.get(&key) {
            return Ok(image.clone());
        }
        let rgb = load_rgb(path, crop)?;
        let (width, height) = rgb.dimensions();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image = EmbeddedImage {
            id: self.doc.add_image(&raw),
            width,
            height,
        };
        debug!(path = %path.display(), embedded = self.images.len() + 1, "Image embedded");
        self.images.insert(key, image.clone());
        Ok(image)
    }
}

impl Renderer for PdfRenderer {
    fn new_page(&mut self, width: Length, height: Length) -> Result<()> {
        if self.bytes.is_some() {
            return Err(PagewerkError::PdfError("document already saved".into()));
        }
        self.close_page();
        let mut page = OpenPage {
            width,
            height,
            margin: self.crop_margin,
            ops: Vec::new(),
        };
        page.draw_crop_marks();
        self.current = Some(page);
        Ok(())
    }

    fn draw_rectangle(&mut self, x: Length, y: Length, width: Length, height: Length, pen: &Pen) -> Result<()> {
        let page = self.page()?;
        let corners = [(x, y), (x + width, y), (x + width, y + height), (x, y + height)];
        let points = page.path(corners);
        page.paint(points, true, pen);
        Ok(())
    }

    fn draw_ellipse(&mut self, x: Length, y: Length, width: Length, height: Length, pen: &Pen) -> Result<()> {
        let page = self.page()?;
        let (rx, ry) = (width / 2.0, height / 2.0);
        let (cx, cy) = (x + rx, y + ry);
        let outline = (0..ELLIPSE_SEGMENTS).map(|i| {
            let angle = TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
            (cx + rx * angle.cos(), cy + ry * angle.sin())
        });
        let points = page.path(outline);
        page.paint(points, true, pen);
        Ok(())
    }

    fn draw_line(&mut self, start: Point, end: Point, pen: &Pen) -> Result<()> {
        let page = self.page()?;
        let points = page.path([(start.x, start.y), (end.x, end.y)]);
        page.paint(points, false, pen);
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], pen: &Pen) -> Result<()> {
        let page = self.page()?;
        let points = page.path(points.iter().map(|p| (p.x, p.y)));
        page.paint(points, false, pen);
        Ok(())
    }

    fn draw_text(&mut self, x: Length, y: Length, font: &Font, text: &str, indent: Length) -> Result<()> {
        let builtin = builtin_font(font.face())?;
        let page = self.page()?;
        if text.is_empty() {
            return Ok(());
        }
        let baseline = page.flip(x + indent, y + font.ascent());
        page.ops.extend([
            Op::StartTextSection,
            Op::SetTextCursor { pos: baseline },
            Op::SetFontSizeBuiltinFont {
                size: Pt(font.point_size() as f32),
                font: builtin,
            },
            Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.to_owned())],
                font: builtin,
            },
            Op::EndTextSection,
        ]);
        Ok(())
    }

    fn draw_image(
        &mut self,
        path: &Path,
        x: Length,
        y: Length,
        width: Length,
        height: Length,
        crop: Option<Crop>,
    ) -> Result<()> {
        self.page()?;
        let image = self.embed(path, crop)?;
        let page = self.page()?;
        let corner = page.flip(x, y + height);

        // At 72 dpi one pixel is one point, so the scale is the target size
        // in points over the pixel count.
        let transform = XObjectTransform {
            translate_x: Some(corner.x),
            translate_y: Some(corner.y),
            scale_x: Some((width.as_pt() / f64::from(image.width)) as f32),
            scale_y: Some((height.as_pt() / f64::from(image.height)) as f32),
            dpi: Some(72.0),
            rotate: None,
        };
        page.ops.push(Op::UseXobject { id: image.id, transform });
        debug!(path = %path.display(), px_w = image.width, px_h = image.height, "Image placed");
        Ok(())
    }

    #[instrument(skip_all)]
    fn save(&mut self) -> Result<()> {
        if self.bytes.is_some() {
            return Err(PagewerkError::PdfError("document already saved".into()));
        }
        self.close_page();
        if self.pages.is_empty() {
            let (width, height) = PaperSize::A4.dimensions();
            self.pages.push(PdfPage::new(mm(width), mm(height), Vec::new()));
        }
        let pages = std::mem::take(&mut self.pages);
        let page_count = pages.len();
        self.doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        // The document is finished even if writing it out fails.
        let size = bytes.len();
        let bytes = self.bytes.insert(bytes);
        if let Some(path) = &self.output {
            std::fs::write(path, bytes.as_slice())?;
            info!(pages = page_count, bytes = size, "Wrote PDF to {}", path.display());
        } else {
            info!(pages = page_count, bytes = size, "PDF rendered");
        }
        Ok(())
    }
}
