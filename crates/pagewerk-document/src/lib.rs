// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewerk-document — PDF output for the Pagewerk layout engine.
//
// Provides the PDF rendering backend (printpdf), metrics for the base-14
// faces it draws with, and image probing/decoding for placed images.

pub mod fonts;
pub mod image;
pub mod pdf;

// Re-export the primary structs so callers can use `pagewerk_document::PdfRenderer` etc.
pub use fonts::{Base14Font, Base14Metrics};
pub use pdf::renderer::PdfRenderer;
