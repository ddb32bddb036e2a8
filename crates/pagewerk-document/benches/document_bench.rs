// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pagewerk-document crate. Typesets a few pages
// of plain text with the base-14 metrics and renders them to an in-memory
// PDF.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pagewerk_core::LayoutConfig;
use pagewerk_document::{Base14Metrics, PdfRenderer};
use pagewerk_layout::Typesetter;

const SENTENCE: &str = "The flow engine threads each paragraph through facing columns, \
    moving lines across page boundaries in pairs where a single line would be stranded.";

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Typeset and render 120 paragraphs (several A4 pages).
fn bench_text_to_pdf(c: &mut Criterion) {
    let text = vec![SENTENCE; 120].join("\n");
    let setter = match Typesetter::from_config(&LayoutConfig::default(), &Base14Metrics) {
        Ok(setter) => setter,
        Err(err) => panic!("default configuration must load: {err}"),
    };

    c.bench_function("typeset + render PDF (120 paragraphs)", |b| {
        b.iter(|| {
            let mut pdf = PdfRenderer::new("bench");
            setter
                .typeset(black_box(&text))
                .and_then(|document| document.render(&mut pdf))
                .map(|()| pdf.bytes().map_or(0, <[u8]>::len))
        })
    });
}

criterion_group!(benches, bench_text_to_pdf);
criterion_main!(benches);
