// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pagewerk-layout crate: the two line-breaking
// strategies on one long paragraph, and a full story flowed into A4 pages.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pagewerk_core::{LayoutConfig, Length, pt};
use pagewerk_layout::flow::StoryOptions;
use pagewerk_layout::{Flow, FontMetrics, Greedy, Optimal, SingleColumnLayout, Story, WrapStrategy};

/// Six points per character, 12pt lines.
#[derive(Debug)]
struct BenchFont;

impl FontMetrics for BenchFont {
    fn face(&self) -> &str {
        "Bench"
    }

    fn point_size(&self) -> f64 {
        10.0
    }

    fn ascent(&self) -> Length {
        pt(9.0)
    }

    fn descent(&self) -> Length {
        pt(3.0)
    }

    fn height(&self) -> Length {
        pt(12.0)
    }

    fn leading(&self) -> Length {
        Length::ZERO
    }

    fn width_of(&self, text: &str) -> Length {
        pt(6.0 * text.chars().count() as f64)
    }
}

fn paragraph(words: usize) -> String {
    const VOCABULARY: [&str; 8] = ["the", "quick", "brown", "fox", "jumps", "over", "a", "lazy"];
    (0..words)
        .map(|i| VOCABULARY[i % VOCABULARY.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_wrap(c: &mut Criterion) {
    let text = paragraph(400);
    let font = BenchFont;

    c.bench_function("greedy wrap (400 words)", |b| {
        b.iter(|| Greedy.wrap(&font, black_box(&text), pt(300.0)))
    });

    let optimal = Optimal::default();
    c.bench_function("optimal wrap (400 words)", |b| {
        b.iter(|| optimal.wrap(&font, black_box(&text), pt(300.0)))
    });
}

/// Fifty paragraphs flowed into facing A4 columns with widow/orphan control.
fn bench_story(c: &mut Criterion) {
    let font: Arc<dyn FontMetrics> = Arc::new(BenchFont);
    let story = (0..50).fold(Story::new(), |story, i| story.paragraph(&font, paragraph(40 + i)));
    let policy = SingleColumnLayout::from_config(&LayoutConfig::default());

    c.bench_function("flow story (50 paragraphs)", |b| {
        b.iter(|| {
            let mut flow = Flow::new(policy.clone());
            story
                .run(&mut flow, &Greedy, StoryOptions::default(), None)
                .and_then(|last| flow.unroll(None, black_box(last)).map(|lines| lines.len()))
        })
    });
}

criterion_group!(benches, bench_wrap, bench_story);
criterion_main!(benches);
