// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typesetting pipeline — plain text to rendered pages in one pass:
// wrap, flow, unroll, render.

use std::sync::Arc;

use pagewerk_core::config::LayoutConfig;
use pagewerk_core::error::Result;
use tracing::{info, instrument};

use crate::flow::{Flow, Line, LineId, SingleColumnLayout, Story, StoryOptions};
use crate::render::{Font, MetricsProvider, Renderer};
use crate::text::{WrapStrategy, strategy_for};
use crate::walk;

/// Typesets stories with one body font into facing single-column pages.
#[derive(Debug)]
pub struct Typesetter {
    policy: SingleColumnLayout,
    font: Font,
    strategy: Box<dyn WrapStrategy>,
    options: StoryOptions,
}

impl Typesetter {
    /// Build from a validated configuration, loading the body font from
    /// `metrics`.
    #[instrument(skip_all, fields(face = %config.body_face, size = config.body_size))]
    pub fn from_config(config: &LayoutConfig, metrics: &dyn MetricsProvider) -> Result<Self> {
        config.validate()?;
        let font = metrics.font(&config.body_face, config.body_size)?;
        Ok(Self {
            policy: SingleColumnLayout::from_config(config),
            font,
            strategy: strategy_for(config),
            options: StoryOptions {
                avoid_widows_and_orphans: config.avoid_widows_and_orphans,
            },
        })
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// One paragraph per input line; a blank line is an empty paragraph.
    pub fn story(&self, text: &str) -> Story {
        text.lines()
            .fold(Story::new(), |story, line| story.paragraph(&self.font, line.trim()))
    }

    /// Flow plain text.
    pub fn typeset(&self, text: &str) -> Result<TypesetDocument> {
        self.typeset_story(&self.story(text))
    }

    /// Flow a prepared story.
    #[instrument(skip_all, fields(blocks = story.len()))]
    pub fn typeset_story(&self, story: &Story) -> Result<TypesetDocument> {
        let mut flow = Flow::new(self.policy.clone());
        let last = story.run(&mut flow, self.strategy.as_ref(), self.options, None)?;
        let document = TypesetDocument { flow, last };
        info!(lines = document.flow.len(), pages = document.page_count(), "Story typeset");
        Ok(document)
    }
}

/// The result of a typesetting pass, ready to render.
#[derive(Debug)]
pub struct TypesetDocument {
    flow: Flow<SingleColumnLayout>,
    last: Option<LineId>,
}

impl TypesetDocument {
    /// Every line in flow order.
    pub fn lines(&self) -> Result<Vec<&Line>> {
        self.flow.unroll(None, self.last)
    }

    /// Number of sheets the lines occupy.
    pub fn page_count(&self) -> usize {
        let Ok(lines) = self.lines() else {
            return 0;
        };
        let mut pages = 0;
        let mut previous = None;
        for line in lines {
            let sheet = &line.column.sheet;
            if !previous.is_some_and(|p| Arc::ptr_eq(p, sheet)) {
                pages += 1;
                previous = Some(sheet);
            }
        }
        pages
    }

    /// Drive `renderer` over the flowed lines and finalise it.
    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<()> {
        walk::render_lines(renderer, &self.lines()?)
    }
}
