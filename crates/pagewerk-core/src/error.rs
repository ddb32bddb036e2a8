// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagewerk.

use thiserror::Error;

/// Top-level error type for all Pagewerk operations.
///
/// Every variant is fatal for the document being built: the engine never
/// retries or degrades, the caller decides how to report the failure.
#[derive(Debug, Error)]
pub enum PagewerkError {
    // -- Layout contract violations --
    #[error("dimension error: {what} must be a length, got {found}")]
    Dimension { what: String, found: String },

    #[error("malformed draw tree: {0}")]
    MalformedTree(String),

    #[error("line {end} is not reachable from {start} by following back-references")]
    UnreachableChain { start: String, end: String },

    #[error("{0} is not a line of this flow")]
    ForeignLine(String),

    #[error("unknown page size: {0}")]
    SizeResolution(String),

    // -- Collaborator errors --
    #[error("unknown font face: {0}")]
    UnknownFont(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PagewerkError {
    /// Build a [`PagewerkError::Dimension`] for the named field.
    pub fn dimension(what: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Dimension {
            what: what.into(),
            found: found.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagewerkError>;
