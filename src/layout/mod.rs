//! Layout module - turns a student and report text into a paginated PDF.
//!
//! - `content` - section parser for the delimited report text
//! - `engine` - cover page and section flow with overflow page breaks
//! - `finalize` - footer pass and hand-off to the PDF writer
//! - `pdf` - lopdf serialization and base64 artifact

pub mod common;
pub mod content;
pub mod engine;
pub mod finalize;
pub mod metrics;
pub mod page;
pub mod pdf;
pub mod theme;

pub use content::{ReportContent, Section};
pub use engine::LayoutEngine;
pub use finalize::{finalize, stamp_footers};
pub use page::{Document, DrawOp, Page, TextRole, TextRun};
pub use pdf::serialize;
pub use theme::ReportTheme;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while laying out or encoding a report.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid report input: {0}")]
    InvalidInput(String),
    #[error("failed to build PDF: {0}")]
    Pdf(String),
    #[error("failed to compress page content: {0}")]
    Compress(#[source] std::io::Error),
}

/// The finished report, ready to travel as a JSON string field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArtifact {
    pub filename: String,
    pub pdf_base64: String,
    pub page_count: usize,
    pub byte_len: usize,
    pub generated_on: String,
}
