//! Laid-out pages: positioned draw operations plus a vertical cursor.

use std::sync::Arc;

use chrono::NaiveDate;

use super::common::{Color, PageGeometry};
use super::metrics::FontFace;
use super::theme::ReportTheme;

/// What a text run is on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Heading,
    Subtitle,
    InfoLabel,
    InfoLine,
    Watermark,
    ContentHeading,
    SectionTitle,
    BodyLine,
    PageNumber,
    Copyright,
}

/// A single line of text. `y` is the top of the line, measured down from
/// the top edge of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub role: TextRole,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
}

/// A filled and stroked rectangle, top-down coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RectBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Color,
    pub stroke: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Rect(RectBox),
}

#[derive(Debug, Clone)]
pub struct Page {
    number: usize,
    cursor: f32,
    ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(number: usize, top: f32) -> Self {
        Self {
            number,
            cursor: top,
            ops: Vec::new(),
        }
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn advance(&mut self, amount: f32) {
        self.cursor += amount;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn push_text(&mut self, run: TextRun) {
        self.ops.push(DrawOp::Text(run));
    }

    pub fn push_rect(&mut self, rect: RectBox) {
        self.ops.push(DrawOp::Rect(rect));
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            DrawOp::Rect(_) => None,
        })
    }

    pub fn texts_with_role(&self, role: TextRole) -> impl Iterator<Item = &TextRun> {
        self.texts().filter(move |run| run.role == role)
    }
}

/// Per-request document built by the layout engine and consumed by
/// [`finalize`](super::finalize::finalize).
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) pages: Vec<Page>,
    pub(crate) geometry: PageGeometry,
    pub(crate) theme: Arc<ReportTheme>,
    pub(crate) student_name: String,
    pub(crate) generated_on: NaiveDate,
    pub(crate) footers_stamped: bool,
}

impl Document {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn footers_stamped(&self) -> bool {
        self.footers_stamped
    }

    /// Section titles in page order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.texts_with_role(TextRole::SectionTitle))
            .map(|run| run.text.as_str())
            .collect()
    }

    /// Body lines in page order.
    pub fn body_lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.texts_with_role(TextRole::BodyLine))
            .map(|run| run.text.as_str())
            .collect()
    }
}
