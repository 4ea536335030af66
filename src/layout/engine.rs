//! Report layout engine.
//!
//! Turns a student and report text into a [`Document`]: a cover page followed
//! by flowed section pages. Footers are left to
//! [`finalize`](super::finalize::finalize) because the page total is only
//! known once every section has been placed.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::common::*;
use super::content::{ReportContent, Section};
use super::metrics::{text_width, wrap_text, FontFace};
use super::page::{Document, Page, RectBox, TextRole, TextRun};
use super::theme::ReportTheme;
use super::{LayoutError, RenderedArtifact};
use crate::student::models::Student;

/// Stateless apart from its theme; one engine is shared by all requests.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    theme: Arc<ReportTheme>,
    geometry: PageGeometry,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(ReportTheme::default())
    }
}

impl LayoutEngine {
    pub fn new(theme: ReportTheme) -> Self {
        Self {
            theme: Arc::new(theme),
            geometry: PageGeometry::a4(),
        }
    }

    pub fn theme(&self) -> &ReportTheme {
        &self.theme
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Lay out and finalize in one go, dated today.
    pub fn render(&self, student: &Student, content: &str) -> Result<RenderedArtifact, LayoutError> {
        let document = self.layout(student, content)?;
        super::finalize::finalize(document)
    }

    pub fn layout(&self, student: &Student, content: &str) -> Result<Document, LayoutError> {
        self.layout_on(student, content, today())
    }

    /// Lay out the document with a fixed generation date.
    pub fn layout_on(
        &self,
        student: &Student,
        content: &str,
        generated_on: NaiveDate,
    ) -> Result<Document, LayoutError> {
        if student.name.trim().is_empty() {
            return Err(LayoutError::InvalidInput("student name is required".into()));
        }
        if content.trim().is_empty() {
            return Err(LayoutError::InvalidInput("report content is required".into()));
        }

        let sections = ReportContent::parse(content);
        log::debug!(
            "Laying out {} report sections for {}",
            sections.len(),
            student.name
        );

        let mut pages = vec![self.render_cover_page(student, generated_on)];
        pages.extend(self.layout_sections(sections.sections()));

        Ok(Document {
            pages,
            geometry: self.geometry,
            theme: self.theme.clone(),
            student_name: student.name.trim().to_string(),
            generated_on,
            footers_stamped: false,
        })
    }

    /// Page 1: title block, student information box and name watermark.
    pub fn render_cover_page(&self, student: &Student, generated_on: NaiveDate) -> Page {
        let theme = &self.theme;
        let geo = &self.geometry;
        let mut page = Page::new(1, geo.top());

        self.centered_line(
            &mut page,
            TextRole::Heading,
            &theme.product_title,
            FontFace::Bold,
            COVER_HEADING_FONT_SIZE,
            theme.primary,
        );
        page.advance(COVER_HEADING_FONT_SIZE * 1.2 + COVER_HEADING_FONT_SIZE);

        self.centered_line(
            &mut page,
            TextRole::Subtitle,
            &theme.product_subtitle,
            FontFace::Bold,
            COVER_SUBTITLE_FONT_SIZE,
            theme.gold,
        );
        page.advance(COVER_SUBTITLE_FONT_SIZE * 1.2 + 2.0 * COVER_SUBTITLE_FONT_SIZE);

        let box_y = page.cursor();
        let text_x = geo.margin + INFO_TEXT_INSET;
        page.push_rect(RectBox {
            x: geo.margin,
            y: box_y,
            width: INFO_BOX_WIDTH,
            height: INFO_BOX_HEIGHT,
            fill: theme.info_fill,
            stroke: theme.info_stroke,
        });
        page.push_text(TextRun {
            role: TextRole::InfoLabel,
            text: theme.info_label.clone(),
            x: text_x,
            y: box_y + 20.0,
            face: FontFace::Bold,
            size: INFO_LABEL_FONT_SIZE,
            color: theme.text,
            opacity: 1.0,
        });

        let info_lines = [
            format!("Name: {}", student.name.trim()),
            format!("Plan: {}", student.plan.trim()),
            format!("Generated: {}", format_report_date(generated_on)),
        ];
        for (i, line) in info_lines.into_iter().enumerate() {
            page.push_text(TextRun {
                role: TextRole::InfoLine,
                text: line,
                x: text_x,
                y: box_y + 50.0 + 20.0 * i as f32,
                face: FontFace::Regular,
                size: INFO_LINE_FONT_SIZE,
                color: theme.text,
                opacity: 1.0,
            });
        }
        page.advance(INFO_BOX_HEIGHT);

        let name = student.name.trim();
        let width = text_width(name, FontFace::Bold, WATERMARK_FONT_SIZE);
        page.push_text(TextRun {
            role: TextRole::Watermark,
            text: name.to_string(),
            x: (geo.width - width) / 2.0,
            y: WATERMARK_Y,
            face: FontFace::Bold,
            size: WATERMARK_FONT_SIZE,
            color: theme.watermark,
            opacity: WATERMARK_OPACITY,
        });

        page
    }

    /// Flow sections onto pages numbered from 2.
    pub fn layout_sections(&self, sections: &[Section]) -> Vec<Page> {
        let mut flow = SectionFlow::new(self.geometry, 2);

        let heading_width = text_width(
            &self.theme.content_heading,
            FontFace::Bold,
            CONTENT_HEADING_FONT_SIZE,
        );
        let top = self.geometry.top();
        flow.page.push_text(TextRun {
            role: TextRole::ContentHeading,
            text: self.theme.content_heading.clone(),
            x: self.geometry.centered_x(heading_width),
            y: top,
            face: FontFace::Bold,
            size: CONTENT_HEADING_FONT_SIZE,
            color: self.theme.primary,
            opacity: 1.0,
        });
        flow.page.advance(CONTENT_HEADING_ADVANCE);

        let width = self.geometry.content_width();
        for section in sections {
            if section.title.trim().is_empty() || section.body.trim().is_empty() {
                continue;
            }

            if flow.page.cursor() > flow.threshold {
                flow.break_page();
            }

            for line in wrap_text(&section.title, FontFace::Bold, SECTION_TITLE_FONT_SIZE, width) {
                flow.write_line(
                    TextRole::SectionTitle,
                    line,
                    FontFace::Bold,
                    SECTION_TITLE_FONT_SIZE,
                    SECTION_TITLE_LINE_HEIGHT,
                    self.theme.gold,
                );
            }
            flow.page.advance(SECTION_TITLE_GAP);

            for line in wrap_text(&section.body, FontFace::Regular, BODY_FONT_SIZE, width) {
                flow.write_line(
                    TextRole::BodyLine,
                    line,
                    FontFace::Regular,
                    BODY_FONT_SIZE,
                    BODY_LINE_HEIGHT,
                    self.theme.text,
                );
            }
            flow.page.advance(SECTION_SPACING);
        }

        flow.finish()
    }

    fn centered_line(
        &self,
        page: &mut Page,
        role: TextRole,
        text: &str,
        face: FontFace,
        size: f32,
        color: Color,
    ) {
        let width = text_width(text, face, size);
        let y = page.cursor();
        page.push_text(TextRun {
            role,
            text: text.to_string(),
            x: self.geometry.centered_x(width),
            y,
            face,
            size,
            color,
            opacity: 1.0,
        });
    }
}

/// Cursor state while flowing section content across pages.
struct SectionFlow {
    geometry: PageGeometry,
    threshold: f32,
    done: Vec<Page>,
    page: Page,
}

impl SectionFlow {
    fn new(geometry: PageGeometry, first_number: usize) -> Self {
        Self {
            geometry,
            threshold: geometry.overflow_threshold(),
            done: Vec::new(),
            page: Page::new(first_number, geometry.top()),
        }
    }

    fn break_page(&mut self) {
        let next = Page::new(self.page.number() + 1, self.geometry.top());
        let full = std::mem::replace(&mut self.page, next);
        log::trace!("Page {} full at y={:.1}", full.number(), full.cursor());
        self.done.push(full);
    }

    /// Place one wrapped line, breaking first if it would cross the threshold.
    fn write_line(
        &mut self,
        role: TextRole,
        text: String,
        face: FontFace,
        size: f32,
        line_height: f32,
        color: Color,
    ) {
        if self.page.cursor() + line_height > self.threshold {
            self.break_page();
        }
        if !text.is_empty() {
            self.page.push_text(TextRun {
                role,
                text,
                x: self.geometry.margin,
                y: self.page.cursor(),
                face,
                size,
                color,
                opacity: 1.0,
            });
        }
        self.page.advance(line_height);
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.page);
        self.done
    }
}

/// Year printed in the copyright notice.
pub(crate) fn copyright_year(document: &Document) -> i32 {
    document.generated_on().year()
}
