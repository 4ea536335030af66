//! Branding text and colours of the report.

use super::common::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTheme {
    pub product_title: String,
    pub product_subtitle: String,
    pub content_heading: String,
    pub info_label: String,
    pub copyright_holder: String,
    /// Goes into the PDF Info dictionary as Author.
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub primary: Color,
    pub gold: Color,
    pub text: Color,
    pub footer: Color,
    pub watermark: Color,
    pub info_fill: Color,
    pub info_stroke: Color,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            product_title: "Isis DNA Awakening".to_string(),
            product_subtitle: "Wealth DNA Code Report".to_string(),
            content_heading: "Your Personal Wealth DNA Report".to_string(),
            info_label: "Student Information".to_string(),
            copyright_holder: "Isis".to_string(),
            author: "Isis".to_string(),
            subject: "Wealth DNA Awakening Report".to_string(),
            creator: "Isis DNA Awakening System".to_string(),
            primary: Color::rgb(0x4A, 0x14, 0x8C),
            gold: Color::rgb(0xFF, 0xD7, 0x00),
            text: Color::rgb(0x33, 0x33, 0x33),
            footer: Color::rgb(0x66, 0x66, 0x66),
            watermark: Color::rgb(0xF0, 0xF0, 0xF0),
            info_fill: Color::rgb(0xF8, 0xF9, 0xFA),
            info_stroke: Color::rgb(0xDD, 0xDD, 0xDD),
        }
    }
}

impl ReportTheme {
    pub fn document_title(&self, student_name: &str) -> String {
        format!("{} Report - {}", self.product_title, student_name)
    }

    pub fn page_label(&self, current: usize, total: usize) -> String {
        format!("Page {current} of {total}")
    }

    pub fn copyright_notice(&self, year: i32) -> String {
        format!(
            "\u{a9} {year} {} - This report is personal and exclusive, please do not share",
            self.copyright_holder
        )
    }
}
