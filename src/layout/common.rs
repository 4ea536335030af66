//! Common utilities for report layout.
//!
//! Page geometry, colours, spacing constants, date formatting and filename
//! sanitizing shared by the engine and the PDF writer.

use chrono::{Datelike, Local, NaiveDate};

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 50.0;

/// Fraction of the page height past which nothing more is written.
pub const OVERFLOW_FRACTION: f32 = 0.85;

pub const BODY_FONT_SIZE: f32 = 11.0;
pub const BODY_LINE_HEIGHT: f32 = 16.0;
pub const SECTION_TITLE_FONT_SIZE: f32 = 16.0;
pub const SECTION_TITLE_LINE_HEIGHT: f32 = 20.0;
/// Gap between the last title line and the first body line.
pub const SECTION_TITLE_GAP: f32 = 6.0;
pub const SECTION_SPACING: f32 = 20.0;

pub const CONTENT_HEADING_FONT_SIZE: f32 = 20.0;
pub const CONTENT_HEADING_ADVANCE: f32 = 48.0;

pub const COVER_HEADING_FONT_SIZE: f32 = 28.0;
pub const COVER_SUBTITLE_FONT_SIZE: f32 = 22.0;
pub const INFO_BOX_HEIGHT: f32 = 120.0;
pub const INFO_BOX_WIDTH: f32 = 495.0;
pub const INFO_TEXT_INSET: f32 = 20.0;
pub const INFO_LABEL_FONT_SIZE: f32 = 16.0;
pub const INFO_LINE_FONT_SIZE: f32 = 12.0;

pub const WATERMARK_FONT_SIZE: f32 = 60.0;
pub const WATERMARK_Y: f32 = 400.0;
pub const WATERMARK_OPACITY: f32 = 0.1;

pub const FOOTER_FONT_SIZE: f32 = 10.0;
/// Distance of the page number line from the bottom edge.
pub const PAGE_NUMBER_OFFSET: f32 = 30.0;
/// Distance of the copyright line from the bottom edge.
pub const COPYRIGHT_OFFSET: f32 = 50.0;

/// Page dimensions and margins, in points, with a top-down vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub const fn a4() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin: MARGIN,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn top(&self) -> f32 {
        self.margin
    }

    pub fn overflow_threshold(&self) -> f32 {
        self.height * OVERFLOW_FRACTION
    }

    /// X position that centres a run of `text_width` inside the margins.
    pub fn centered_x(&self, text_width: f32) -> f32 {
        self.margin + (self.content_width() - text_width) / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to the 0.0..=1.0 range PDF colour operators expect.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Today's date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Short date the way the zh-TW locale prints it (e.g. "2025/7/3").
pub fn format_report_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !last_dash && !result.is_empty()
        {
            result.push('-');
            last_dash = true;
        }
    }

    let result = result.trim_matches('-');
    if result.is_empty() {
        return fallback.to_string();
    }

    result.to_string()
}
