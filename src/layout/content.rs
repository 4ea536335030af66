//! Report content model.
//!
//! Report text arrives as one blob. Sections are separated by delimiter
//! lines made only of `=` characters (at least [`DELIMITER_MIN_LEN`]). The
//! first non-blank line of a section is its title, the rest is its body.

use lazy_static::lazy_static;
use regex::Regex;

pub const DELIMITER_MIN_LEN: usize = 24;

lazy_static! {
    static ref DELIMITER_LINE: Regex =
        Regex::new(&format!(r"^\s*={{{},}}\s*$", DELIMITER_MIN_LEN)).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Ordered sections parsed from a report blob. Segments with an empty title
/// or an empty body are dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContent {
    sections: Vec<Section>,
}

impl ReportContent {
    pub fn parse(raw: &str) -> Self {
        let mut sections = Vec::new();
        let mut segment: Vec<&str> = Vec::new();

        for line in raw.lines() {
            if DELIMITER_LINE.is_match(line) {
                sections.extend(parse_segment(&segment));
                segment.clear();
            } else {
                segment.push(line);
            }
        }
        sections.extend(parse_segment(&segment));

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn parse_segment(lines: &[&str]) -> Option<Section> {
    let start = lines.iter().position(|line| !line.trim().is_empty())?;
    let title = lines[start].trim();
    let body = lines[start + 1..].join("\n");
    let body = body.trim();

    if title.is_empty() || body.is_empty() {
        log::debug!("Skipping report section without title or body");
        return None;
    }

    Some(Section {
        title: title.to_string(),
        body: body.to_string(),
    })
}
