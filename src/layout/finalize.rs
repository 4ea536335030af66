//! Second layout pass: footers, then serialization.

use super::common::{COPYRIGHT_OFFSET, FOOTER_FONT_SIZE, PAGE_NUMBER_OFFSET};
use super::engine::copyright_year;
use super::metrics::{text_width, FontFace};
use super::page::{Document, TextRole, TextRun};
use super::{pdf, LayoutError, RenderedArtifact};

/// Stamp "Page i of N" on every page and the copyright notice on page 1.
///
/// N is read from the finished document, so this must run after every
/// section has been laid out. Running it twice is a no-op.
pub fn stamp_footers(document: &mut Document) {
    if document.footers_stamped {
        log::debug!("Footers already stamped, skipping");
        return;
    }

    let total = document.pages.len();
    let geometry = document.geometry;
    let theme = document.theme.clone();
    let copyright = theme.copyright_notice(copyright_year(document));

    for (index, page) in document.pages.iter_mut().enumerate() {
        let label = theme.page_label(index + 1, total);
        let width = text_width(&label, FontFace::Regular, FOOTER_FONT_SIZE);
        page.push_text(TextRun {
            role: TextRole::PageNumber,
            text: label,
            x: geometry.centered_x(width),
            y: geometry.height - PAGE_NUMBER_OFFSET,
            face: FontFace::Regular,
            size: FOOTER_FONT_SIZE,
            color: theme.footer,
            opacity: 1.0,
        });

        if index == 0 {
            let width = text_width(&copyright, FontFace::Regular, FOOTER_FONT_SIZE);
            page.push_text(TextRun {
                role: TextRole::Copyright,
                text: copyright.clone(),
                x: geometry.centered_x(width),
                y: geometry.height - COPYRIGHT_OFFSET,
                face: FontFace::Regular,
                size: FOOTER_FONT_SIZE,
                color: theme.footer,
                opacity: 1.0,
            });
        }
    }

    document.footers_stamped = true;
}

/// Stamp footers and encode the document. Consumes the document.
pub fn finalize(mut document: Document) -> Result<RenderedArtifact, LayoutError> {
    stamp_footers(&mut document);
    pdf::serialize(&document)
}
