//! PDF writer.
//!
//! Builds the `lopdf` object graph for a laid-out [`Document`]: one
//! Flate-compressed content stream per page, base-14 Helvetica faces with
//! WinAnsi encoding and one ExtGState per distinct text opacity.

use std::collections::BTreeMap;
use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, ObjectId, Stream, StringFormat};

use super::common::{format_report_date, sanitize_filename};
use super::metrics::{to_win_ansi, FontFace};
use super::page::{DrawOp, Document, Page, RectBox, TextRun};
use super::{LayoutError, RenderedArtifact};

/// Encode the document and wrap it as a base64 artifact.
pub fn serialize(document: &Document) -> Result<RenderedArtifact, LayoutError> {
    let bytes = encode_pdf(document)?;
    let filename = format!(
        "isis-report-{}.pdf",
        sanitize_filename(document.student_name(), "student")
    );

    log::info!(
        "Rendered {} ({} pages, {} bytes)",
        filename,
        document.page_count(),
        bytes.len()
    );

    Ok(RenderedArtifact {
        filename,
        page_count: document.page_count(),
        byte_len: bytes.len(),
        generated_on: format_report_date(document.generated_on()),
        pdf_base64: BASE64.encode(&bytes),
    })
}

/// Raw PDF bytes for the document.
pub fn encode_pdf(document: &Document) -> Result<Vec<u8>, LayoutError> {
    let mut pdf = lopdf::Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }

    let states = opacity_states(document);
    let mut ext_states = lopdf::Dictionary::new();
    for (bits, name) in &states {
        let alpha = f32::from_bits(*bits);
        let state_id = pdf.add_object(dictionary! {
            "Type" => "ExtGState",
            "ca" => alpha,
            "CA" => alpha,
        });
        ext_states.set(name.as_str(), state_id);
    }

    let resources_id = pdf.add_object(dictionary! {
        "Font" => fonts,
        "ExtGState" => ext_states,
    });

    let geometry = document.geometry();
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(document.page_count());
    for page in document.pages() {
        let content = page_content(page, geometry.height, &states);
        let encoded = content
            .encode()
            .map_err(|e| LayoutError::Pdf(e.to_string()))?;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded).map_err(LayoutError::Compress)?;
        let compressed = encoder.finish().map_err(LayoutError::Compress)?;

        let content_id = pdf.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            compressed,
        ));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                geometry.width.into(),
                geometry.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let theme = &document.theme;
    let info_id = pdf.add_object(dictionary! {
        "Title" => literal(&theme.document_title(document.student_name())),
        "Author" => literal(&theme.author),
        "Subject" => literal(&theme.subject),
        "Creator" => literal(&theme.creator),
    });
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| LayoutError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn literal(text: &str) -> Object {
    Object::String(to_win_ansi(text), StringFormat::Literal)
}

/// Graphics state name per distinct opacity below 1.0, keyed by `f32` bits.
fn opacity_states(document: &Document) -> BTreeMap<u32, String> {
    let mut states = BTreeMap::new();
    for run in document.pages().iter().flat_map(|p| p.texts()) {
        if run.opacity < 1.0 {
            let next = states.len() + 1;
            states
                .entry(run.opacity.to_bits())
                .or_insert_with(|| format!("GS{next}"));
        }
    }
    states
}

fn page_content(page: &Page, page_height: f32, states: &BTreeMap<u32, String>) -> Content {
    let mut content = Content { operations: vec![] };
    for op in page.ops() {
        match op {
            DrawOp::Rect(rect) => draw_rect(&mut content, rect, page_height),
            DrawOp::Text(run) => draw_text(&mut content, run, page_height, states),
        }
    }
    content
}

fn draw_rect(content: &mut Content, rect: &RectBox, page_height: f32) {
    let [fr, fg, fb] = rect.fill.unit();
    let [sr, sg, sb] = rect.stroke.unit();
    let y = page_height - (rect.y + rect.height);
    let ops = &mut content.operations;
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", vec![fr.into(), fg.into(), fb.into()]));
    ops.push(Operation::new("RG", vec![sr.into(), sg.into(), sb.into()]));
    ops.push(Operation::new("w", vec![1i64.into()]));
    ops.push(Operation::new(
        "re",
        vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
    ));
    ops.push(Operation::new("B", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

fn draw_text(
    content: &mut Content,
    run: &TextRun,
    page_height: f32,
    states: &BTreeMap<u32, String>,
) {
    if run.text.trim().is_empty() {
        return;
    }

    let state = if run.opacity < 1.0 {
        states.get(&run.opacity.to_bits())
    } else {
        None
    };

    let ops = &mut content.operations;
    if let Some(name) = state {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "gs",
            vec![Object::Name(name.as_bytes().to_vec())],
        ));
    }

    let [r, g, b] = run.color.unit();
    let baseline = page_height - (run.y + run.size * 0.8);
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![run.face.resource_name().into(), run.size.into()],
    ));
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new("Td", vec![run.x.into(), baseline.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(to_win_ansi(&run.text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));

    if state.is_some() {
        ops.push(Operation::new("Q", vec![]));
    }
}
