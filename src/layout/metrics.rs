//! Helvetica glyph widths and greedy word wrapping.
//!
//! Widths come from the base-14 AFM files, in 1/1000 em, and cover ASCII
//! 0x20..=0x7E. Text is written with WinAnsi encoding, so anything outside
//! Latin-1 is drawn (and measured) as `?`.

/// The two faces the report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Resource name the PDF writer registers the face under.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            FontFace::Regular => &HELVETICA,
            FontFace::Bold => &HELVETICA_BOLD,
        }
    }
}

/// Width used for Latin-1 characters above 0x7E.
const LATIN1_FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n-z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A-M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a-m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n-z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

/// Encode text the way the PDF writer emits it: Latin-1 code points pass
/// through, everything else becomes `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}

fn glyph_width(face: FontFace, byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => face.widths()[(byte - 0x20) as usize],
        0xA0..=0xFF => LATIN1_FALLBACK_WIDTH,
        _ => 0,
    }
}

/// Rendered width of `text` in points.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = to_win_ansi(text)
        .into_iter()
        .map(|b| glyph_width(face, b) as u32)
        .sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap.
///
/// Explicit newlines always start a new line and blank input lines come back
/// as empty strings. Words wider than `max_width` are split between
/// characters, which is also how unspaced scripts end up wrapping.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let space = text_width(" ", face, size);

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, face, size);

            if word_width > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = break_word(word, face, size, max_width);
                // The tail keeps collecting words like any other line.
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = text_width(&tail, face, size);
                current = tail;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn break_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for ch in word.chars() {
        let mut buf = [0u8; 4];
        let ch_width = text_width(ch.encode_utf8(&mut buf), face, size);
        if !piece.is_empty() && width + ch_width > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += ch_width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_uses_afm_units() {
        // "Hi" = 722 + 222 in Helvetica.
        let width = text_width("Hi", FontFace::Regular, 10.0);
        assert!((width - 9.44).abs() < 1e-4);
        assert!(text_width("Hi", FontFace::Bold, 10.0) > width);
    }

    #[test]
    fn test_non_latin_measures_as_question_mark() {
        assert_eq!(
            text_width("財", FontFace::Regular, 12.0),
            text_width("?", FontFace::Regular, 12.0)
        );
        assert_eq!(to_win_ansi("é財"), vec![0xE9, b'?']);
    }

    #[test]
    fn test_wrap_keeps_every_word_in_order() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
        let lines = wrap_text(&text, FontFace::Regular, 11.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontFace::Regular, 11.0) <= 200.0);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn test_wrap_respects_explicit_newlines_and_blank_lines() {
        let lines = wrap_text("first\n\nsecond", FontFace::Regular, 11.0, 400.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_breaks_long_unspaced_runs() {
        let text = "財".repeat(200);
        let lines = wrap_text(&text, FontFace::Regular, 11.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), text);
        for line in &lines {
            assert!(text_width(line, FontFace::Regular, 11.0) <= 100.0);
        }
    }
}
