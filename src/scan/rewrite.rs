//! Text rewriting - strips invisible characters and replaces homoglyphs
//!
//! The pipeline runs in a fixed order on the whole file content:
//! 1. Remove every Unicode format character (general category `Cf`)
//! 2. Remove the explicit zero-width set
//! 3. Replace Cyrillic homoglyphs with their Latin look-alikes
//! 4. Convert line endings, if requested
//!
//! Homoglyph substitution runs after stripping so that a zero-width
//! character between letters never hides a homoglyph, and line endings are
//! converted last so they operate on otherwise-cleaned text.

use super::config::LineEnding;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static FORMAT_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Cf}+").expect("Cf class is a valid regex"));

/// Zero-width code points removed even if the category table disagrees
pub const ZERO_WIDTH_CHARS: [char; 5] = [
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{FEFF}', // zero width no-break space / BOM
    '\u{2060}', // word joiner
];

/// Cyrillic code points and the Latin letters they imitate
pub const HOMOGLYPHS: [(char, char); 14] = [
    ('\u{0430}', 'a'),
    ('\u{0410}', 'A'),
    ('\u{0435}', 'e'),
    ('\u{0415}', 'E'),
    ('\u{043E}', 'o'),
    ('\u{041E}', 'O'),
    ('\u{0440}', 'p'),
    ('\u{0420}', 'P'),
    ('\u{0441}', 's'),
    ('\u{0421}', 'S'),
    ('\u{0445}', 'x'),
    ('\u{0425}', 'X'),
    ('\u{0456}', 'i'),
    ('\u{0406}', 'I'),
];

/// Apply the full rewrite pipeline to `text`
pub fn transform(text: &str, line_ending: LineEnding) -> String {
    let text = strip_format_chars(text);
    let text = strip_zero_width(&text);
    let text = replace_homoglyphs(&text);
    convert_line_endings(&text, line_ending).into_owned()
}

pub fn strip_format_chars(text: &str) -> Cow<'_, str> {
    FORMAT_CHARS.replace_all(text, "")
}

pub fn strip_zero_width(text: &str) -> Cow<'_, str> {
    if !text.contains(ZERO_WIDTH_CHARS) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|c| !ZERO_WIDTH_CHARS.contains(c)).collect())
}

fn latin_for(c: char) -> Option<char> {
    HOMOGLYPHS
        .iter()
        .find_map(|&(cyrillic, latin)| (cyrillic == c).then_some(latin))
}

pub fn replace_homoglyphs(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| latin_for(c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(|c| latin_for(c).unwrap_or(c)).collect())
}

pub fn convert_line_endings(text: &str, line_ending: LineEnding) -> Cow<'_, str> {
    match line_ending {
        LineEnding::None => Cow::Borrowed(text),
        LineEnding::ToCrlf => to_crlf(text),
        LineEnding::ToLf => to_lf(text),
    }
}

fn to_crlf(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let has_lone_lf = bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'\n' && (i == 0 || bytes[i - 1] != b'\r'));
    if !has_lone_lf {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut prev = None;
    for c in text.chars() {
        if c == '\n' && prev != Some('\r') {
            out.push('\r');
        }
        out.push(c);
        prev = Some(c);
    }
    Cow::Owned(out)
}

// A run of carriage returns directly before a line feed collapses with it,
// so no `\r\n` pair can survive a single pass.
fn to_lf(text: &str) -> Cow<'_, str> {
    if !text.contains("\r\n") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\n' {
            while out.ends_with('\r') {
                out.pop();
            }
        }
        out.push(c);
    }
    Cow::Owned(out)
}
