//! Text repair for pages that were decoded with the wrong encoding.
//!
//! Essay pages are read as windows-1252, but some of them were saved as
//! UTF-8, which turns `’` into `â€™`. The passes below undo that and
//! smooth over the other usual artifacts of old hand-written HTML.

use std::sync::LazyLock;

use encoding_rs::WINDOWS_1252;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static TERMINAL_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid escape regex"));

const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "\u{017F}t"),
    ('\u{FB06}', "st"),
    ('\u{0132}', "IJ"),
    ('\u{0133}', "ij"),
];

/// Run every repair pass, in order.
pub fn fix_text(input: &str) -> String {
    let text = TERMINAL_ESCAPE_RE.replace_all(input, "");
    let text = fix_mojibake(&text);
    let text = fix_c1_controls(&text);
    let text = fix_latin_ligatures(&text);
    let text = fix_character_width(&text);
    let text = uncurl_quotes(&text);
    let text = fix_line_breaks(&text);
    let text = remove_control_chars(&text);
    text.nfc().collect()
}

/// Re-decode runs of non-ASCII characters that are really UTF-8 bytes
/// which were read as windows-1252.
///
/// Each UTF-8 sequence inside a run is decoded on its own, so genuine
/// Latin-1 text such as `café` is left alone even when mojibake follows it.
pub fn fix_mojibake(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut run = Vec::new();
    for c in input.chars() {
        if !c.is_ascii() && cp1252_byte(c).is_some() {
            run.push(c);
            continue;
        }
        flush_run(&mut run, &mut out);
        out.push(c);
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<char>, out: &mut String) {
    // Every char in the run maps to exactly one byte.
    let bytes: Vec<u8> = run.iter().filter_map(|&c| cp1252_byte(c)).collect();
    let mut i = 0;
    while i < bytes.len() {
        let decoded = utf8_sequence_len(bytes[i])
            .and_then(|len| bytes.get(i..i + len))
            .and_then(|seq| std::str::from_utf8(seq).ok());
        match decoded {
            Some(decoded) => {
                let from: String = run[i..i + decoded.len()].iter().collect();
                tracing::debug!(from = %from, to = %decoded, "Repaired mojibake");
                out.push_str(decoded);
                i += decoded.len();
            }
            None => {
                out.push(run[i]);
                i += 1;
            }
        }
    }
    run.clear();
}

/// Length of the UTF-8 sequence a lead byte announces, for multi-byte leads.
fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// The windows-1252 byte for `c`, if it has one.
fn cp1252_byte(c: char) -> Option<u8> {
    let mut buf = [0u8; 4];
    let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    match (unmappable, &*bytes) {
        (false, [b]) => Some(*b),
        _ => None,
    }
}

/// C1 control characters almost always stand for the windows-1252
/// punctuation at the same byte value.
pub fn fix_c1_controls(input: &str) -> String {
    input
        .chars()
        .map(|c| match u32::from(c) {
            code @ 0x80..=0x9f => {
                let byte = [code as u8];
                let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(&byte);
                decoded.chars().next().unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

pub fn fix_latin_ligatures(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, expanded)) => out.push_str(expanded),
            None => out.push(c),
        }
    }
    out
}

/// Fold full-width ASCII forms and the ideographic space to plain ASCII.
pub fn fix_character_width(input: &str) -> String {
    input
        .chars()
        .map(|c| match u32::from(c) {
            0x3000 => ' ',
            code @ 0xff01..=0xff5e => char::from_u32(code - 0xfee0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn uncurl_quotes(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{02BC}' | '\u{2018}'..='\u{201B}' => '\'',
            '\u{201C}'..='\u{201F}' => '"',
            _ => c,
        })
        .collect()
}

pub fn fix_line_breaks(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace(&['\r', '\u{2028}', '\u{2029}', '\u{0085}'][..], "\n")
}

/// Drop control characters that have no place in a text document. Tab,
/// newline and form feed are kept.
pub fn remove_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{0000}'..='\u{0008}'
                    | '\u{000B}'
                    | '\u{000E}'..='\u{001F}'
                    | '\u{007F}'
                    | '\u{206A}'..='\u{206F}'
                    | '\u{FEFF}'
                    | '\u{FFF9}'..='\u{FFFC}'
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_mojibake_apostrophe() {
        assert_eq!(fix_mojibake("It\u{e2}\u{20ac}\u{2122}s"), "It\u{2019}s");
    }

    #[test]
    fn test_fix_mojibake_accent() {
        assert_eq!(fix_mojibake("caf\u{c3}\u{a9}"), "café");
    }

    #[test]
    fn test_fix_mojibake_leaves_latin1_alone() {
        assert_eq!(fix_mojibake("café naïve"), "café naïve");
    }

    #[test]
    fn test_fix_mojibake_after_latin1_char() {
        assert_eq!(fix_mojibake("\u{e9}\u{e2}\u{20ac}\u{2122}"), "\u{e9}\u{2019}");
        assert_eq!(fix_mojibake("caf\u{e9}\u{c3}\u{a9}"), "caf\u{e9}\u{e9}");
    }

    #[test]
    fn test_fix_mojibake_next_to_unmappable() {
        assert_eq!(fix_mojibake("\u{e2}\u{20ac}\u{201d}\u{27e8}"), "\u{2014}\u{27e8}");
    }

    #[test]
    fn test_fix_c1_controls() {
        assert_eq!(fix_c1_controls("don\u{92}t"), "don\u{2019}t");
    }

    #[test]
    fn test_fix_text_full_pipeline() {
        let input = "It\u{e2}\u{20ac}\u{2122}s \u{FB01}ne\r\n\u{FF21}\u{3000}b\u{0000}\x1b[31m";
        assert_eq!(fix_text(input), "It's fine\nA b");
    }

    #[test]
    fn test_fix_text_curly_quotes() {
        assert_eq!(fix_text("\u{201c}Hackers\u{201d} \u{2018}n\u{2019}"), "\"Hackers\" 'n'");
    }

    #[test]
    fn test_fix_text_composes() {
        assert_eq!(fix_text("e\u{0301}"), "é");
    }

    #[test]
    fn test_fix_text_keeps_markup() {
        let markup = "<p>\n <a href=\"https://paulgraham.com/x.html\">x</a>\n</p>\n";
        assert_eq!(fix_text(markup), markup);
    }
}
