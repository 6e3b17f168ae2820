/// Characters the LaTeX fonts downstream cannot render, and their stand-ins.
pub const CHAR_REPLACEMENTS: &[(char, char)] = &[
    ('\u{27E8}', '<'), // mathematical left angle bracket
    ('\u{27E9}', '>'), // mathematical right angle bracket
    ('\u{2248}', '~'), // almost equal to
    ('\u{0307}', '.'), // combining dot above
    ('\u{0300}', '`'), // combining grave accent
];

pub fn replace_unsupported_chars(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            CHAR_REPLACEMENTS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

/// Same table, for text that is still markup: the angle-bracket stand-ins
/// are written as entities so they stay text instead of turning into tags.
pub fn replace_unsupported_chars_in_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match CHAR_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, '<')) => out.push_str("&lt;"),
            Some((_, '>')) => out.push_str("&gt;"),
            Some((_, to)) => out.push(*to),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_flagged_chars_replaced() {
        let input = "\u{27E8}a\u{27E9} \u{2248} 3 x\u{0307} y\u{0300}";
        let output = replace_unsupported_chars(input);
        assert_eq!(output, "<a> ~ 3 x. y`");
        for (from, _) in CHAR_REPLACEMENTS {
            assert!(!output.contains(*from), "{from:?} survived");
        }
    }

    #[test]
    fn test_markup_variant_escapes_brackets() {
        let input = "<p>\u{27E8}x, y\u{27E9} \u{2248} 2</p>";
        assert_eq!(
            replace_unsupported_chars_in_markup(input),
            "<p>&lt;x, y&gt; ~ 2</p>"
        );
    }

    #[test]
    fn test_other_text_untouched() {
        let input = "Hackers & Painters, café, 1 < 2";
        assert_eq!(replace_unsupported_chars(input), input);
    }
}
