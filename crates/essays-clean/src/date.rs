use std::sync::LazyLock;

use regex::Regex;

use crate::render::Rendered;

/// Publication dates sit right under the region's opening tag.
pub const DATE_SEARCH_LINES: usize = 5;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\n\s*(?P<month>January|February|March|April|May|June|July|August|September|October|November|December)?\s*(?P<year>\d{4})\b(?P<rest>.*)",
    )
    .expect("valid date regex")
});

/// A publication date found in a rendered essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// `"March 1998"` or just `"1998"`.
    pub date: String,
    /// Whatever followed the year on the same line, trimmed.
    pub rest: String,
    /// First and last line (inclusive) of the full rendering covered by the match.
    pub first_line: usize,
    pub last_line: usize,
}

/// Search the first few non-table lines of `rendered` for a date line.
///
/// Tables are skipped because they often carry dates of their own
/// (translations, talk listings) that are not the publication date.
pub fn find_date(rendered: &Rendered) -> Option<DateMatch> {
    let view = rendered.view_without_tables(DATE_SEARCH_LINES);
    let caps = DATE_RE.captures(&view.text)?;
    let whole = caps.get(0)?;
    let year = caps.name("year")?.as_str();
    let date = match caps.name("month") {
        Some(month) => format!("{} {year}", month.as_str()),
        None => year.to_string(),
    };
    let rest = caps
        .name("rest")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    // The match opens on the newline that ends the previous line.
    let first_line = view.line_at(whole.start() + 1);
    let last_line = view.line_at(whole.end());

    Some(DateMatch {
        date,
        rest,
        first_line,
        last_line,
    })
}

/// Replace the matched date line with an `<h4>` heading holding the date,
/// followed by an empty line. Text that trailed the year stays in the body
/// on its own line.
pub fn promote_date(rendered: &mut Rendered, found: &DateMatch) {
    let indent: String = rendered
        .lines()
        .get(found.first_line)
        .map(|line| line.text.chars().take_while(|c| *c == ' ').collect())
        .unwrap_or_default();

    let mut replacement = vec![format!("{indent}<h4>{}</h4>", found.date)];
    replacement.push(String::new());
    if !found.rest.is_empty() {
        replacement.push(format!("{indent}{}", found.rest));
    }
    rendered.replace_lines(found.first_line, found.last_line, replacement);
}
