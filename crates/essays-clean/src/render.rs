//! Pretty-printed serialization of a markup tree.
//!
//! One tag or line of text per output line, indented one space per nesting
//! level. Inline elements get no special treatment, so a date wrapped in
//! `<b>` still sits on a line of its own. Each line remembers whether it came
//! from inside a `<table>`, so the date search can ignore tables while still
//! pointing back into the exact text that gets written out.

use crate::markup::{Element, Markup};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const PREFORMATTED: &[&str] = &["pre", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub in_table: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    lines: Vec<Line>,
}

/// A window over the non-table lines of a rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub text: String,
    /// `source[i]` is the index in the full rendering of view line `i`.
    pub source: Vec<usize>,
}

impl LineView {
    /// Index (in the full rendering) of the view line containing byte `offset`.
    pub fn line_at(&self, offset: usize) -> usize {
        let view_line = self.text[..offset].matches('\n').count();
        self.source[view_line.min(self.source.len().saturating_sub(1))]
    }
}

pub fn render(root: &Element) -> Rendered {
    let mut rendered = Rendered::default();
    render_element(root, 0, false, &mut rendered.lines);
    rendered
}

impl Rendered {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The first `max_lines` lines that are not inside a table, joined by
    /// newlines.
    pub fn view_without_tables(&self, max_lines: usize) -> LineView {
        let source: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.in_table)
            .map(|(i, _)| i)
            .take(max_lines)
            .collect();
        let text = source
            .iter()
            .map(|&i| self.lines[i].text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        LineView { text, source }
    }

    /// Replace the non-table lines in `first..=last` with `replacement`,
    /// inserted where `first` was. Table lines in the range stay put.
    pub fn replace_lines(&mut self, first: usize, last: usize, replacement: Vec<String>) {
        let mut kept = Vec::with_capacity(self.lines.len() + replacement.len());
        for (i, line) in std::mem::take(&mut self.lines).into_iter().enumerate() {
            if i == first {
                kept.extend(replacement.iter().map(|text| Line {
                    text: text.clone(),
                    in_table: false,
                }));
            }
            if i >= first && i <= last && !line.in_table {
                continue;
            }
            kept.push(line);
        }
        self.lines = kept;
    }

    /// The serialized markup, newline-terminated.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

fn render_element(element: &Element, depth: usize, in_table: bool, lines: &mut Vec<Line>) {
    let indent = " ".repeat(depth);
    let in_table = in_table || element.is("table");
    let name = element.name.to_ascii_lowercase();
    let attrs = render_attrs(element);

    if VOID_ELEMENTS.contains(&name.as_str()) {
        push(lines, format!("{indent}<{name}{attrs}/>"), in_table);
        return;
    }

    if PREFORMATTED.contains(&name.as_str()) {
        let body = escape_text(&element.text());
        for text in format!("{indent}<{name}{attrs}>{body}</{name}>").split('\n') {
            push(lines, text.to_string(), in_table);
        }
        return;
    }

    push(lines, format!("{indent}<{name}{attrs}>"), in_table);
    let child_indent = " ".repeat(depth + 1);
    for child in &element.children {
        match child {
            Markup::Element(e) => render_element(e, depth + 1, in_table, lines),
            Markup::Text(t) => push_text(lines, t, &child_indent, in_table),
            Markup::Comment(c) => {
                for text in format!("{child_indent}<!--{c}-->").split('\n') {
                    push(lines, text.to_string(), in_table);
                }
            }
        }
    }
    push(lines, format!("{indent}</{name}>"), in_table);
}

fn push(lines: &mut Vec<Line>, text: String, in_table: bool) {
    lines.push(Line { text, in_table });
}

/// Push a text node, one line per source line. A `Line` never holds a
/// newline, so view offsets map back to lines by counting newlines.
fn push_text(lines: &mut Vec<Line>, text: &str, indent: &str, in_table: bool) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    for part in trimmed.split('\n') {
        let part = part.trim();
        let line = if part.is_empty() {
            String::new()
        } else {
            format!("{indent}{}", escape_text(part))
        };
        push(lines, line, in_table);
    }
}

fn render_attrs(element: &Element) -> String {
    element
        .attrs
        .iter()
        .map(|(k, v)| format!(" {k}=\"{}\"", escape_attr(v)))
        .collect()
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
