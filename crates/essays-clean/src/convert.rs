use crate::render::escape_text;

/// LaTeX directives every essay document starts with.
pub const DOCUMENT_PREAMBLE: &str = "\\newpage\n\\noindent\n\n";

pub trait Converter {
    fn to_markdown(&self, html: &str) -> String;
}

/// Generic HTML to Markdown conversion with the converter's default rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Build the final Markdown document for one essay: the preamble, then the
/// converted title heading, source link and cleaned body.
pub fn build_document(
    converter: &dyn Converter,
    title: &str,
    url: &str,
    cleaned_markup: &str,
) -> String {
    let url = escape_text(url);
    let html = format!(
        "<h1>{title}</h1>\n<br/>\n<a href='{url}'>{url}</a>\n<br/>\n{cleaned_markup}",
        title = escape_text(title),
    );
    format!("{DOCUMENT_PREAMBLE}{}", converter.to_markdown(&html))
}
