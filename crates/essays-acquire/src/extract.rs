use essays_clean::Element;
use essays_model::EssayError;
use scraper::{ElementRef, Html, Selector};

/// Locates the essay body inside a fetched page.
///
/// This is the only piece that knows the source site's markup. Swap the
/// rule and the cleaning, conversion and writing stages keep working.
pub trait ContentRule {
    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;

    /// Short description used in error messages.
    fn describe(&self) -> String;
}

/// First `<font>` element with a given `face` attribute.
#[derive(Debug, Clone)]
pub struct FontFaceRule {
    face: String,
}

impl FontFaceRule {
    pub fn new(face: impl Into<String>) -> Self {
        Self { face: face.into() }
    }
}

impl ContentRule for FontFaceRule {
    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let font_sel = Selector::parse("font").expect("valid selector");
        document
            .select(&font_sel)
            .find(|font| font.value().attr("face") == Some(self.face.as_str()))
    }

    fn describe(&self) -> String {
        format!("<font face=\"{}\">", self.face)
    }
}

/// Parse `html` and copy out the content region.
pub fn extract_region(
    html: &str,
    url: &str,
    rule: &dyn ContentRule,
) -> Result<Element, EssayError> {
    let document = Html::parse_document(html);
    let region = rule.locate(&document).ok_or_else(|| EssayError::MissingContent {
        url: url.to_string(),
        rule: rule.describe(),
    })?;
    Ok(Element::from_scraper(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_face_rule_picks_matching_font() {
        let html = r#"
        <html><body>
        <font size="1" face="arial">Navigation</font>
        <font size="2" face="verdana">July 2004<br><br>Essay body.</font>
        </body></html>
        "#;
        let region = extract_region(html, "https://paulgraham.com/x.html", &FontFaceRule::new("verdana"))
            .unwrap();
        assert_eq!(region.attr("face"), Some("verdana"));
        assert!(region.text().contains("Essay body."));
        assert!(!region.text().contains("Navigation"));
    }

    #[test]
    fn test_missing_region_is_an_error() {
        let html = "<html><body><p>Moved.</p></body></html>";
        let err = extract_region(html, "https://paulgraham.com/x.html", &FontFaceRule::new("verdana"))
            .unwrap_err();
        assert_eq!(
            err,
            EssayError::MissingContent {
                url: "https://paulgraham.com/x.html".into(),
                rule: "<font face=\"verdana\">".into(),
            }
        );
        assert!(!err.is_recoverable());
    }
}
