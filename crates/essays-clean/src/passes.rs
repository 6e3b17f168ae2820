//! Structural cleanup passes over an essay's content region.
//!
//! Each pass mutates the owned tree in place. They are order-sensitive:
//! links are resolved before `<font>` wrappers disappear, and comments go
//! last so nothing they contain leaks into the date search.

use essays_model::join_origin;

use crate::markup::{Action, Element};

/// Resolve or drop every link under `root`.
///
/// - no `href`: unwrap, keeping the link text
/// - `href` starting with `#`: unwrap (in-page anchors mean nothing offline)
/// - relative `href`: prefix with `origin`
/// - absolute `href`: left untouched
pub fn rewrite_links(root: &mut Element, origin: &str) {
    root.rewrite_descendants(&mut |element| {
        if !element.is("a") {
            return Action::Keep;
        }
        let Some(href) = element.attr("href").map(str::to_string) else {
            return Action::Unwrap;
        };
        if href.starts_with('#') {
            return Action::Unwrap;
        }
        if !has_scheme(&href) {
            element.set_attr("href", join_origin(origin, &href));
        }
        Action::Keep
    });
}

/// Unwrap all `<font>` elements below the region root.
pub fn unwrap_fonts(root: &mut Element) {
    root.rewrite_descendants(&mut |element| {
        if element.is("font") {
            Action::Unwrap
        } else {
            Action::Keep
        }
    });
}

/// Delete all images.
pub fn remove_images(root: &mut Element) {
    root.rewrite_descendants(&mut |element| {
        if element.is("img") {
            Action::Remove
        } else {
            Action::Keep
        }
    });
}

/// Delete all comments, including their text.
pub fn remove_comments(root: &mut Element) {
    root.strip_comments();
}

/// Whether `href` carries its own scheme (`http:`, `https:`, `mailto:`, ...).
pub fn has_scheme(href: &str) -> bool {
    url::Url::parse(href.trim()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Markup;

    const ORIGIN: &str = "https://paulgraham.com";

    fn link(href: Option<&str>, text: &str) -> Markup {
        let mut a = Element::new("a").with_child(Markup::Text(text.into()));
        if let Some(h) = href {
            a = a.with_attr("href", h);
        }
        Markup::Element(a)
    }

    fn root_with(children: Vec<Markup>) -> Element {
        let mut root = Element::new("font").with_attr("face", "verdana");
        root.children = children;
        root
    }

    #[test]
    fn test_relative_link_gets_origin() {
        let mut root = root_with(vec![link(Some("avg.html"), "Beating the Averages")]);
        rewrite_links(&mut root, ORIGIN);
        let links = root.descendants_named("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr("href"), Some("https://paulgraham.com/avg.html"));
    }

    #[test]
    fn test_absolute_link_untouched() {
        let mut root = root_with(vec![
            link(Some("http://www.lisp.org/"), "Lisp"),
            link(Some("https://example.com/a?b=c"), "Example"),
            link(Some("mailto:someone@example.com"), "Mail"),
        ]);
        rewrite_links(&mut root, ORIGIN);
        let hrefs: Vec<_> = root
            .descendants_named("a")
            .iter()
            .filter_map(|a| a.attr("href"))
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "http://www.lisp.org/",
                "https://example.com/a?b=c",
                "mailto:someone@example.com",
            ]
        );
    }

    #[test]
    fn test_fragment_and_missing_href_become_text() {
        let mut root = root_with(vec![
            link(Some("#f1n"), "[1]"),
            Markup::Text(" and ".into()),
            link(None, "anchor"),
        ]);
        rewrite_links(&mut root, ORIGIN);
        assert!(root.descendants_named("a").is_empty());
        assert_eq!(root.text(), "[1] and anchor");
    }

    #[test]
    fn test_rewrite_is_stable_when_repeated() {
        let mut root = root_with(vec![link(Some("avg.html"), "x")]);
        rewrite_links(&mut root, ORIGIN);
        rewrite_links(&mut root, ORIGIN);
        assert_eq!(
            root.descendants_named("a")[0].attr("href"),
            Some("https://paulgraham.com/avg.html")
        );
    }

    #[test]
    fn test_unwrap_fonts_keeps_root_and_content() {
        let inner = Element::new("font")
            .with_attr("color", "#999999")
            .with_child(Markup::Text("Thanks to".into()));
        let mut root = root_with(vec![Markup::Element(inner)]);
        unwrap_fonts(&mut root);
        assert_eq!(root.name, "font");
        assert!(root.descendants_named("font").is_empty());
        assert_eq!(root.text(), "Thanks to");
    }

    #[test]
    fn test_remove_images_and_comments() {
        let img = Element::new("img").with_attr("src", "x.gif");
        let mut root = root_with(vec![
            Markup::Element(img),
            Markup::Comment("keep me?".into()),
            Markup::Text("body".into()),
        ]);
        remove_images(&mut root);
        remove_comments(&mut root);
        assert_eq!(root.children, vec![Markup::Text("body".into())]);
    }
}
