use essays_model::EssayError;

pub mod charmap;
pub mod convert;
pub mod date;
pub mod markup;
pub mod passes;
pub mod render;
pub mod repair;

pub use convert::{build_document, Converter, Html2MdConverter};
pub use markup::{Element, Markup};

/// An essay body after every cleanup pass, ready for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedEssay {
    /// Publication date, e.g. `"March 1998"`.
    pub date: String,
    /// Pretty-printed markup with the date promoted to a heading.
    pub markup: String,
}

/// Clean an essay's content region.
///
/// Runs the passes in their fixed order: links, font wrappers, images,
/// comments, date promotion, encoding repair, character substitution.
/// Returns `EssayError::MissingDate` when no publication date is found near
/// the top of the essay; callers skip such essays.
pub fn clean_region(
    mut region: Element,
    origin: &str,
    title: &str,
) -> Result<CleanedEssay, EssayError> {
    passes::rewrite_links(&mut region, origin);
    passes::unwrap_fonts(&mut region);
    passes::remove_images(&mut region);
    passes::remove_comments(&mut region);

    let mut rendered = render::render(&region);
    let found = date::find_date(&rendered).ok_or_else(|| EssayError::MissingDate {
        title: title.to_string(),
    })?;
    tracing::debug!(date = %found.date, line = found.first_line, "Found publication date");
    date::promote_date(&mut rendered, &found);

    let markup = repair::fix_text(&rendered.to_markup());
    let markup = charmap::replace_unsupported_chars_in_markup(&markup);

    Ok(CleanedEssay {
        date: found.date,
        markup,
    })
}
