use anyhow::Result;
use essays_clean::{build_document, clean_region, Converter, Html2MdConverter};
use essays_model::naming::output_file_name;
use essays_model::{EssayError, ListingEntry, OutputConfig, RunSummary, SiteConfig};

use crate::extract::{extract_region, ContentRule, FontFaceRule};
use crate::fetch::Fetcher;
use crate::index;
use crate::output::{self, EssayWriter};

/// One essay, converted and named, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedEssay {
    pub file_name: String,
    pub date: String,
    pub markdown: String,
}

/// Turn one fetched essay page into its output document.
///
/// `index` is the entry's 1-based position in the listing.
pub fn process_page(
    index: usize,
    entry: &ListingEntry,
    html: &str,
    rule: &dyn ContentRule,
    converter: &dyn Converter,
    origin: &str,
) -> Result<ConvertedEssay, EssayError> {
    let region = extract_region(html, &entry.url, rule)?;
    let cleaned = clean_region(region, origin, &entry.title)?;
    let markdown = build_document(converter, &entry.title, &entry.url, &cleaned.markup);
    Ok(ConvertedEssay {
        file_name: output_file_name(index, &cleaned.date, &entry.title),
        date: cleaned.date,
        markdown,
    })
}

/// Fetch, clean, convert and write every listed essay, then the manifest.
///
/// Essays are handled one at a time in listing order. A missing date skips
/// that essay; any other failure ends the run before the manifest is
/// written, leaving already-written essays in place.
pub async fn run(site: &SiteConfig, output: &OutputConfig) -> Result<RunSummary> {
    let fetcher = Fetcher::new(&site.user_agent)?;
    let rule = FontFaceRule::new(&site.content_face);
    let converter = Html2MdConverter;

    let entries = index::fetch_listing(&fetcher, site).await?;
    let writer = EssayWriter::new(&output.output_dir)?;
    let mut summary = RunSummary {
        listed: entries.len(),
        manifest_path: output.manifest_path.clone(),
        ..RunSummary::default()
    };

    let limit = output.limit.unwrap_or(usize::MAX);
    for (i, entry) in entries.iter().enumerate().take(limit) {
        let index = i + 1;
        tracing::info!(index, title = %entry.title, url = %entry.url, "Processing essay");

        let html = fetcher.fetch_legacy(&entry.url).await?;
        match process_page(index, entry, &html, &rule, &converter, &site.origin) {
            Ok(essay) => {
                tracing::debug!(date = %essay.date, file = %essay.file_name, "Converted essay");
                let path = writer.write(&essay.file_name, &essay.markdown)?;
                summary.written.push(path);
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(index, title = %entry.title, "{err}, skipping");
                summary.skipped.push(entry.title.clone());
            }
            Err(err) => return Err(err.into()),
        }
    }

    output::write_manifest(&output.manifest_path, &summary.manifest_text())?;
    let summary = summary.stamp();
    tracing::info!(
        listed = summary.listed,
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "Run complete"
    );
    Ok(summary)
}
