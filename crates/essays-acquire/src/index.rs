use anyhow::Result;
use essays_model::{ListingEntry, SiteConfig};
use essays_clean::passes::has_scheme;
use scraper::{ElementRef, Html, Selector};

use crate::fetch::Fetcher;

/// Fetch the listing page and return its essays in page order.
pub async fn fetch_listing(fetcher: &Fetcher, site: &SiteConfig) -> Result<Vec<ListingEntry>> {
    let url = site.listing_url();
    tracing::info!(url = %url, "Fetching essay listing");
    let html = fetcher.fetch_text(&url).await?;
    tracing::info!(bytes = html.len(), "Received listing HTML");

    let entries = parse_listing(&html, site);
    tracing::info!(entries = entries.len(), "Parsed listing");
    Ok(entries)
}

/// Extract essay links from the listing page.
///
/// On the listing page each essay title is a link inside a `<font>`, with a
/// spacer `<img>` somewhere after it among its siblings. Links elsewhere on
/// the page (navigation, off-site links) fail one of these checks.
pub fn parse_listing(html: &str, site: &SiteConfig) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let link_sel = Selector::parse("a[href]").expect("valid selector");

    let mut entries = Vec::new();
    for link in document.select(&link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !inside_font(link) || !followed_by_image(link) {
            continue;
        }
        if has_scheme(href) {
            tracing::debug!(href = %href, "Skipping off-site link");
            continue;
        }
        let title = link.text().collect::<String>().trim().to_string();
        if site.is_excluded(&title) {
            tracing::info!(title = %title, "Skipping excluded essay");
            continue;
        }
        entries.push(ListingEntry::new(title, site.absolute_url(href.trim())));
    }
    entries
}

fn inside_font(link: ElementRef<'_>) -> bool {
    link.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "font")
}

fn followed_by_image(link: ElementRef<'_>) -> bool {
    link.next_siblings()
        .filter_map(ElementRef::wrap)
        .any(|s| s.value().name() == "img")
}
