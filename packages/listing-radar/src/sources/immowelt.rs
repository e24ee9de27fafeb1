//! Immowelt.de source.
//!
//! Rental-only portal rendered as a single-page app; pagination sits
//! behind bot protection, so the source is capped at one page per
//! category and everything beyond the first result page is out of
//! reach. Detail pages live under `/expose/`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::{ExtractedItem, ItemExtractor};
use crate::types::{Category, SourceConfig};

use super::{absolute_url, city_slug, first_href, fragment_text, item_fragments, Source};

const BASE_URL: &str = "https://www.immowelt.de";

/// Detail pages live under this path segment.
const DETAIL_SEGMENT: &str = "/expose/";

static ITEM_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a[^>]*href\s*=\s*["'][^"']*/expose/"#).expect("valid item pattern")
});

/// Build the Immowelt source for a city.
pub fn source(city: &str) -> Source {
    let slug = city_slug(city);

    let config = SourceConfig::new("immowelt", "Immowelt.de", BASE_URL)
        .with_category(Category::new(
            "Mietwohnungen",
            format!("/suche/{}/wohnungen/mieten", slug),
        ))
        .with_category(Category::new(
            "WG-Zimmer",
            format!("/suche/{}/wg-zimmer/mieten", slug),
        ))
        .with_page_limit(1);

    Source::custom(config, Box::new(ImmoweltExtractor::default()))
}

/// Selector logic for Immowelt result pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmoweltExtractor;

impl ItemExtractor for ImmoweltExtractor {
    fn extract(&self, html: &str) -> Vec<ExtractedItem> {
        item_fragments(html, &ITEM_START)
            .into_iter()
            .filter_map(|fragment| {
                let href = first_href(fragment, |h| self.accepts_detail_url(h))?;
                // Expose links carry tracking parameters.
                let href = href.split('?').next().unwrap_or(&href).to_string();
                let url = absolute_url(BASE_URL, &href)?;
                let text = fragment_text(fragment);
                if text.is_empty() {
                    return None;
                }
                Some(ExtractedItem::new(text, url))
            })
            .collect()
    }

    fn accepts_detail_url(&self, url: &str) -> bool {
        url.contains(DETAIL_SEGMENT)
    }

    fn page_url(&self, base_url: &str, category_path: &str, page_number: u32) -> String {
        if page_number <= 1 {
            format!("{}{}", base_url, category_path)
        } else {
            format!("{}{}?sp={}", base_url, category_path, page_number)
        }
    }

    fn name(&self) -> &str {
        "immowelt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <a href="/expose/abc123?bc=618">Wohnung</a>
        <div><span>Schöne Wohnung, Hauptstr. 5, 80331 München, 950€</span></div>
        <a href="https://www.immowelt.de/expose/def456">WG</a>
        <div><span>WG-Zimmer, Nebenstr. 3, 80333 München</span></div>
        </body></html>
    "#;

    #[test]
    fn test_extract_items_strips_tracking_params() {
        let items = ImmoweltExtractor.extract(PAGE);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].detail_url,
            "https://www.immowelt.de/expose/abc123"
        );
        assert!(items[0].raw_text.contains("Hauptstr. 5"));
        assert_eq!(
            items[1].detail_url,
            "https://www.immowelt.de/expose/def456"
        );
    }

    #[test]
    fn test_source_is_single_page() {
        let source = source("München");
        let config = source.config();
        assert_eq!(config.id, "immowelt");
        assert!(!config.requires_rental_filter);
        assert_eq!(config.page_limit, Some(1));
        assert_eq!(config.categories[0].path, "/suche/muenchen/wohnungen/mieten");
    }
}
