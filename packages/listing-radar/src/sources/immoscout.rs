//! ImmobilienScout24.de source.
//!
//! Rental-only portal, so no rental classification. Search URLs key on
//! federal state plus city; detail pages live under `/expose/`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::{ExtractedItem, ItemExtractor};
use crate::types::{Category, SourceConfig};

use super::{absolute_url, city_slug, first_href, fragment_text, item_fragments, Source};

const BASE_URL: &str = "https://www.immobilienscout24.de";

/// Detail pages live under this path segment.
const DETAIL_SEGMENT: &str = "/expose/";

// Result cards carry no stable class names; the expose anchor itself is
// the item marker.
static ITEM_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a[^>]*href\s*=\s*["'][^"']*/expose/\d+"#).expect("valid item pattern")
});

/// Federal state for the search-URL path. Unknown cities fall back to
/// Bayern, which the site tolerates.
fn bundesland(slug: &str) -> &'static str {
    match slug {
        "muenchen" | "munich" | "nuernberg" | "augsburg" => "bayern",
        "berlin" => "berlin",
        "hamburg" => "hamburg",
        "koeln" | "cologne" | "duesseldorf" | "dortmund" | "essen" => "nordrhein-westfalen",
        "frankfurt" | "wiesbaden" => "hessen",
        "stuttgart" | "mannheim" => "baden-wuerttemberg",
        "hannover" => "niedersachsen",
        "bremen" => "bremen",
        "leipzig" | "dresden" => "sachsen",
        "kiel" => "schleswig-holstein",
        "mainz" => "rheinland-pfalz",
        _ => "bayern",
    }
}

/// Build the ImmoScout24 source for a city.
pub fn source(city: &str) -> Source {
    let slug = city_slug(city);
    let land = bundesland(&slug);

    let config = SourceConfig::new("immoscout24", "ImmobilienScout24.de", BASE_URL)
        .with_category(Category::new(
            "Mietwohnungen",
            format!("/Suche/de/{}/{}/wohnung-mieten", land, slug),
        ))
        .with_category(Category::new(
            "WG-Zimmer",
            format!("/Suche/de/{}/{}/wg-zimmer", land, slug),
        ));

    Source::custom(config, Box::new(ImmoScoutExtractor::default()))
}

/// Selector logic for ImmoScout24 result pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmoScoutExtractor;

impl ItemExtractor for ImmoScoutExtractor {
    fn extract(&self, html: &str) -> Vec<ExtractedItem> {
        item_fragments(html, &ITEM_START)
            .into_iter()
            .filter_map(|fragment| {
                let href = first_href(fragment, |h| self.accepts_detail_url(h))?;
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
            format!("{}{}?pagenumber={}", base_url, category_path, page_number)
        }
    }

    fn name(&self) -> &str {
        "immoscout24"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <a href="/expose/123456">Wohnung</a>
        <div><h2>Helle 3-Zimmer-Wohnung</h2><span>Hauptstr. 5, 80331 München, 1.200€</span></div>
        <a href="https://www.immobilienscout24.de/expose/789012">WG</a>
        <div><span>WG-Zimmer, Nebenstr. 3, 80333 München</span></div>
        </body></html>
    "#;

    #[test]
    fn test_extract_items() {
        let items = ImmoScoutExtractor.extract(PAGE);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].detail_url,
            "https://www.immobilienscout24.de/expose/123456"
        );
        assert!(items[0].raw_text.contains("Hauptstr. 5"));
        assert_eq!(
            items[1].detail_url,
            "https://www.immobilienscout24.de/expose/789012"
        );
    }

    #[test]
    fn test_page_url_convention() {
        let x = ImmoScoutExtractor;
        let path = "/Suche/de/bayern/muenchen/wohnung-mieten";
        assert_eq!(
            x.page_url(BASE_URL, path, 1),
            format!("{}{}", BASE_URL, path)
        );
        assert_eq!(
            x.page_url(BASE_URL, path, 3),
            format!("{}{}?pagenumber=3", BASE_URL, path)
        );
    }

    #[test]
    fn test_source_config() {
        let source = source("München");
        let config = source.config();
        assert_eq!(config.id, "immoscout24");
        assert!(!config.requires_rental_filter);
        assert!(config.categories[0]
            .path
            .contains("/Suche/de/bayern/muenchen/"));
    }

    #[test]
    fn test_unknown_city_defaults_to_bayern() {
        let source = source("Kleinkleckersdorf");
        assert!(source.config().categories[0].path.contains("/de/bayern/"));
    }
}
