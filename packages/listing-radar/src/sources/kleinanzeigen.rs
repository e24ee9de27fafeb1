//! Kleinanzeigen.de source.
//!
//! A mixed marketplace: rental offers sit next to search ads and sale
//! offers, so this source requires the rental classifier.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::{ExtractedItem, ItemExtractor};
use crate::types::{Category, SourceConfig};

use super::{absolute_url, city_slug, first_href, fragment_text, item_fragments, Source};

const BASE_URL: &str = "https://www.kleinanzeigen.de";

/// Detail pages live under this path segment.
const DETAIL_SEGMENT: &str = "/s-anzeige/";

// Ad items are <article class="aditem"> blocks; some layouts use
// <li class="ad-listitem"> instead.
static ITEM_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?:article|li)[^>]*class="[^"]*(?:aditem|ad-listitem)[^"]*""#)
        .expect("valid item pattern")
});

/// Location ids for the city filter in category URLs.
fn location_id(slug: &str) -> Option<&'static str> {
    let id = match slug {
        "muenchen" | "munich" => "6411",
        "berlin" => "3331",
        "hamburg" => "9409",
        "koeln" | "cologne" => "4315",
        "frankfurt" => "6581",
        "stuttgart" => "12067",
        "duesseldorf" => "3779",
        "dortmund" => "3684",
        "essen" => "4272",
        "leipzig" => "8223",
        "bremen" => "3563",
        "dresden" => "3741",
        "hannover" => "5143",
        "nuernberg" => "9174",
        "duisburg" => "3795",
        "bochum" => "3394",
        "wuppertal" => "12994",
        "bielefeld" => "3337",
        "bonn" => "3444",
        "muenster" => "9120",
        "karlsruhe" => "6049",
        "mannheim" => "8409",
        "augsburg" => "3171",
        "wiesbaden" => "12874",
        "freiburg" => "4631",
        "kiel" => "6194",
        "mainz" => "8378",
        _ => return None,
    };
    Some(id)
}

/// Build the Kleinanzeigen source for a city.
pub fn source(city: &str) -> Source {
    let slug = city_slug(city);
    let location_suffix = location_id(&slug)
        .map(|id| format!("l{}", id))
        .unwrap_or_default();

    let config = SourceConfig::new("kleinanzeigen", "Kleinanzeigen.de", BASE_URL)
        .with_category(Category::new(
            "Mietwohnungen",
            format!(
                "/s-wohnung-mieten/{}/anzeige:angebote/c203{}",
                slug, location_suffix
            ),
        ))
        .with_category(Category::new(
            "WG-Zimmer Angebote",
            format!(
                "/s-wg-zimmer-gesucht/{}/anzeige:angebote/c199{}",
                slug, location_suffix
            ),
        ))
        .with_rental_filter();

    Source::custom(config, Box::new(KleinanzeigenExtractor::default()))
}

/// Selector logic for Kleinanzeigen listing pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct KleinanzeigenExtractor;

impl ItemExtractor for KleinanzeigenExtractor {
    fn extract(&self, html: &str) -> Vec<ExtractedItem> {
        item_fragments(html, &ITEM_START)
            .into_iter()
            .filter_map(|fragment| {
                let href = first_href(fragment, |h| h.contains(DETAIL_SEGMENT))?;
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
            format!("{}{}/seite:{}", base_url, category_path, page_number)
        }
    }

    fn name(&self) -> &str {
        "kleinanzeigen"
    }
}
