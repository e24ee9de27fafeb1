//! WG-Gesucht.de source.
//!
//! Rental-only portal; everything listed is an offer, so no rental
//! classification is needed. City support is limited to the ids the
//! site assigns.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::{ExtractedItem, ItemExtractor};
use crate::types::{Category, SourceConfig};

use super::{absolute_url, city_slug, first_href, fragment_text, item_fragments, Source};

const BASE_URL: &str = "https://www.wg-gesucht.de";

static ITEM_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div[^>]*class="[^"]*offer_list_item[^"]*""#).expect("valid item pattern")
});

/// WG-Gesucht's internal city ids.
fn city_id(slug: &str) -> Option<u32> {
    let id = match slug {
        "berlin" => 8,
        "muenchen" | "munich" => 90,
        "hamburg" => 55,
        "koeln" | "cologne" => 73,
        "frankfurt" => 41,
        "stuttgart" => 124,
        "duesseldorf" => 30,
        "dortmund" => 26,
        "essen" => 33,
        "leipzig" => 77,
        "bremen" => 17,
        "dresden" => 27,
        "hannover" => 57,
        "nuernberg" => 96,
        "bonn" => 13,
        "mannheim" => 84,
        "karlsruhe" => 69,
        "wiesbaden" => 141,
        "augsburg" => 2,
        "aachen" => 1,
        "braunschweig" => 16,
        "kiel" => 70,
        "chemnitz" => 19,
        "halle" => 56,
        "magdeburg" => 83,
        "freiburg" => 42,
        "luebeck" => 80,
        "erfurt" => 32,
        "rostock" => 109,
        "mainz" => 82,
        "kassel" => 68,
        "saarbruecken" => 111,
        "potsdam" => 104,
        "oldenburg" => 99,
        _ => return None,
    };
    Some(id)
}

/// Build the WG-Gesucht source for a city.
///
/// Returns `None` for cities the site has no id for.
pub fn source(city: &str) -> Option<Source> {
    let slug = city_slug(city);
    let id = city_id(&slug)?;

    // Filter 0+1+2 = WG rooms, one-room flats, and flats.
    let config = SourceConfig::new("wg-gesucht", "WG-Gesucht.de", BASE_URL).with_category(
        Category::new(
            "WG-Zimmer und Wohnungen",
            format!(
                "/wg-zimmer-und-1-zimmer-wohnungen-und-wohnungen-in-{}.{}.0+1+2.1",
                slug, id
            ),
        ),
    );

    Some(Source::custom(
        config,
        Box::new(WgGesuchtExtractor::default()),
    ))
}

/// Selector logic for WG-Gesucht listing pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct WgGesuchtExtractor;

impl ItemExtractor for WgGesuchtExtractor {
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
        url.ends_with(".html")
    }

    // WG-Gesucht embeds a zero-based page index in every listing URL,
    // including the first page.
    fn page_url(&self, base_url: &str, category_path: &str, page_number: u32) -> String {
        format!(
            "{}{}.{}.html",
            base_url,
            category_path,
            page_number.saturating_sub(1)
        )
    }

    fn name(&self) -> &str {
        "wg-gesucht"
    }
}
