//! Built-in source catalog.
//!
//! A [`Source`] pairs the static description of a classifieds site with
//! its extractor. The four built-in sources cover the sites the engine
//! was written for; `Source::custom` wires up anything else.

pub mod immoscout;
pub mod immowelt;
pub mod kleinanzeigen;
pub mod wg_gesucht;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::ItemExtractor;
use crate::types::SourceConfig;

pub use immoscout::ImmoScoutExtractor;
pub use immowelt::ImmoweltExtractor;
pub use kleinanzeigen::KleinanzeigenExtractor;
pub use wg_gesucht::WgGesuchtExtractor;

/// One crawlable source: config plus selector logic.
pub struct Source {
    config: SourceConfig,
    extractor: Box<dyn ItemExtractor>,
}

impl Source {
    /// Kleinanzeigen.de for a city. Mixed marketplace, so the rental
    /// classifier is required.
    pub fn kleinanzeigen(city: &str) -> Self {
        kleinanzeigen::source(city)
    }

    /// WG-Gesucht.de for a city, if the city is supported.
    pub fn wg_gesucht(city: &str) -> Option<Self> {
        wg_gesucht::source(city)
    }

    /// ImmobilienScout24.de for a city.
    pub fn immoscout(city: &str) -> Self {
        immoscout::source(city)
    }

    /// Immowelt.de for a city. Capped at one page per category; its
    /// pagination is unreachable.
    pub fn immowelt(city: &str) -> Self {
        immowelt::source(city)
    }

    /// Wire up a custom source.
    pub fn custom(config: SourceConfig, extractor: Box<dyn ItemExtractor>) -> Self {
        Self { config, extractor }
    }

    /// The source's static description.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// The source's selector logic.
    pub fn extractor(&self) -> &dyn ItemExtractor {
        self.extractor.as_ref()
    }
}

/// Normalize a city name for use in URLs ("München" → "muenchen").
pub fn city_slug(city: &str) -> String {
    city.to_lowercase()
        .replace('ü', "ue")
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ß', "ss")
        .replace(' ', "-")
}

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>")
        .expect("valid script pattern")
});
static HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).expect("valid href pattern"));

/// Visible text of an HTML fragment: tags stripped, entities decoded,
/// whitespace collapsed.
pub(crate) fn fragment_text(html: &str) -> String {
    let without_scripts = SCRIPT_OR_STYLE.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_scripts, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First href in an HTML fragment that satisfies the predicate.
pub(crate) fn first_href(html: &str, accept: impl Fn(&str) -> bool) -> Option<String> {
    HREF.captures_iter(html)
        .map(|cap| cap[1].to_string())
        .find(|href| accept(href))
}

/// Slice a page into per-item fragments.
///
/// Item markup nests arbitrarily, so instead of pairing open/close tags
/// the page is cut at each item-start marker; a fragment runs until the
/// next marker (or the end of the page).
pub(crate) fn item_fragments<'a>(html: &'a str, item_start: &Regex) -> Vec<&'a str> {
    let starts: Vec<usize> = item_start.find_iter(html).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

/// Resolve a possibly relative href against a base URL.
pub(crate) fn absolute_url(base_url: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    url::Url::parse(base_url)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_slug() {
        assert_eq!(city_slug("München"), "muenchen");
        assert_eq!(city_slug("Frankfurt am Main"), "frankfurt-am-main");
        assert_eq!(city_slug("Köln"), "koeln");
    }

    #[test]
    fn test_fragment_text() {
        let html = "<div><b>Schöne</b> Wohnung &amp; Garten<script>x()</script></div>";
        assert_eq!(fragment_text(html), "Schöne Wohnung & Garten");
    }

    #[test]
    fn test_item_fragments() {
        let re = Regex::new("<item>").unwrap();
        let html = "junk<item>one<div>x</div><item>two";
        let frags = item_fragments(html, &re);
        assert_eq!(frags.len(), 2);
        assert!(frags[0].contains("one"));
        assert!(frags[1].contains("two"));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://example.com", "/a/b").as_deref(),
            Some("https://example.com/a/b")
        );
        assert_eq!(
            absolute_url("https://example.com", "https://other.com/x").as_deref(),
            Some("https://other.com/x")
        );
    }
}
