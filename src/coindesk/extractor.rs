use super::strategies::{Probe, STRATEGIES};
use crate::{error::ExtractError, utils, ArticleSighting, Extractor};
use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::debug;

const E: &str = "Invalid selector";
lazy_static! {
    /// Card wrapping the top-ranked article on the listing page.
    static ref TOP_CONTAINER: Selector =
        Selector::parse("div.bg-white.flex.gap-6.w-full.shrink.justify-between").expect(E);
}

#[derive(Debug, Clone)]
pub struct CoindeskExtractor {
    origin: Url,
}

impl CoindeskExtractor {
    /// `page_url` is the polled page; relative links resolve against its origin.
    pub fn new(page_url: &Url) -> Self {
        CoindeskExtractor {
            origin: utils::site_origin(page_url),
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

impl Extractor for CoindeskExtractor {
    fn extract(&self, doc: &Html) -> Result<ArticleSighting, ExtractError> {
        let container = doc
            .select(&TOP_CONTAINER)
            .next()
            .ok_or(ExtractError::NotFound)?;

        // An unusable anchor ends the search.
        for strategy in STRATEGIES {
            match (strategy.probe)(container) {
                Probe::Found { title, href } => {
                    let link = utils::absolutize(&self.origin, &href)
                        .ok_or(ExtractError::Incomplete("href is not a site path"))?;
                    debug!(strategy = strategy.name, %link, "anchor located");
                    return Ok(ArticleSighting { title, link });
                }
                Probe::Incomplete(reason) => {
                    debug!(strategy = strategy.name, reason, "anchor unusable");
                    return Err(ExtractError::Incomplete(reason));
                }
                Probe::Missing => {}
            }
        }

        Err(ExtractError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn extractor() -> CoindeskExtractor {
        CoindeskExtractor::new(&Url::parse(crate::coindesk::DEFAULT_TARGET_URL).unwrap())
    }

    fn fixture() -> String {
        fs::read_to_string("tests/htmls/latest.html").expect("Invalid file path")
    }

    #[test]
    fn extracts_top_article_from_listing() {
        let sighting = extractor().extract_str(&fixture()).unwrap();
        assert_eq!(
            sighting,
            ArticleSighting {
                title: "Bitcoin Nears $100K as ETF Inflows Surge".to_string(),
                link: "https://www.coindesk.com/markets/2024/11/22/bitcoin-nears-100k-as-etf-inflows-surge".to_string(),
            }
        );
    }

    #[test]
    fn truncated_before_container_is_not_found() {
        let html = fixture();
        let at = html.find(r#"<div class="bg-white"#).unwrap();
        let res = extractor().extract_str(&html[..at]);
        assert!(matches!(res, Err(ExtractError::NotFound)));
    }

    #[test]
    fn truncated_mid_tag_is_not_found() {
        let html = fixture();
        let at = html.find(r#"<div class="bg-white"#).unwrap() + 14;
        let res = extractor().extract_str(&html[..at]);
        assert!(matches!(res, Err(ExtractError::NotFound)));
    }

    #[test]
    fn truncated_inside_card_still_finds_anchor() {
        let html = fixture();
        let at = html.find("<p class=\"font-body\"").unwrap();
        let sighting = extractor().extract_str(&html[..at]).unwrap();
        assert_eq!(sighting.title, "Bitcoin Nears $100K as ETF Inflows Surge");
    }

    #[test]
    fn garbage_input_is_not_found() {
        for html in ["", "<<<>>>", "\u{fffd}\u{fffd}<div class=", "<html><body><div"] {
            assert!(matches!(
                extractor().extract_str(html),
                Err(ExtractError::NotFound)
            ));
        }
    }

    #[test]
    fn container_without_anchor_is_not_found() {
        let html = r#"<div class="bg-white flex gap-6 w-full shrink justify-between"><p>soon</p></div>"#;
        assert!(matches!(
            extractor().extract_str(html),
            Err(ExtractError::NotFound)
        ));
    }

    #[test]
    fn anchor_without_href_is_incomplete() {
        let html = r#"<div class="bg-white flex gap-6 w-full shrink justify-between">
            <a title="Draft"><h2>Draft</h2></a>
        </div>"#;
        assert!(matches!(
            extractor().extract_str(html),
            Err(ExtractError::Incomplete(_))
        ));
    }

    #[test]
    fn titled_anchor_without_href_ignores_category_link() {
        let html = r#"<div class="bg-white flex gap-6 w-full shrink justify-between">
            <a href="/markets">Markets</a>
            <a title="Bitcoin Nears $100K"><h2 class="font-headline-xs">Bitcoin Nears $100K</h2></a>
        </div>"#;
        assert!(matches!(
            extractor().extract_str(html),
            Err(ExtractError::Incomplete(_))
        ));
    }

    #[test]
    fn category_link_alone_is_not_the_top_article() {
        let html = r#"<div class="bg-white flex gap-6 w-full shrink justify-between">
            <a href="/markets">Markets</a>
            <p>Bitcoin Nears $100K</p>
        </div>"#;
        assert!(matches!(
            extractor().extract_str(html),
            Err(ExtractError::NotFound)
        ));
    }

    #[test]
    fn foreign_scheme_href_is_incomplete() {
        let html = r#"<div class="bg-white flex gap-6 w-full shrink justify-between">
            <a href="mailto:news@coindesk.com" title="Tips">Tips</a>
        </div>"#;
        assert!(matches!(
            extractor().extract_str(html),
            Err(ExtractError::Incomplete(_))
        ));
    }

    #[test]
    fn falls_back_to_headline_anchor() {
        let html = r#"<div class="bg-white flex gap-6 w-full shrink justify-between">
            <span>Tech</span>
            <a href="https://example.com/x"><h3 class="font-headline-sm">Elsewhere</h3></a>
        </div>"#;
        assert_eq!(
            extractor().extract_str(html).unwrap(),
            ArticleSighting {
                title: "Elsewhere".to_string(),
                link: "https://example.com/x".to_string(),
            }
        );
    }

    #[test]
    fn origin_follows_target_url() {
        let e = CoindeskExtractor::new(&Url::parse("http://127.0.0.1:8080/news/latest").unwrap());
        assert_eq!(e.origin().as_str(), "http://127.0.0.1:8080/");
    }
}
