//! Ways of locating the top article anchor inside the top container.
//!
//! Each strategy looks at the container only and reports what it saw; the
//! extractor tries them in [`STRATEGIES`] order and keeps the first hit. An
//! anchor that is there but unusable ends the search.

use crate::utils::collapse_whitespace;
use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref A_TITLED: Selector = Selector::parse("a[title]").expect(E);
    static ref HEADLINE: Selector =
        Selector::parse(".font-headline-xs, .font-headline-sm, h2, h3").expect(E);
}

#[derive(Debug, PartialEq, Eq)]
pub enum Probe {
    /// An anchor with a usable `href`. The href is raw, not yet absolute.
    Found { title: String, href: String },
    /// An anchor was there but could not be used.
    Incomplete(&'static str),
    Missing,
}

pub struct Strategy {
    pub name: &'static str,
    pub probe: fn(ElementRef<'_>) -> Probe,
}

pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "titled-anchor",
        probe: titled_anchor,
    },
    Strategy {
        name: "headline-ancestor",
        probe: headline_ancestor,
    },
];

fn probe_anchor(anchor: ElementRef<'_>, title: String) -> Probe {
    match anchor.value().attr("href").map(str::trim) {
        Some(href) if !href.is_empty() => Probe::Found {
            title,
            href: href.to_string(),
        },
        _ => Probe::Incomplete("anchor without href"),
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// First `a[title]`; the title is the attribute, trimmed.
pub fn titled_anchor(container: ElementRef<'_>) -> Probe {
    match container.select(&A_TITLED).next() {
        Some(anchor) => {
            let title = anchor
                .value()
                .attr("title")
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            probe_anchor(anchor, title)
        }
        None => Probe::Missing,
    }
}

/// First headline element, then its nearest enclosing anchor; the title is
/// the headline's text.
pub fn headline_ancestor(container: ElementRef<'_>) -> Probe {
    let Some(headline) = container.select(&HEADLINE).next() else {
        return Probe::Missing;
    };

    let anchor = headline
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a");

    match anchor {
        Some(anchor) => probe_anchor(anchor, text_of(headline)),
        None => Probe::Missing,
    }
}
