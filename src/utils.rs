use chrono::{DateTime, FixedOffset, Local};
use lazy_regex::{regex, regex_is_match};
use reqwest::Url;

pub(crate) fn get_now() -> DateTime<FixedOffset> {
    let now = Local::now();
    now.with_timezone(now.offset())
}

/// Scheme and host of `url`, with an empty path.
pub fn site_origin(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}

/// Turns an `href` into an absolute link. Links that already carry an http(s)
/// scheme are returned unchanged; site paths get the origin prepended as-is.
/// Other schemes and protocol-relative hrefs point off the site and yield `None`.
pub fn absolutize(origin: &Url, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    if href.starts_with("//") || regex_is_match!(r"^[A-Za-z][A-Za-z0-9+.\-]*:", href) {
        return None;
    }

    let base = origin.as_str().trim_end_matches('/');
    if href.starts_with('/') {
        Some(format!("{}{}", base, href))
    } else {
        Some(format!("{}/{}", base, href))
    }
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    regex!(r"\s+").replace_all(s.trim(), " ").into_owned()
}
