// src/core/scanner/locator.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

// An attribute assignment whose quoted value mentions "main" and ends in `.js`.
static RE_MAIN_BUNDLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)[a-z-]+=["']([^"']*main[^"']*\.js)["']"#).unwrap()
});

/// Finds the first `main*.js` reference in `html` and resolves it against `base_url`.
///
/// Only the first qualifying reference in document order is considered; pages
/// shipping several such bundles are not disambiguated.
pub fn locate(html: &str, base_url: &str) -> Option<String> {
    let path = RE_MAIN_BUNDLE.captures(html)?.get(1)?.as_str();
    let resolved = Url::parse(base_url).and_then(|base| base.join(path));
    match resolved {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!(base_url, path, error = %e, "Could not resolve bundle reference.");
            None
        }
    }
}
