use crate::types::DownloadUrl;

/// Known bitrate tiers in ascending order.
pub const QUALITY_TIERS: [&str; 5] = ["12kbps", "48kbps", "96kbps", "160kbps", "320kbps"];

/// Tiers offered to users for download.
pub const DOWNLOAD_QUALITIES: [&str; 3] = ["96kbps", "160kbps", "320kbps"];

/// Preference used when a song is normalized.
pub const DEFAULT_QUALITY: &str = "320kbps";

// Later entries win when a tier appears twice.
fn url_for_tier<'a>(download_urls: &'a [DownloadUrl], quality: &str) -> Option<&'a str> {
    download_urls
        .iter()
        .rev()
        .find(|d| d.quality == quality)
        .map(|d| d.url.as_str())
}

/// Builds `[preferred, <known tiers below preferred, descending>]`.
///
/// An unknown `preferred` label yields a chain of just itself.
pub fn preference_chain(preferred: &str) -> Vec<&str> {
    let mut chain = vec![preferred];
    if let Some(idx) = QUALITY_TIERS.iter().position(|q| *q == preferred) {
        chain.extend(QUALITY_TIERS[..idx].iter().rev().copied());
    }
    chain
}

/// Picks the URL to play for `preferred`, never raising.
///
/// Lookup order:
/// 1. `preferred`, then every known tier below it (degrade down only)
/// 2. every known tier from highest to lowest
/// 3. the last entry of the list
///
/// Returns an empty string for an empty list.
pub fn pick_best_url(download_urls: &[DownloadUrl], preferred: &str) -> String {
    let Some(last) = download_urls.last() else {
        return String::new();
    };

    preference_chain(preferred)
        .into_iter()
        .chain(QUALITY_TIERS.iter().rev().copied())
        .find_map(|q| url_for_tier(download_urls, q))
        .unwrap_or(&last.url)
        .to_string()
}

/// URL for an exact tier, falling back to [`pick_best_url`] with that tier as preference.
pub fn url_for_quality(download_urls: &[DownloadUrl], quality: &str) -> String {
    match url_for_tier(download_urls, quality) {
        Some(url) => url.to_string(),
        None => pick_best_url(download_urls, quality),
    }
}

/// Formats seconds as `M:SS`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Decodes HTML entities such as `&amp;` and `&quot;`.
pub fn unescape(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
