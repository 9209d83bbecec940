use serde_json::Value;

use super::{entry_url, field, plain_text, safe_unescape, seconds};
use crate::{
    types::{DownloadUrl, Song},
    utils::{self, DEFAULT_QUALITY},
};

/// Normalizes one catalog record, whichever field layout the mirror used.
///
/// Never fails; every field falls back to its default (`"Unknown"` for the
/// name and artist, empty strings, `0`, `false`, empty lists).
pub fn normalize_song(song: &Value) -> Song {
    let download_urls = extract_download_urls(song);
    let best_url = utils::pick_best_url(&download_urls, DEFAULT_QUALITY);
    let duration = seconds(song.get("duration"));

    Song {
        id: song.get("id").map(plain_text).unwrap_or_default(),
        name: song
            .get("name")
            .map(safe_unescape)
            .unwrap_or_else(|| "Unknown".to_string()),
        artist: extract_artist(song),
        album: extract_album(song),
        year: extract_year(song),
        duration,
        duration_formatted: utils::format_duration(duration),
        language: song.get("language").map(safe_unescape).unwrap_or_default(),
        has_lyrics: song.get("hasLyrics").is_some_and(lyrics_flag),
        image: extract_image(song),
        download_urls,
        best_url,
        source: None,
        webpage_url: None,
    }
}

/// Normalizes every object in `songs`; other entries are dropped.
pub fn normalize_songs(songs: &[Value]) -> Vec<Song> {
    songs
        .iter()
        .filter(|s| s.is_object())
        .map(normalize_song)
        .collect()
}

/// Tries each known artist layout in turn; the first non-empty one wins.
pub fn extract_artist(song: &Value) -> String {
    artist_from_string(song)
        .or_else(|| artist_from_list(song))
        .or_else(|| artist_from_primary(song))
        .or_else(|| artist_from_flat(song))
        .unwrap_or_else(|| "Unknown".to_string())
}

// {"primaryArtists": "A, B"}
fn artist_from_string(song: &Value) -> Option<String> {
    song.get("primaryArtists")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(utils::unescape)
}

// {"primaryArtists": [{"name": "A"}, {"name": "B"}]}
fn artist_from_list(song: &Value) -> Option<String> {
    song.get("primaryArtists")
        .and_then(Value::as_array)
        .and_then(|artists| join_names(artists))
}

// {"artists": {"primary": [{"name": "A"}, {"name": "B"}]}}
fn artist_from_primary(song: &Value) -> Option<String> {
    song.get("artists")
        .and_then(|a| a.get("primary"))
        .and_then(Value::as_array)
        .and_then(|artists| join_names(artists))
}

// {"artist": "A"}
fn artist_from_flat(song: &Value) -> Option<String> {
    field(song, "artist")
        .map(safe_unescape)
        .filter(|s| !s.is_empty())
}

fn join_names(artists: &[Value]) -> Option<String> {
    let names: Vec<String> = artists
        .iter()
        .filter_map(|a| a.get("name"))
        .map(plain_text)
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(utils::unescape(&names.join(", ")))
    }
}

fn extract_album(song: &Value) -> String {
    match song.get("album") {
        Some(Value::Object(album)) => album.get("name").map(safe_unescape).unwrap_or_default(),
        Some(Value::String(name)) => utils::unescape(name),
        _ => String::new(),
    }
}

fn extract_year(song: &Value) -> String {
    match song.get("year") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(year)) => year.clone(),
        Some(Value::Number(year)) => year.to_string(),
        Some(other) => other.to_string(),
    }
}

// Mirrors send booleans, numbers or the strings "true"/"false".
fn lyrics_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    }
}

/// Prefers the `500x500` artwork, otherwise the last (largest) entry.
pub fn extract_image(song: &Value) -> String {
    let Some(images) = song.get("image").and_then(Value::as_array) else {
        return String::new();
    };

    if let Some(image) = images
        .iter()
        .find(|img| img.get("quality").and_then(Value::as_str) == Some("500x500"))
    {
        return entry_url(image);
    }

    images
        .last()
        .filter(|img| img.is_object())
        .map(entry_url)
        .unwrap_or_default()
}

/// Reads `downloadUrl` (or `download_url`), keeping one URL per quality tier.
///
/// Entries without a quality label or a URL are skipped. When a tier shows up
/// twice the later URL replaces the earlier one in its original position.
pub fn extract_download_urls(song: &Value) -> Vec<DownloadUrl> {
    let Some(raw) = field(song, "downloadUrl")
        .or_else(|| field(song, "download_url"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut urls: Vec<DownloadUrl> = Vec::with_capacity(raw.len());
    for entry in raw.iter().filter(|e| e.is_object()) {
        let Some(quality) = entry
            .get("quality")
            .and_then(Value::as_str)
            .filter(|q| !q.is_empty())
        else {
            continue;
        };
        let url = entry_url(entry);
        if url.is_empty() {
            continue;
        }

        match urls.iter_mut().find(|d| d.quality == quality) {
            Some(existing) => existing.url = url,
            None => urls.push(DownloadUrl::new(quality, url)),
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_tier_keeps_later_url() {
        let urls = extract_download_urls(&json!({
            "downloadUrl": [
                {"quality": "96kbps", "url": "a"},
                {"quality": "96kbps", "url": "b"},
                {"quality": "320kbps", "link": "c"}
            ]
        }));
        assert_eq!(
            urls,
            vec![DownloadUrl::new("96kbps", "b"), DownloadUrl::new("320kbps", "c")]
        );
    }

    #[test]
    fn test_empty_download_url_falls_back_to_snake_case_key() {
        let urls = extract_download_urls(&json!({
            "downloadUrl": [],
            "download_url": [{"quality": "160kbps", "url": "x"}]
        }));
        assert_eq!(urls, vec![DownloadUrl::new("160kbps", "x")]);
    }

    #[test]
    fn test_lyrics_flag_string_false() {
        assert!(!lyrics_flag(&json!("false")));
        assert!(lyrics_flag(&json!("true")));
        assert!(lyrics_flag(&json!(true)));
    }
}
