use serde_json::Value;

use super::{field, first_text, plain_text, seconds};
use crate::{
    types::{DownloadUrl, Song, Source},
    utils::{self, DEFAULT_QUALITY},
};

/// Maps an extraction info record onto the canonical song shape.
///
/// The tool reports a bitrate rather than a catalog tier, so the single
/// download entry is labelled `<abr>kbps`, or `320kbps` when the bitrate is
/// unknown. `language` is never set and `has_lyrics` is always `false`.
pub fn normalize_media(info: &Value, source: Source) -> Song {
    let duration = seconds(field(info, "duration"));
    let audio_url = extract_audio_url(info);

    let mut download_urls = Vec::new();
    if !audio_url.is_empty() {
        let abr = seconds(field(info, "abr"));
        let quality = if abr > 0 {
            format!("{abr}kbps")
        } else {
            DEFAULT_QUALITY.to_string()
        };
        download_urls.push(DownloadUrl::new(quality, audio_url));
    }
    let best_url = utils::pick_best_url(&download_urls, DEFAULT_QUALITY);

    Song {
        id: first_text(info, &["id"]).unwrap_or_default(),
        name: first_text(info, &["track", "title"]).unwrap_or_else(|| "Unknown".to_string()),
        artist: first_text(info, &["artist", "uploader", "channel"])
            .unwrap_or_else(|| "Unknown".to_string()),
        album: first_text(info, &["album"]).unwrap_or_default(),
        year: first_text(info, &["release_year"]).unwrap_or_default(),
        duration,
        duration_formatted: utils::format_duration(duration),
        language: String::new(),
        has_lyrics: false,
        image: extract_thumbnail(info),
        download_urls,
        best_url,
        source: Some(source),
        webpage_url: first_text(info, &["webpage_url", "original_url"]),
    }
}

/// Prefers an audio-only requested format over the top-level selected URL.
pub fn extract_audio_url(info: &Value) -> String {
    let top_level = field(info, "url").map(plain_text).unwrap_or_default();

    let audio_only = info
        .get("requested_formats")
        .and_then(Value::as_array)
        .and_then(|formats| formats.iter().find(|f| is_audio_only(f)));

    match audio_only {
        Some(format) => field(format, "url").map(plain_text).unwrap_or(top_level),
        None => top_level,
    }
}

fn is_audio_only(format: &Value) -> bool {
    let has_audio = format
        .get("acodec")
        .and_then(Value::as_str)
        .is_some_and(|codec| !codec.is_empty() && codec != "none");
    let has_video = format
        .get("vcodec")
        .and_then(Value::as_str)
        .is_some_and(|codec| codec != "none");
    has_audio && !has_video
}

// Thumbnails are listed in ascending resolution.
fn extract_thumbnail(info: &Value) -> String {
    let flat = first_text(info, &["thumbnail"]).unwrap_or_default();

    match info
        .get("thumbnails")
        .and_then(Value::as_array)
        .and_then(|thumbs| thumbs.last())
    {
        Some(last) => field(last, "url").map(plain_text).unwrap_or(flat),
        None => flat,
    }
}
