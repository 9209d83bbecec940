use std::time::Duration;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{info, music::error::ProviderError, warning};

static SPOTIFY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?open\.spotify\.com/(?:intl-\w+/)?track/([a-zA-Z0-9]+)")
        .expect("valid spotify pattern")
});

static DEEZER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?deezer\.com/(?:\w+/)?track/(\d+)")
        .expect("valid deezer pattern")
});

static APPLE_MUSIC_ALBUM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?music\.apple\.com/(\w+)/album/([^/]+)/(\d+)(?:\?i=(\d+))?")
        .expect("valid apple music album pattern")
});

static APPLE_MUSIC_SONG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?music\.apple\.com/(\w+)/song/([^/]+)/(\d+)")
        .expect("valid apple music song pattern")
});

/// A recognized music platform link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformLink {
    Spotify {
        url: String,
        track_id: String,
    },
    Deezer {
        track_id: String,
    },
    AppleMusicAlbum {
        storefront: String,
        slug: String,
        album_id: String,
        track_id: Option<String>,
    },
    AppleMusicSong {
        storefront: String,
        slug: String,
        song_id: String,
    },
}

fn group(caps: &Captures, idx: usize) -> String {
    caps.get(idx).map(|m| m.as_str().to_string()).unwrap_or_default()
}

impl PlatformLink {
    /// Matches `text` against Spotify, Deezer, Apple Music album and Apple
    /// Music song patterns, in that order. Surrounding whitespace is ignored.
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.trim();

        if let Some(caps) = SPOTIFY_PATTERN.captures(text) {
            return Some(PlatformLink::Spotify {
                url: text.to_string(),
                track_id: group(&caps, 1),
            });
        }
        if let Some(caps) = DEEZER_PATTERN.captures(text) {
            return Some(PlatformLink::Deezer {
                track_id: group(&caps, 1),
            });
        }
        if let Some(caps) = APPLE_MUSIC_ALBUM_PATTERN.captures(text) {
            return Some(PlatformLink::AppleMusicAlbum {
                storefront: group(&caps, 1),
                slug: group(&caps, 2),
                album_id: group(&caps, 3),
                track_id: caps.get(4).map(|m| m.as_str().to_string()),
            });
        }
        if let Some(caps) = APPLE_MUSIC_SONG_PATTERN.captures(text) {
            return Some(PlatformLink::AppleMusicSong {
                storefront: group(&caps, 1),
                slug: group(&caps, 2),
                song_id: group(&caps, 3),
            });
        }
        None
    }

    pub fn platform(&self) -> &'static str {
        match self {
            PlatformLink::Spotify { .. } => "Spotify",
            PlatformLink::Deezer { .. } => "Deezer",
            PlatformLink::AppleMusicAlbum { .. } | PlatformLink::AppleMusicSong { .. } => {
                "Apple Music"
            }
        }
    }
}

/// Whether `text` contains a recognized music platform link.
pub fn is_music_url(text: &str) -> bool {
    PlatformLink::detect(text).is_some()
}

/// Turns an Apple Music URL slug into a search query: `my-cool-song` -> `my cool song`.
pub fn slug_to_query(slug: &str) -> Option<String> {
    if slug.is_empty() {
        return None;
    }
    // Invalid UTF-8 sequences decode to U+FFFD instead of failing the slug.
    let bytes = urlencoding::decode_binary(slug.as_bytes());
    Some(String::from_utf8_lossy(&bytes).replace('-', " "))
}

/// Resolves platform links to plain-text search queries.
///
/// Spotify links go through the oEmbed endpoint and Deezer links through the
/// public track API, one request each. Apple Music links are resolved from the
/// URL slug without any request. Every failure is logged and yields `None`,
/// in which case the caller should search for the original text instead.
#[derive(Debug, Clone)]
pub struct PlatformResolver {
    client: Client,
    spotify_oembed_url: String,
    deezer_api_url: String,
    timeout: Duration,
}

impl PlatformResolver {
    pub fn new(
        client: Client,
        spotify_oembed_url: impl Into<String>,
        deezer_api_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            spotify_oembed_url: spotify_oembed_url.into(),
            deezer_api_url: deezer_api_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Resolves `text` to a search query, or `None` if it is not a supported
    /// link or resolution failed.
    pub async fn resolve_url(&self, text: &str) -> Option<String> {
        match PlatformLink::detect(text)? {
            PlatformLink::Spotify { url, .. } => self.resolve_spotify(&url).await,
            PlatformLink::Deezer { track_id } => self.resolve_deezer(&track_id).await,
            PlatformLink::AppleMusicAlbum { slug, .. } | PlatformLink::AppleMusicSong { slug, .. } => {
                let query = slug_to_query(&slug)?;
                info!("Resolved Apple Music URL to: {}", query);
                Some(query)
            }
        }
    }

    // oEmbed titles are already "Song by Artist" shaped.
    async fn resolve_spotify(&self, url: &str) -> Option<String> {
        let oembed_url = format!(
            "{}?url={}",
            self.spotify_oembed_url,
            urlencoding::encode(url)
        );

        match self.get_json(&oembed_url).await {
            Ok(body) => {
                let title = body.get("title").and_then(Value::as_str).unwrap_or_default();
                if title.is_empty() {
                    return None;
                }
                info!("Resolved Spotify URL to: {}", title);
                Some(title.to_string())
            }
            Err(e) => {
                warning!("Spotify URL resolution failed: {}", e);
                None
            }
        }
    }

    async fn resolve_deezer(&self, track_id: &str) -> Option<String> {
        let api_url = format!("{}/track/{}", self.deezer_api_url, track_id);

        let body = match self.get_json(&api_url).await {
            Ok(body) => body,
            Err(e) => {
                warning!("Deezer URL resolution failed: {}", e);
                return None;
            }
        };

        let title = body.get("title").and_then(Value::as_str).unwrap_or_default();
        let artist = body
            .get("artist")
            .and_then(|a| a.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        match (title.is_empty(), artist.is_empty()) {
            (false, false) => {
                let query = format!("{} {}", title, artist);
                info!("Resolved Deezer URL to: {}", query);
                Some(query)
            }
            (false, true) => Some(title.to_string()),
            _ => None,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderError> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ProviderError::Status(response.status()));
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
