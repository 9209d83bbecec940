use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One playable URL for a given quality tier, e.g. `{"quality": "320kbps", "url": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadUrl {
    pub quality: String,
    pub url: String,
}

impl DownloadUrl {
    pub fn new(quality: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            quality: quality.into(),
            url: url.into(),
        }
    }
}

/// Media service a song was extracted from.
///
/// Catalog songs carry no source at all; their URLs do not expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Youtube,
    Soundcloud,
}

impl Source {
    /// Search prefix understood by the extraction tool.
    pub fn search_prefix(&self) -> &'static str {
        match self {
            Source::Youtube => "ytsearch",
            Source::Soundcloud => "scsearch",
        }
    }

    /// Infers the service from a permanent page URL.
    pub fn from_webpage_url(webpage_url: &str) -> Self {
        if webpage_url.contains("soundcloud.com") {
            Source::Soundcloud
        } else {
            Source::Youtube
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Youtube => write!(f, "youtube"),
            Source::Soundcloud => write!(f, "soundcloud"),
        }
    }
}

/// Canonical song record produced by every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub duration: u64,
    pub duration_formatted: String,
    pub language: String,
    pub has_lyrics: bool,
    pub image: String,
    pub download_urls: Vec<DownloadUrl>,
    pub best_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpage_url: Option<String>,
}

impl Song {
    /// Provider label shown to users; catalog songs have no explicit source.
    pub fn provider(&self) -> String {
        match self.source {
            Some(source) => source.to_string(),
            None => "jiosaavn".to_string(),
        }
    }

    pub fn has_playable_urls(&self) -> bool {
        !self.download_urls.is_empty() && !self.best_url.is_empty()
    }

    /// Songs without a page URL are assumed to have permanent stream URLs.
    pub fn is_refreshable(&self) -> bool {
        self.webpage_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    pub source: String,
    pub qualities: String,
}

impl From<&Song> for SongTableRow {
    fn from(song: &Song) -> Self {
        SongTableRow {
            id: song.id.clone(),
            name: song.name.clone(),
            artist: song.artist.clone(),
            album: song.album.clone(),
            duration: song.duration_formatted.clone(),
            source: song.provider(),
            qualities: song
                .download_urls
                .iter()
                .map(|d| d.quality.as_str())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}
