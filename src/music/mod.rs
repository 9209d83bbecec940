//! # Music Module
//!
//! Provider layer turning links, queries and stale song records into playable
//! [`Song`]s. Every provider absorbs upstream failures itself: a bad status,
//! a timeout, a transport error or an unexpected body shape is logged and the
//! next fallback is tried. Callers only ever see a result or its absence.
//!
//! ## Architecture
//!
//! ```text
//! MusicService (caller-facing facade)
//!     ├── PlatformResolver   Spotify / Deezer / Apple Music link -> query
//!     ├── CatalogClient      ordered catalog mirrors, first usable answer wins
//!     └── MediaProvider      YouTube / SoundCloud via a blocking extractor
//!              ↓
//!     normalize (pure)  ->  Song
//! ```
//!
//! ## Concurrency
//!
//! HTTP calls share one [`reqwest::Client`] and suspend only the calling task.
//! Every request carries its own timeout. Fallbacks are strictly sequential;
//! there is no fan-out across mirrors. Blocking extraction is moved to tokio's
//! blocking pool behind a process-wide semaphore. Dropping a returned future
//! abandons the in-flight request.

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod media;
pub mod resolver;

pub use catalog::CatalogClient;
pub use error::{ExtractError, ProviderError};
pub use media::{ExtractOptions, MediaExtractor, MediaProvider, YtDlpExtractor};
pub use resolver::{PlatformLink, PlatformResolver, is_music_url};

use std::sync::Arc;

use reqwest::Client;

use crate::{config::MusicConfig, info, types::Song};

/// Builds the HTTP client shared by all providers.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// The functional interface offered to callers such as a chat bot command.
#[derive(Clone)]
pub struct MusicService {
    resolver: PlatformResolver,
    catalog: CatalogClient,
    media: MediaProvider,
}

impl MusicService {
    pub fn new(resolver: PlatformResolver, catalog: CatalogClient, media: MediaProvider) -> Self {
        Self {
            resolver,
            catalog,
            media,
        }
    }

    /// Wires all providers from configuration, using `yt-dlp` for extraction.
    pub fn from_config(config: MusicConfig) -> Result<Self, reqwest::Error> {
        let extractor = Arc::new(YtDlpExtractor::new(config.ytdlp_path.clone()));
        Self::with_extractor(config, extractor)
    }

    pub fn with_extractor(
        config: MusicConfig,
        extractor: Arc<dyn MediaExtractor>,
    ) -> Result<Self, reqwest::Error> {
        let client = http_client()?;
        Ok(Self::new(
            PlatformResolver::new(
                client.clone(),
                config.spotify_oembed_url,
                config.deezer_api_url,
                config.resolver_timeout,
            ),
            CatalogClient::new(client, config.mirrors, config.catalog_timeout),
            MediaProvider::new(
                extractor,
                config.extraction_workers,
                config.socket_timeout_secs,
            ),
        ))
    }

    pub fn resolver(&self) -> &PlatformResolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn media(&self) -> &MediaProvider {
        &self.media
    }

    pub fn is_music_url(&self, text: &str) -> bool {
        is_music_url(text)
    }

    pub async fn resolve_url(&self, text: &str) -> Option<String> {
        self.resolver.resolve_url(text).await
    }

    /// Searches the catalog first, then YouTube, then SoundCloud.
    ///
    /// The first provider with results wins; results are never merged or
    /// re-ranked. `None` means nothing was found anywhere.
    pub async fn search(&self, query: &str, limit: u32) -> Option<Vec<Song>> {
        if let Some(songs) = self.catalog.search(query, limit).await {
            return Some(songs);
        }

        info!("Catalog has no match for '{}', trying YouTube", query);
        let songs = self.media.search_youtube(query, limit).await;
        if !songs.is_empty() {
            return Some(songs);
        }

        info!("YouTube has no match for '{}', trying SoundCloud", query);
        let songs = self.media.search_soundcloud(query, limit).await;
        (!songs.is_empty()).then_some(songs)
    }

    /// Searches for free text or a platform link.
    ///
    /// Links that cannot be resolved are searched for verbatim.
    pub async fn lookup(&self, text: &str, limit: u32) -> Option<Vec<Song>> {
        let text = text.trim();
        let query = if self.is_music_url(text) {
            self.resolve_url(text)
                .await
                .unwrap_or_else(|| text.to_string())
        } else {
            text.to_string()
        };
        self.search(&query, limit).await
    }

    /// Makes a song ready for playback: catalog songs get missing URLs filled
    /// in, extracted songs get a fresh stream URL.
    pub async fn playable(&self, song: Song) -> Song {
        if song.is_refreshable() {
            self.media.refresh_song(song).await
        } else {
            self.catalog.ensure_download_urls(song).await
        }
    }
}
