use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    info,
    music::{
        envelope::{SearchEnvelope, SongEnvelope},
        error::ProviderError,
    },
    normalize,
    types::Song,
    warning,
};

/// Client for the primary song catalog, served by several mirrors.
///
/// Mirrors are queried strictly one after another in the configured order.
/// The first mirror that answers with usable data wins; nothing is merged or
/// compared across mirrors since they all serve the same catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    mirrors: Vec<String>,
    timeout: Duration,
}

impl CatalogClient {
    pub fn new(client: Client, mirrors: Vec<String>, timeout: Duration) -> Self {
        Self {
            client,
            mirrors: mirrors
                .into_iter()
                .map(|m| m.trim_end_matches('/').to_string())
                .collect(),
            timeout,
        }
    }

    /// Searches the catalog, trying each mirror until one returns results.
    ///
    /// # Returns
    ///
    /// - `Some(songs)` - normalized, non-empty results of the first usable mirror,
    ///   in the order that mirror returned them
    /// - `None` - every mirror failed (bad status, timeout, transport error)
    ///   or returned nothing
    ///
    /// # Example
    ///
    /// ```
    /// let songs = catalog.search("kesariya", 7).await.unwrap_or_default();
    /// ```
    pub async fn search(&self, query: &str, limit: u32) -> Option<Vec<Song>> {
        for mirror in &self.mirrors {
            match self.search_mirror(mirror, query, limit).await {
                Ok(songs) => {
                    info!(
                        "Music search '{}' returned {} results from {}",
                        query,
                        songs.len(),
                        mirror
                    );
                    return Some(songs);
                }
                Err(e) => warning!("Music API {} {} for query '{}'", mirror, e, query),
            }
        }

        warning!("All music APIs failed for query: {}", query);
        None
    }

    async fn search_mirror(
        &self,
        mirror: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Song>, ProviderError> {
        let url = format!("{mirror}/search/songs");
        let limit = limit.to_string();
        let body = self
            .get_json(&url, &[("query", query), ("limit", limit.as_str())])
            .await?;

        let songs = SearchEnvelope::decode(&body)
            .map(|envelope| normalize::normalize_songs(envelope.results()))
            .unwrap_or_default();

        if songs.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(songs)
    }

    /// Fetches one song by its catalog id.
    ///
    /// Uses the same mirror order and failure tolerance as [`CatalogClient::search`].
    /// A record is only accepted once normalized with a non-empty id.
    pub async fn get_song_by_id(&self, song_id: &str) -> Option<Song> {
        for mirror in &self.mirrors {
            match self.song_from_mirror(mirror, song_id).await {
                Ok(song) => {
                    info!("Fetched song {} from {}", song_id, mirror);
                    return Some(song);
                }
                Err(e) => warning!("Music API {} {} for song ID '{}'", mirror, e, song_id),
            }
        }

        warning!("All music APIs failed for song ID: {}", song_id);
        None
    }

    async fn song_from_mirror(&self, mirror: &str, song_id: &str) -> Result<Song, ProviderError> {
        let url = format!("{mirror}/songs/{}", urlencoding::encode(song_id));
        let body = self.get_json(&url, &[]).await?;

        SongEnvelope::decode(&body)
            .map(|envelope| normalize::normalize_song(envelope.song()))
            .filter(|song| !song.id.is_empty())
            .ok_or(ProviderError::Empty)
    }

    /// Makes sure a catalog song carries download URLs.
    ///
    /// A song that already has both `download_urls` and `best_url` is returned
    /// untouched without any request. Otherwise the song is looked up by id and,
    /// when the lookup yields URLs, only `download_urls` and `best_url` are
    /// replaced. Any failure returns the song as it was.
    pub async fn ensure_download_urls(&self, mut song: Song) -> Song {
        if song.has_playable_urls() || song.id.is_empty() {
            return song;
        }

        info!("Song '{}' missing download URLs, fetching by ID", song.name);
        if let Some(full) = self.get_song_by_id(&song.id).await {
            if !full.download_urls.is_empty() {
                song.download_urls = full.download_urls;
                song.best_url = full.best_url;
            }
        }
        song
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::Status(response.status()));
        }

        // Some mirrors answer JSON with a text/html content type.
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
