use std::{io, path::PathBuf, process::Command, sync::Arc};

use serde_json::Value;
use tokio::sync::Semaphore;

use crate::{
    info,
    music::error::ExtractError,
    normalize,
    types::{Song, Source},
    warning,
};

/// Fixed option set passed to every extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub format: String,
    pub no_playlist: bool,
    pub force_ipv4: bool,
    pub skip_download: bool,
    pub socket_timeout_secs: u64,
    pub default_search: String,
}

impl ExtractOptions {
    pub fn new(socket_timeout_secs: u64) -> Self {
        Self {
            format: "bestaudio/best".to_string(),
            no_playlist: true,
            force_ipv4: true,
            skip_download: true,
            socket_timeout_secs,
            default_search: Source::Youtube.search_prefix().to_string(),
        }
    }

    pub fn with_default_search(mut self, prefix: &str) -> Self {
        self.default_search = prefix.to_string();
        self
    }
}

/// Blocking port to a media extraction tool.
///
/// `target` is either a search term such as `ytsearch5:some song` or a
/// permanent page URL. Implementations may block for a long time; callers
/// must keep them off the async executor.
pub trait MediaExtractor: Send + Sync {
    fn extract_info(&self, target: &str, options: &ExtractOptions) -> Result<Value, ExtractError>;
}

/// [`MediaExtractor`] backed by the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    binary: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn args(target: &str, options: &ExtractOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--format".to_string(),
            options.format.clone(),
            "--socket-timeout".to_string(),
            options.socket_timeout_secs.to_string(),
            "--default-search".to_string(),
            options.default_search.clone(),
        ];
        if options.no_playlist {
            args.push("--no-playlist".to_string());
        }
        if options.force_ipv4 {
            args.push("--force-ipv4".to_string());
        }
        if options.skip_download {
            args.push("--skip-download".to_string());
        }
        args.push("--".to_string());
        args.push(target.to_string());
        args
    }
}

impl MediaExtractor for YtDlpExtractor {
    fn extract_info(&self, target: &str, options: &ExtractOptions) -> Result<Value, ExtractError> {
        let output = Command::new(&self.binary)
            .args(Self::args(target, options))
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    ExtractError::NotInstalled(self.binary.display().to_string())
                }
                _ => ExtractError::Io(e),
            })?;

        if !output.status.success() {
            return Err(ExtractError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// YouTube and SoundCloud fallback built on a [`MediaExtractor`].
///
/// Extraction runs on tokio's blocking pool. A semaphore bounds how many
/// extractions run at once across the whole process; the calling task waits
/// for a permit and then for the worker to finish. Dropping the future stops
/// the wait, but the worker holds its permit until the extraction returns.
#[derive(Clone)]
pub struct MediaProvider {
    extractor: Arc<dyn MediaExtractor>,
    workers: Arc<Semaphore>,
    socket_timeout_secs: u64,
}

impl MediaProvider {
    pub fn new(
        extractor: Arc<dyn MediaExtractor>,
        max_workers: usize,
        socket_timeout_secs: u64,
    ) -> Self {
        Self {
            extractor,
            workers: Arc::new(Semaphore::new(max_workers.max(1))),
            socket_timeout_secs,
        }
    }

    /// Search YouTube; always returns a list, possibly empty.
    pub async fn search_youtube(&self, query: &str, limit: u32) -> Vec<Song> {
        self.search(Source::Youtube, query, limit).await
    }

    /// Search SoundCloud; always returns a list, possibly empty.
    pub async fn search_soundcloud(&self, query: &str, limit: u32) -> Vec<Song> {
        self.search(Source::Soundcloud, query, limit).await
    }

    async fn search(&self, source: Source, query: &str, limit: u32) -> Vec<Song> {
        let prefix = source.search_prefix();
        let term = format!("{prefix}{limit}:{query}");
        let options = ExtractOptions::new(self.socket_timeout_secs).with_default_search(prefix);

        let result = match self.run_blocking(term, options).await {
            Ok(result) => result,
            Err(e) => {
                warning!("{} search failed for '{}': {}", source, query, e);
                return Vec::new();
            }
        };

        let songs: Vec<Song> = search_entries(&result)
            .into_iter()
            .map(|entry| normalize::normalize_media(entry, source))
            .collect();

        if !songs.is_empty() {
            info!("{} search '{}' returned {} results", source, query, songs.len());
        }
        songs
    }

    /// Re-extracts a fresh info record from a permanent page URL.
    pub async fn extract_stream_url(&self, webpage_url: &str) -> Option<Song> {
        let options = ExtractOptions::new(self.socket_timeout_secs);

        match self.run_blocking(webpage_url.to_string(), options).await {
            Ok(info) if info.is_object() => Some(normalize::normalize_media(
                &info,
                Source::from_webpage_url(webpage_url),
            )),
            Ok(_) => None,
            Err(e) => {
                warning!("Stream extraction failed for '{}': {}", webpage_url, e);
                None
            }
        }
    }

    /// Replaces an expired stream URL with a freshly extracted one.
    ///
    /// Songs without a `webpage_url` are returned untouched with no
    /// extraction. Only `best_url` and `download_urls` are ever overwritten,
    /// and only when the re-extraction produced a playable URL.
    pub async fn refresh_song(&self, mut song: Song) -> Song {
        let Some(webpage_url) = song.webpage_url.clone().filter(|url| !url.is_empty()) else {
            return song;
        };

        if let Some(fresh) = self.extract_stream_url(&webpage_url).await {
            if !fresh.best_url.is_empty() {
                song.best_url = fresh.best_url;
                song.download_urls = fresh.download_urls;
            }
        }
        song
    }

    async fn run_blocking(
        &self,
        target: String,
        options: ExtractOptions,
    ) -> Result<Value, ExtractError> {
        // The permit lives in the worker so an abandoned call keeps its slot
        // until the extraction actually finishes.
        let permit = Arc::clone(&self.workers)
            .acquire_owned()
            .await
            .map_err(|e| ExtractError::Join(e.to_string()))?;

        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            extractor.extract_info(&target, &options)
        })
        .await
        .map_err(|e| ExtractError::Join(e.to_string()))?
    }
}

/// Entries of a search result; a single record with an `id` counts as one entry.
pub fn search_entries(result: &Value) -> Vec<&Value> {
    match result.get("entries").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => {
            entries.iter().filter(|e| e.is_object()).collect()
        }
        _ if result.get("id").is_some_and(normalize::truthy) => vec![result],
        _ => Vec::new(),
    }
}
