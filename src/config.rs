//! Configuration management for tunefetch.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Unlike credentials, every setting here has a
//! working default, so a missing variable never stops the program.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

/// Public catalog mirrors, tried in this order.
pub const DEFAULT_MIRRORS: [&str; 4] = [
    "https://jiosaavn-api2.vercel.app",
    "https://jiosaavn-api-privatecvc2.vercel.app",
    "https://saavn.dev/api",
    "https://jiosaavn-api.vercel.app",
];

pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_SOCKET_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_EXTRACTION_WORKERS: usize = 4;
pub const DEFAULT_SPOTIFY_OEMBED_URL: &str = "https://open.spotify.com/oembed";
pub const DEFAULT_DEEZER_API_URL: &str = "https://api.deezer.com";

/// Loads environment variables from `.env` files.
///
/// Looks for `tunefetch/.env` in the platform-specific local data directory
/// (creating the directory if needed) and for `.env` in the working
/// directory. Values already present in the environment are never
/// overwritten. Missing files are not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tunefetch/.env`
/// - macOS: `~/Library/Application Support/tunefetch/.env`
/// - Windows: `%LOCALAPPDATA%/tunefetch/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunefetch/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::dotenv().ok();
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Settings shared by all providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicConfig {
    pub mirrors: Vec<String>,
    pub catalog_timeout: Duration,
    pub resolver_timeout: Duration,
    pub spotify_oembed_url: String,
    pub deezer_api_url: String,
    pub ytdlp_path: String,
    pub socket_timeout_secs: u64,
    pub extraction_workers: usize,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            catalog_timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            resolver_timeout: Duration::from_secs(DEFAULT_RESOLVER_TIMEOUT_SECS),
            spotify_oembed_url: DEFAULT_SPOTIFY_OEMBED_URL.to_string(),
            deezer_api_url: DEFAULT_DEEZER_API_URL.to_string(),
            ytdlp_path: "yt-dlp".to_string(),
            socket_timeout_secs: DEFAULT_SOCKET_TIMEOUT_SECS,
            extraction_workers: DEFAULT_EXTRACTION_WORKERS,
        }
    }
}

impl MusicConfig {
    /// Reads settings from the process environment.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `MUSIC_API_MIRRORS` | comma-separated catalog base URLs, in fallback order |
    /// | `MUSIC_API_TIMEOUT_SECS` | per-request timeout for catalog mirrors |
    /// | `RESOLVER_TIMEOUT_SECS` | per-request timeout for Spotify/Deezer lookups |
    /// | `SPOTIFY_OEMBED_URL` | Spotify oEmbed endpoint |
    /// | `DEEZER_API_URL` | Deezer public API base URL |
    /// | `YTDLP_PATH` | extraction executable |
    /// | `YTDLP_SOCKET_TIMEOUT_SECS` | socket timeout passed to the extractor |
    /// | `YTDLP_WORKERS` | concurrent extractions allowed |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or invalid values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str| text(key).and_then(|v| v.parse::<u64>().ok());

        let mirrors: Vec<String> = text("MUSIC_API_MIRRORS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            mirrors: if mirrors.is_empty() {
                defaults.mirrors
            } else {
                mirrors
            },
            catalog_timeout: number("MUSIC_API_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.catalog_timeout),
            resolver_timeout: number("RESOLVER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.resolver_timeout),
            spotify_oembed_url: text("SPOTIFY_OEMBED_URL").unwrap_or(defaults.spotify_oembed_url),
            deezer_api_url: text("DEEZER_API_URL").unwrap_or(defaults.deezer_api_url),
            ytdlp_path: text("YTDLP_PATH").unwrap_or(defaults.ytdlp_path),
            socket_timeout_secs: number("YTDLP_SOCKET_TIMEOUT_SECS")
                .unwrap_or(defaults.socket_timeout_secs),
            extraction_workers: number("YTDLP_WORKERS")
                .map(|n| n as usize)
                .filter(|n| *n > 0)
                .unwrap_or(defaults.extraction_workers),
        }
    }
}
