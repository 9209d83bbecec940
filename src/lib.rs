//! Multi-provider music resolution library
//!
//! This library turns free-text queries, music platform links and previously
//! resolved song records into a single canonical song shape with playable
//! audio URLs. Upstream providers are unreliable and disagree on response
//! formats, so every provider falls back in a fixed order and normalizes its
//! output before handing it back.
//!
//! # Modules
//!
//! - `cli` - Command implementations used by the `tunefetch` binary
//! - `config` - Configuration management and environment variables
//! - `music` - Providers (catalog mirrors, media extraction, platform links)
//! - `normalize` - Mapping of provider records into [`types::Song`]
//! - `types` - Data structures and type definitions
//! - `utils` - Quality selection and text helpers
//!
//! # Example
//!
//! ```
//! use tunefetch::{config, music::MusicService};
//!
//! #[tokio::main]
//! async fn main() -> tunefetch::Res<()> {
//!     config::load_env().await?;
//!     let service = MusicService::from_config(config::MusicConfig::from_env())?;
//!     let songs = service.lookup("https://open.spotify.com/track/6rqhFgbbKwnb9MLmUQDhG6", 5).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod music;
pub mod normalize;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Example
///
/// ```
/// use tunefetch::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// All four log macros write to stderr. Stdout carries only command output
/// such as tables, JSON and URLs.
///
/// Used for status updates such as which mirror answered a search or what a
/// platform link resolved to.
///
/// # Example
///
/// ```
/// info!("Resolved Deezer URL to: {}", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Found {} songs", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary uses this macro. Library code never terminates the process;
/// upstream failures are reported with [`warning!`] and surface as "no result".
///
/// # Example
///
/// ```
/// error!("Cannot build HTTP client. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Every transient upstream failure (bad status, timeout, transport error,
/// undecodable body) is reported through this macro before the next fallback
/// is tried.
///
/// # Example
///
/// ```
/// warning!("Music API {} returned status {}", mirror, status);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
