//! # CLI Module
//!
//! Command implementations behind the `tunefetch` binary. Each command builds
//! on [`MusicService`] and only deals with presentation: spinners while
//! upstream calls are in flight, tables or JSON for results, and friendly
//! "nothing found" messages when a provider chain comes back empty.
//!
//! ## Commands
//!
//! - [`resolve`] - Turn a Spotify/Deezer/Apple Music link into a search query
//! - [`search`] - Search by text or link (catalog, then YouTube, then SoundCloud)
//! - [`song`] - Fetch a catalog song by id
//! - [`media_search`] - Search YouTube or SoundCloud directly
//! - [`refresh`] - Extract a fresh stream URL from a page URL
//! - [`quality`] - Print the URL for a specific quality tier
//!
//! [`MusicService`]: crate::music::MusicService

mod refresh;
mod resolve;
mod search;

pub use refresh::refresh;
pub use resolve::resolve;
pub use search::media_search;
pub use search::quality;
pub use search::search;
pub use search::song;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    types::{Song, SongTableRow},
};

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub(crate) fn print_songs(songs: &[Song], json: bool) -> Res<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(songs)?);
        return Ok(());
    }

    let rows: Vec<SongTableRow> = songs.iter().map(SongTableRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
