use crate::{
    Res,
    music::MusicService,
    success,
    types::Source,
    utils::{self, DOWNLOAD_QUALITIES},
    warning,
};

pub async fn search(service: &MusicService, text: &str, limit: u32, json: bool) -> Res<()> {
    let pb = super::spinner(&format!("Searching for '{}'...", text.trim()));
    let songs = service.lookup(text, limit).await;
    pb.finish_and_clear();

    match songs {
        Some(songs) => {
            success!("Found {} songs", songs.len());
            super::print_songs(&songs, json)?;
        }
        None => warning!("Nothing found for '{}'.", text.trim()),
    }
    Ok(())
}

pub async fn song(service: &MusicService, id: &str, json: bool) -> Res<()> {
    let pb = super::spinner(&format!("Fetching song {}...", id));
    let song = service.catalog().get_song_by_id(id).await;
    pb.finish_and_clear();

    match song {
        Some(song) => super::print_songs(&[song], json)?,
        None => warning!("No song with id '{}'.", id),
    }
    Ok(())
}

pub async fn media_search(
    service: &MusicService,
    source: Source,
    query: &str,
    limit: u32,
    json: bool,
) -> Res<()> {
    let pb = super::spinner(&format!("Searching {} for '{}'...", source, query));
    let songs = match source {
        Source::Youtube => service.media().search_youtube(query, limit).await,
        Source::Soundcloud => service.media().search_soundcloud(query, limit).await,
    };
    pb.finish_and_clear();

    if songs.is_empty() {
        warning!("Nothing found on {} for '{}'.", source, query);
        return Ok(());
    }
    super::print_songs(&songs, json)
}

pub async fn quality(service: &MusicService, id: &str, tier: &str) -> Res<()> {
    if !DOWNLOAD_QUALITIES.contains(&tier) {
        warning!(
            "Unsupported quality '{}', choose one of {}",
            tier,
            DOWNLOAD_QUALITIES.join(", ")
        );
        return Ok(());
    }

    let pb = super::spinner(&format!("Fetching song {}...", id));
    let song = match service.catalog().get_song_by_id(id).await {
        Some(song) => service.catalog().ensure_download_urls(song).await,
        None => {
            pb.finish_and_clear();
            warning!("No song with id '{}'.", id);
            return Ok(());
        }
    };
    pb.finish_and_clear();

    let url = utils::url_for_quality(&song.download_urls, tier);
    if url.is_empty() {
        warning!("'{}' has no download URLs.", song.name);
    } else {
        println!("{}", url);
    }
    Ok(())
}
