use crate::{Res, music::MusicService, warning};

pub async fn refresh(service: &MusicService, webpage_url: &str, json: bool) -> Res<()> {
    let pb = super::spinner("Extracting stream URL...");
    let song = service.media().extract_stream_url(webpage_url).await;
    pb.finish_and_clear();

    match song {
        Some(song) if !song.best_url.is_empty() => {
            if json {
                super::print_songs(&[song], true)?;
            } else {
                println!("{}", song.best_url);
            }
        }
        _ => warning!("No playable stream found for {}", webpage_url),
    }
    Ok(())
}
