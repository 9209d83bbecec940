use crate::{
    Res, info,
    music::{MusicService, PlatformLink},
    warning,
};

pub async fn resolve(service: &MusicService, url: &str) -> Res<()> {
    let Some(link) = PlatformLink::detect(url) else {
        warning!("Not a Spotify, Deezer or Apple Music track link: {}", url);
        return Ok(());
    };

    let pb = super::spinner(&format!("Resolving {} link...", link.platform()));
    let query = service.resolver().resolve_url(url).await;
    pb.finish_and_clear();

    match query {
        Some(query) => {
            info!("{} link resolved", link.platform());
            println!("{}", query);
        }
        None => warning!("Could not resolve link, search for it as plain text instead."),
    }
    Ok(())
}
