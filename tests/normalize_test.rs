use serde_json::json;
use tunefetch::normalize::{catalog, normalize_media, normalize_song, normalize_songs};
use tunefetch::types::{DownloadUrl, Source};

#[test]
fn test_best_url_defaults_to_320kbps() {
    let song = normalize_song(&json!({
        "downloadUrl": [
            {"quality": "96kbps", "url": "a"},
            {"quality": "320kbps", "url": "b"}
        ]
    }));
    assert_eq!(song.best_url, "b");
    assert_eq!(song.download_urls.len(), 2);
}

#[test]
fn test_best_url_empty_iff_no_download_urls() {
    let song = normalize_song(&json!({"id": "1", "name": "x"}));
    assert!(song.download_urls.is_empty());
    assert_eq!(song.best_url, "");

    let song = normalize_song(&json!({
        "downloadUrl": [{"quality": "", "url": "a"}, {"quality": "96kbps"}, "junk"]
    }));
    assert!(song.download_urls.is_empty());
    assert_eq!(song.best_url, "");
}

#[test]
fn test_nested_primary_artists_are_joined() {
    let song = normalize_song(&json!({
        "artists": {"primary": [{"name": "A"}, {"name": "B"}]}
    }));
    assert_eq!(song.artist, "A, B");
}

#[test]
fn test_artist_layouts_in_priority_order() {
    let plain = json!({"primaryArtists": "Arijit Singh", "artist": "Other"});
    assert_eq!(catalog::extract_artist(&plain), "Arijit Singh");

    let list = json!({"primaryArtists": [{"name": "X"}, {"id": "2"}, {"name": "Y"}]});
    assert_eq!(catalog::extract_artist(&list), "X, Y");

    // an empty string layout does not stop the search
    let fallthrough = json!({
        "primaryArtists": "",
        "artists": {"primary": [{"name": "Nested"}]}
    });
    assert_eq!(catalog::extract_artist(&fallthrough), "Nested");

    let flat = json!({"artists": {"primary": []}, "artist": "Flat &amp; Co"});
    assert_eq!(catalog::extract_artist(&flat), "Flat & Co");

    assert_eq!(catalog::extract_artist(&json!({})), "Unknown");
}

#[test]
fn test_image_prefers_500x500_at_any_position() {
    let entries = vec![
        json!({"quality": "50x50", "url": "small"}),
        json!({"quality": "150x150", "link": "medium"}),
        json!({"quality": "500x500", "url": "large"}),
    ];

    for position in 0..entries.len() {
        let mut images = entries.clone();
        let large = images.remove(2);
        images.insert(position, large);
        let song = normalize_song(&json!({ "image": images }));
        assert_eq!(song.image, "large", "500x500 at position {}", position);
    }
}

#[test]
fn test_image_falls_back_to_last_entry() {
    let song = normalize_song(&json!({
        "image": [
            {"quality": "50x50", "url": "small"},
            {"quality": "150x150", "link": "medium"}
        ]
    }));
    assert_eq!(song.image, "medium");
}

#[test]
fn test_missing_or_empty_image_is_empty() {
    assert_eq!(normalize_song(&json!({})).image, "");
    assert_eq!(normalize_song(&json!({"image": []})).image, "");
    assert_eq!(normalize_song(&json!({"image": "https://x/y.jpg"})).image, "");
    assert_eq!(normalize_song(&json!({"image": ["not-an-object"]})).image, "");
}

#[test]
fn test_full_catalog_record() {
    let song = normalize_song(&json!({
        "id": "abc123",
        "name": "Tum Hi Ho &amp; More",
        "album": {"name": "Aashiqui 2"},
        "year": 2013,
        "duration": "262",
        "language": "hindi",
        "hasLyrics": true,
        "primaryArtists": "Arijit Singh",
        "image": [{"quality": "500x500", "link": "img"}],
        "download_url": [
            {"quality": "48kbps", "link": "l48"},
            {"quality": "160kbps", "link": "l160"}
        ]
    }));

    assert_eq!(song.id, "abc123");
    assert_eq!(song.name, "Tum Hi Ho & More");
    assert_eq!(song.album, "Aashiqui 2");
    assert_eq!(song.year, "2013");
    assert_eq!(song.duration, 262);
    assert_eq!(song.duration_formatted, "4:22");
    assert_eq!(song.language, "hindi");
    assert!(song.has_lyrics);
    assert_eq!(song.image, "img");
    assert_eq!(song.best_url, "l160");
    assert_eq!(song.source, None);
    assert_eq!(song.webpage_url, None);
    assert_eq!(song.provider(), "jiosaavn");
}

#[test]
fn test_malformed_record_degrades_to_defaults() {
    let song = normalize_song(&json!({
        "id": 42,
        "album": ["weird"],
        "duration": "three minutes",
        "hasLyrics": "false",
        "downloadUrl": {"quality": "320kbps"}
    }));

    assert_eq!(song.id, "42");
    assert_eq!(song.name, "Unknown");
    assert_eq!(song.artist, "Unknown");
    assert_eq!(song.album, "");
    assert_eq!(song.year, "");
    assert_eq!(song.duration, 0);
    assert_eq!(song.duration_formatted, "0:00");
    assert!(!song.has_lyrics);
    assert!(song.download_urls.is_empty());
}

#[test]
fn test_normalize_songs_skips_non_objects() {
    let songs = normalize_songs(&[json!({"id": "1"}), json!(null), json!("x"), json!({"id": "2"})]);
    let ids: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_media_record_youtube() {
    let song = normalize_media(
        &json!({
            "id": "dQw4w9WgXcQ",
            "title": "Rick Astley - Never Gonna Give You Up",
            "uploader": "Rick Astley",
            "channel": "RickAstleyVEVO",
            "duration": 212.0,
            "abr": 129.478,
            "url": "https://rr1.googlevideo.com/audio",
            "thumbnail": "flat.jpg",
            "thumbnails": [{"url": "small.jpg"}, {"url": "maxres.jpg"}],
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        }),
        Source::Youtube,
    );

    assert_eq!(song.name, "Rick Astley - Never Gonna Give You Up");
    assert_eq!(song.artist, "Rick Astley");
    assert_eq!(song.duration, 212);
    assert_eq!(song.duration_formatted, "3:32");
    assert_eq!(song.image, "maxres.jpg");
    assert_eq!(
        song.download_urls,
        vec![DownloadUrl::new("129kbps", "https://rr1.googlevideo.com/audio")]
    );
    assert_eq!(song.best_url, "https://rr1.googlevideo.com/audio");
    assert_eq!(song.source, Some(Source::Youtube));
    assert_eq!(
        song.webpage_url.as_deref(),
        Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
    );
    assert_eq!(song.language, "");
    assert!(!song.has_lyrics);
    assert!(song.is_refreshable());
}

#[test]
fn test_media_record_prefers_track_and_artist_fields() {
    let song = normalize_media(
        &json!({
            "track": "Song",
            "title": "Channel upload title",
            "artist": "Band",
            "uploader": "Label",
            "album": "LP",
            "release_year": 2019,
            "url": "u",
            "original_url": "https://soundcloud.com/band/song"
        }),
        Source::Soundcloud,
    );

    assert_eq!(song.name, "Song");
    assert_eq!(song.artist, "Band");
    assert_eq!(song.album, "LP");
    assert_eq!(song.year, "2019");
    assert_eq!(song.download_urls, vec![DownloadUrl::new("320kbps", "u")]);
    assert_eq!(song.webpage_url.as_deref(), Some("https://soundcloud.com/band/song"));
    assert_eq!(song.provider(), "soundcloud");
}

#[test]
fn test_media_record_uses_audio_only_requested_format() {
    let song = normalize_media(
        &json!({
            "url": "muxed",
            "requested_formats": [
                {"acodec": "none", "vcodec": "vp9", "url": "video-only"},
                {"acodec": "opus", "url": "audio-only"}
            ]
        }),
        Source::Youtube,
    );
    assert_eq!(song.best_url, "audio-only");
}

#[test]
fn test_media_record_without_url_has_no_downloads() {
    let song = normalize_media(&json!({"title": "x"}), Source::Youtube);
    assert!(song.download_urls.is_empty());
    assert_eq!(song.best_url, "");
    assert_eq!(song.artist, "Unknown");
    assert_eq!(song.webpage_url, None);
}
