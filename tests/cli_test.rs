mod common;

use axum::{Json, Router, extract::Path, routing::get};
use serde_json::json;
use tokio::process::Command;
use tunefetch::types::Song;

use common::serve;

async fn fake_catalog() -> String {
    serve(
        Router::new()
            .route(
                "/search/songs",
                get(|| async {
                    Json(json!({"data": {"results": [{
                        "id": "s1",
                        "name": "Hello",
                        "downloadUrl": [{"quality": "320kbps", "url": "https://cdn/s1.mp4"}]
                    }]}}))
                }),
            )
            .route(
                "/songs/{id}",
                get(|Path(id): Path<String>| async move {
                    Json(json!({"data": [{
                        "id": id,
                        "name": "By Id",
                        "downloadUrl": [
                            {"quality": "96kbps", "url": "https://cdn/96.mp4"},
                            {"quality": "160kbps", "url": "https://cdn/160.mp4"}
                        ]
                    }]}))
                }),
            ),
    )
    .await
}

async fn tunefetch(mirror: &str, args: &[&str]) -> (String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_tunefetch"))
        .args(args)
        .env("MUSIC_API_MIRRORS", mirror)
        .env("YTDLP_PATH", "/nonexistent/yt-dlp")
        .output()
        .await
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    (
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[tokio::test]
async fn test_search_json_stdout_is_pure_json() {
    let mirror = fake_catalog().await;
    let (stdout, stderr) = tunefetch(&mirror, &["search", "hello", "--json"]).await;

    let songs: Vec<Song> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].best_url, "https://cdn/s1.mp4");
    assert!(stderr.contains("Found 1 songs"));
}

#[tokio::test]
async fn test_song_json_stdout_is_pure_json() {
    let mirror = fake_catalog().await;
    let (stdout, _) = tunefetch(&mirror, &["song", "abc", "--json"]).await;

    let songs: Vec<Song> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(songs[0].id, "abc");
    assert_eq!(songs[0].name, "By Id");
}

#[tokio::test]
async fn test_quality_prints_only_the_url() {
    let mirror = fake_catalog().await;
    let (stdout, _) = tunefetch(&mirror, &["quality", "abc", "160kbps"]).await;
    assert_eq!(stdout.trim(), "https://cdn/160.mp4");
}

#[tokio::test]
async fn test_resolve_prints_only_the_query() {
    let mirror = fake_catalog().await;
    let (stdout, stderr) = tunefetch(
        &mirror,
        &["resolve", "https://music.apple.com/us/album/my-cool-song/123?i=456"],
    )
    .await;
    assert_eq!(stdout.trim(), "my cool song");
    assert!(stderr.contains("Apple Music link resolved"));
}
