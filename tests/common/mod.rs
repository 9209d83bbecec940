#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::Router;
use serde_json::Value;
use tunefetch::{
    music::{CatalogClient, ExtractError, ExtractOptions, MediaExtractor},
    types::{DownloadUrl, Song},
};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn catalog(mirrors: Vec<String>) -> CatalogClient {
    CatalogClient::new(reqwest::Client::new(), mirrors, Duration::from_secs(5))
}

pub fn catalog_song(id: &str, name: &str) -> Song {
    Song {
        id: id.to_string(),
        name: name.to_string(),
        artist: "Unknown".to_string(),
        album: String::new(),
        year: String::new(),
        duration: 0,
        duration_formatted: "0:00".to_string(),
        language: String::new(),
        has_lyrics: false,
        image: String::new(),
        download_urls: Vec::new(),
        best_url: String::new(),
        source: None,
        webpage_url: None,
    }
}

pub fn playable_song(id: &str) -> Song {
    let mut song = catalog_song(id, "Complete");
    song.download_urls = vec![DownloadUrl::new("320kbps", "https://cdn/full.mp4")];
    song.best_url = "https://cdn/full.mp4".to_string();
    song
}

/// In-memory extractor returning canned info records keyed by target.
#[derive(Default)]
pub struct FakeExtractor {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<(String, ExtractOptions)>>,
}

impl FakeExtractor {
    pub fn with(mut self, target: &str, info: Value) -> Self {
        self.responses.insert(target.to_string(), info);
        self
    }

    pub fn calls(&self) -> Vec<(String, ExtractOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl MediaExtractor for FakeExtractor {
    fn extract_info(&self, target: &str, options: &ExtractOptions) -> Result<Value, ExtractError> {
        self.calls
            .lock()
            .unwrap()
            .push((target.to_string(), options.clone()));
        self.responses
            .get(target)
            .cloned()
            .ok_or_else(|| ExtractError::Failed {
                status: Some(1),
                stderr: format!("ERROR: no match for {}", target),
            })
    }
}
