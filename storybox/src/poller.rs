//! Feed poller
//!
//! Fetches the latest story entry from an HTTP endpoint or a local file. Each
//! HTTP request carries a `cache=<unix millis>` query so intermediaries never
//! serve a stale entry.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::entry::StoryEntry;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid feed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FeedError {
    /// Failures expected while the producer is not running yet.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(e) => e.is_connect() || e.is_timeout(),
            FeedError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            FeedError::Status(_) | FeedError::Decode(_) => false,
        }
    }
}

/// Where the feed lives.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedLocation {
    Http(Url),
    File(PathBuf),
}

impl FeedLocation {
    /// `http://` and `https://` sources that parse as URLs are fetched over
    /// HTTP; anything else is treated as a path.
    pub fn parse(source: &str) -> Self {
        let lowered = source.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            if let Ok(url) = Url::parse(source) {
                return FeedLocation::Http(url);
            }
        }
        FeedLocation::File(PathBuf::from(source))
    }
}

impl std::fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedLocation::Http(url) => write!(f, "{url}"),
            FeedLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `url` with a `cache=<millis>` query pair appended.
pub fn cache_busted(url: &Url, millis: i64) -> Url {
    let mut busted = url.clone();
    busted
        .query_pairs_mut()
        .append_pair("cache", &millis.to_string());
    busted
}

pub type PollResult = Result<StoryEntry, FeedError>;

pub struct StoryPoller {
    location: FeedLocation,
    client: reqwest::Client,
}

impl StoryPoller {
    pub fn new(location: FeedLocation, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { location, client })
    }

    /// Fetch and decode the current entry.
    pub async fn fetch(&self) -> Result<StoryEntry, FeedError> {
        let body = match &self.location {
            FeedLocation::Http(url) => {
                let url = cache_busted(url, chrono::Utc::now().timestamp_millis());
                let resp = self.client.get(url).send().await?;
                if !resp.status().is_success() {
                    return Err(FeedError::Status(resp.status()));
                }
                resp.bytes().await?.to_vec()
            }
            FeedLocation::File(path) => tokio::fs::read(path).await?,
        };
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Poll every `every` on a separate task and deliver results over a channel.
///
/// Missed ticks are skipped while a slow fetch is outstanding. The task ends
/// once the receiver is dropped.
pub fn spawn_polling(poller: StoryPoller, every: Duration) -> mpsc::Receiver<PollResult> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let result = poller.fetch().await;
            if tx.send(result).await.is_err() {
                break;
            }
        }
    });
    rx
}
