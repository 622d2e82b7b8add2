use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::ResponseCache;
use crate::error::OverlayError;
use crate::models::{GameMode, PlayerRecord};

pub const LOUNGE_BASE_URL: &str = "https://lounge.mkcentral.com";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the lounge player-details endpoint, with a
/// process-lifetime response cache in front of it.
#[derive(Clone)]
pub struct LoungeClient {
    http: Client,
    base_url: String,
    cache: Arc<RwLock<ResponseCache>>,
}

impl LoungeClient {
    pub fn new() -> Result<Self, OverlayError> {
        Self::with_base_url(LOUNGE_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, OverlayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("MKWorld-Overlay/1.0")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            cache: Arc::new(RwLock::new(ResponseCache::new())),
        })
    }

    /// Look up a player's stats for one queue, going through the cache
    /// first. A hit never touches the network; a miss issues exactly
    /// one request and stores the parsed record. Simultaneous misses
    /// for the same key are not coalesced, each issues its own request.
    pub async fn player_details(
        &self,
        name: &str,
        mode: GameMode,
    ) -> Result<PlayerRecord, OverlayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OverlayError::NameRequired);
        }
        if !is_valid_player_name(name) {
            return Err(OverlayError::InvalidName);
        }

        {
            let cache = self.cache.read().await;
            if let Some(record) = cache.get(name, mode) {
                info!(player = name, mode = mode.tag(), "cache hit");
                return Ok(record.clone());
            }
        }

        debug!(player = name, mode = mode.tag(), "cache miss, fetching");
        let url = format!("{}/api/player/details", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("name", name), ("game", mode.tag())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(OverlayError::Upstream(message));
        }

        let body = response.text().await?;
        let record: PlayerRecord = serde_json::from_str(&body)?;

        let mut cache = self.cache.write().await;
        cache.put(name, mode, record.clone());
        Ok(record)
    }
}

fn is_valid_player_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
}
