//! HTTP Catalog Client - 调用外部曲库 HTTP 服务
//!
//! 实现 CatalogSourcePort trait
//!
//! 外部曲库 API:
//! GET {base}/me/tracks?limit=50&offset=N   (Bearer 用户 token)
//! Response: {"items": [{"track": {"id": "...", "available_markets": ["US", ...]}}], "total": 123}
//!
//! GET {base}/charts/popular?limit=200
//! Response: {"tracks": [{"id": "..."}]}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{CatalogError, CatalogSourcePort};
use crate::domain::mood::TrackId;

/// 收藏曲目分页大小
pub const SAVED_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
struct SavedTracksPage {
    #[serde(default)]
    items: Vec<SavedItem>,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct SavedItem {
    track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    /// 本地文件等没有 ID
    id: Option<String>,
    available_markets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PopularResponse {
    #[serde(default)]
    tracks: Vec<TrackObject>,
}

/// HTTP 曲库客户端配置
#[derive(Debug, Clone)]
pub struct HttpCatalogClientConfig {
    /// 曲库服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 用户所在地区，空字符串表示不过滤
    pub market: String,
    /// 收藏曲目最多拉取数量
    pub saved_limit: usize,
    /// 热门榜单拉取数量
    pub popular_limit: usize,
    /// 服务级凭证（热门榜单请求使用）
    pub api_key: Option<String>,
}

impl Default for HttpCatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            timeout_secs: 30,
            market: "US".to_string(),
            saved_limit: 1000,
            popular_limit: 200,
            api_key: None,
        }
    }
}

impl HttpCatalogClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP 曲库客户端
pub struct HttpCatalogClient {
    client: Client,
    config: HttpCatalogClientConfig,
}

impl HttpCatalogClient {
    /// 创建新的 HTTP 曲库客户端
    pub fn new(config: HttpCatalogClientConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn saved_url(&self) -> String {
        format!("{}/me/tracks", self.config.base_url.trim_end_matches('/'))
    }

    fn popular_url(&self) -> String {
        format!("{}/charts/popular", self.config.base_url.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(request: RequestBuilder) -> Result<reqwest::Response, CatalogError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout
            } else if e.is_connect() {
                CatalogError::NetworkError(format!("Cannot connect to catalog service: {}", e))
            } else {
                CatalogError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
        Ok(response)
    }
}

/// 过滤出在 `market` 可播放的曲目
fn playable_ids(tracks: impl IntoIterator<Item = TrackObject>, market: &str) -> Vec<TrackId> {
    tracks
        .into_iter()
        .filter(|track| match (&track.available_markets, market.is_empty()) {
            (_, true) | (None, _) => true,
            (Some(markets), false) => markets.iter().any(|m| m == market),
        })
        .filter_map(|track| track.id.map(TrackId::from))
        .collect()
}

#[async_trait]
impl CatalogSourcePort for HttpCatalogClient {
    async fn fetch_saved_library(&self, auth_token: &str) -> Result<Vec<TrackId>, CatalogError> {
        let mut tracks = Vec::new();
        let mut offset = 0;
        let mut total = usize::MAX;

        while offset < total.min(self.config.saved_limit) {
            let request = self
                .client
                .get(self.saved_url())
                .bearer_auth(auth_token)
                .query(&[("limit", SAVED_PAGE_SIZE), ("offset", offset)]);

            let page: SavedTracksPage = Self::send(request)
                .await?
                .json()
                .await
                .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

            total = page.total;
            let fetched = page.items.len();
            tracks.extend(playable_ids(
                page.items.into_iter().filter_map(|item| item.track),
                &self.config.market,
            ));

            tracing::debug!(offset, fetched, total, "Saved tracks page fetched");
            if fetched == 0 {
                break;
            }
            offset += SAVED_PAGE_SIZE;
        }

        tracks.truncate(self.config.saved_limit);
        tracing::info!(count = tracks.len(), market = %self.config.market, "Saved library fetched");
        Ok(tracks)
    }

    async fn fetch_popular_catalog(&self) -> Result<Vec<TrackId>, CatalogError> {
        let mut request = self
            .client
            .get(self.popular_url())
            .query(&[("limit", self.config.popular_limit)]);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response: PopularResponse = Self::send(request)
            .await?
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        let mut tracks = playable_ids(response.tracks, &self.config.market);
        tracks.truncate(self.config.popular_limit);
        tracing::info!(count = tracks.len(), "Popular catalog fetched");
        Ok(tracks)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
