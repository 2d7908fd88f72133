//! HTTP Feature Client - 调用外部音频特征服务
//!
//! 实现 FeatureProviderPort trait
//!
//! 外部特征 API:
//! GET {base}/audio-features?ids=a,b,c
//! Response: {"audio_features": [{"id": "a", "valence": 0.5, "energy": 0.7, "danceability": 0.2}, null, ...]}
//!
//! 任何一个条目为 null 或缺失，整个批次视为失败

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::application::ports::{FeatureFetchError, FeatureProviderPort, MAX_FEATURE_BATCH};
use crate::domain::mood::{MoodVector, TrackId};

#[derive(Debug, Deserialize)]
struct AudioFeaturesResponse {
    #[serde(default)]
    audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Deserialize)]
struct AudioFeatures {
    id: String,
    valence: f64,
    energy: f64,
    danceability: f64,
}

/// HTTP 特征客户端配置
#[derive(Debug, Clone)]
pub struct HttpFeatureClientConfig {
    /// 特征服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 服务级凭证
    pub api_key: Option<String>,
}

impl Default for HttpFeatureClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl HttpFeatureClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP 特征客户端
pub struct HttpFeatureClient {
    client: Client,
    config: HttpFeatureClientConfig,
}

impl HttpFeatureClient {
    pub fn new(config: HttpFeatureClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn features_url(&self) -> String {
        format!("{}/audio-features", self.config.base_url.trim_end_matches('/'))
    }
}

/// 按批次顺序对齐响应；任一曲目缺失则整批失败
fn align(batch: &[TrackId], response: AudioFeaturesResponse) -> Result<Vec<MoodVector>, FeatureFetchError> {
    let by_id: HashMap<String, MoodVector> = response
        .audio_features
        .into_iter()
        .flatten()
        .map(|f| (f.id, MoodVector::new(f.valence, f.energy, f.danceability)))
        .collect();

    let mut vectors = Vec::with_capacity(batch.len());
    for id in batch {
        match by_id.get(id.as_str()) {
            Some(mood) if mood.is_finite() => vectors.push(*mood),
            Some(_) => {
                return Err(FeatureFetchError::new(batch, format!("non-finite features for {}", id)))
            }
            None => return Err(FeatureFetchError::new(batch, format!("no features for {}", id))),
        }
    }
    Ok(vectors)
}

#[async_trait]
impl FeatureProviderPort for HttpFeatureClient {
    async fn fetch_features(&self, batch: &[TrackId]) -> Result<Vec<MoodVector>, FeatureFetchError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let ids = batch.iter().map(TrackId::as_str).collect::<Vec<_>>().join(",");
        let mut request = self.client.get(self.features_url()).query(&[("ids", ids)]);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(batch_size = batch.len(), "Requesting audio features");

        let response = request.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("cannot connect to feature service: {}", e)
            } else {
                e.to_string()
            };
            FeatureFetchError::new(batch, reason)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FeatureFetchError::new(batch, "unauthorized"));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FeatureFetchError::new(
                batch,
                format!("HTTP {}: {}", status, error_text),
            ));
        }

        let body: AudioFeaturesResponse = response
            .json()
            .await
            .map_err(|e| FeatureFetchError::new(batch, format!("invalid response: {}", e)))?;

        align(batch, body)
    }

    fn max_batch_size(&self) -> usize {
        MAX_FEATURE_BATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AudioFeaturesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpFeatureClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
        assert_eq!(HttpFeatureClientConfig::new("x").with_timeout(5).timeout_secs, 5);
    }

    #[test]
    fn test_align_follows_batch_order() {
        let batch = vec![TrackId::from("b"), TrackId::from("a")];
        let response = parse(
            r#"{"audio_features": [
                {"id": "a", "valence": 0.1, "energy": 0.2, "danceability": 0.3, "tempo": 120.0},
                {"id": "b", "valence": 0.9, "energy": 0.8, "danceability": 0.7}
            ]}"#,
        );
        let vectors = align(&batch, response).unwrap();
        assert_eq!(vectors[0], MoodVector::new(0.9, 0.8, 0.7));
        assert_eq!(vectors[1], MoodVector::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_null_entry_fails_whole_batch() {
        let batch = vec![TrackId::from("a"), TrackId::from("b")];
        let response = parse(
            r#"{"audio_features": [
                {"id": "a", "valence": 0.1, "energy": 0.2, "danceability": 0.3},
                null
            ]}"#,
        );
        let err = align(&batch, response).unwrap_err();
        assert_eq!(err.unresolved, batch);
        assert!(err.reason.contains("b"));
    }

    #[test]
    fn test_url() {
        let client = HttpFeatureClient::new(HttpFeatureClientConfig::new("http://features/")).unwrap();
        assert_eq!(client.features_url(), "http://features/audio-features");
    }
}
