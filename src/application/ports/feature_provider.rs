//! Feature Provider Port - 曲目特征抽象
//!
//! 按批次拉取曲目的 (valence, energy, danceability)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mood::{MoodVector, TrackId};

/// 单批次上限（与主流曲库的批量接口一致）
pub const MAX_FEATURE_BATCH: usize = 100;

/// 特征拉取错误
///
/// 一个批次整体失败，`unresolved` 为该批次内未能取得特征的曲目
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch features for {} track(s): {reason}", .unresolved.len())]
pub struct FeatureFetchError {
    pub unresolved: Vec<TrackId>,
    pub reason: String,
}

impl FeatureFetchError {
    pub fn new(unresolved: &[TrackId], reason: impl Into<String>) -> Self {
        Self {
            unresolved: unresolved.to_vec(),
            reason: reason.into(),
        }
    }

    /// 合并多个批次的失败
    pub fn merge(errors: impl IntoIterator<Item = FeatureFetchError>) -> Option<Self> {
        let mut merged: Option<Self> = None;
        for err in errors {
            match merged.as_mut() {
                None => merged = Some(err),
                Some(m) => {
                    m.unresolved.extend(err.unresolved);
                    if !m.reason.contains(&err.reason) {
                        m.reason = format!("{}; {}", m.reason, err.reason);
                    }
                }
            }
        }
        merged
    }
}

/// Feature Provider Port
///
/// 每次调用是一次外部请求，不做内部重试
#[async_trait]
pub trait FeatureProviderPort: Send + Sync {
    /// 拉取一个批次的特征，结果与输入按位置对齐
    async fn fetch_features(&self, batch: &[TrackId]) -> Result<Vec<MoodVector>, FeatureFetchError>;

    /// 提供方自身的批次上限
    fn max_batch_size(&self) -> usize {
        MAX_FEATURE_BATCH
    }
}
