//! Feature Cache Port - 曲目特征缓存
//!
//! 只增不减的 TrackId → MoodVector 映射，未命中的部分分批向 FeatureProvider 拉取

use async_trait::async_trait;

use super::FeatureFetchError;
use crate::domain::mood::{MoodVector, TrackId};
use crate::domain::playlist::FeatureTable;

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct FeatureCacheStats {
    pub total_entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub batches_fetched: u64,
    pub batches_failed: u64,
}

/// Feature Cache Port
#[async_trait]
pub trait FeatureCachePort: Send + Sync {
    /// 获取特征，结果与输入按位置对齐
    ///
    /// 任一批次失败时返回 `FeatureFetchError`；成功批次已写入缓存，失败批次不写入
    async fn get_features(&self, tracks: &[TrackId]) -> Result<Vec<MoodVector>, FeatureFetchError>;

    /// 仅查缓存，不触发拉取
    async fn cached(&self, track: &TrackId) -> Option<MoodVector>;

    /// 获取缓存统计信息
    async fn stats(&self) -> FeatureCacheStats;

    /// 获取特征并构建查找表
    async fn feature_table(&self, tracks: &[TrackId]) -> Result<FeatureTable, FeatureFetchError> {
        let vectors = self.get_features(tracks).await?;
        Ok(tracks.iter().cloned().zip(vectors).collect())
    }
}
