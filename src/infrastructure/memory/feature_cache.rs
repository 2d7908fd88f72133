//! In-Memory Feature Cache Implementation
//!
//! 只增不减；未命中的曲目按批次向 FeatureProvider 拉取，每个批次在一次写锁内整体写入

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::{
    FeatureCachePort, FeatureCacheStats, FeatureFetchError, FeatureProviderPort,
};
use crate::domain::mood::{MoodVector, TrackId};

/// 默认并发拉取的批次数
pub const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 4;

/// 内存特征缓存
pub struct InMemoryFeatureCache {
    provider: Arc<dyn FeatureProviderPort>,
    entries: RwLock<HashMap<TrackId, MoodVector>>,
    batch_size: usize,
    max_concurrent_batches: usize,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    batches_fetched: AtomicU64,
    batches_failed: AtomicU64,
}

impl InMemoryFeatureCache {
    /// 创建缓存；批次大小不会超过提供方自身的上限
    pub fn new(provider: Arc<dyn FeatureProviderPort>, batch_size: usize) -> Self {
        let batch_size = batch_size.min(provider.max_batch_size()).max(1);
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
            batch_size,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            batches_fetched: AtomicU64::new(0),
            batches_failed: AtomicU64::new(0),
        }
    }

    pub fn with_max_concurrent_batches(mut self, max: usize) -> Self {
        self.max_concurrent_batches = max.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 拉取单个批次；成功时在一次写锁内写入整批
    async fn fetch_batch(&self, batch: &[TrackId]) -> Result<(), FeatureFetchError> {
        let result = self.provider.fetch_features(batch).await.and_then(|vectors| {
            if vectors.len() == batch.len() {
                Ok(vectors)
            } else {
                Err(FeatureFetchError::new(
                    batch,
                    format!(
                        "provider returned {} vectors for {} tracks",
                        vectors.len(),
                        batch.len()
                    ),
                ))
            }
        });

        match result {
            Ok(vectors) => {
                let mut entries = self.entries.write().await;
                for (id, mood) in batch.iter().cloned().zip(vectors) {
                    entries.insert(id, mood);
                }
                drop(entries);
                self.batches_fetched.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(batch_size = batch.len(), "Feature batch cached");
                Ok(())
            }
            Err(e) => {
                self.batches_failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    batch_size = batch.len(),
                    error = %e.reason,
                    "Feature batch fetch failed"
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl FeatureCachePort for InMemoryFeatureCache {
    async fn get_features(&self, tracks: &[TrackId]) -> Result<Vec<MoodVector>, FeatureFetchError> {
        // 1. 拆分已缓存 / 未缓存
        let (missing, hits) = {
            let entries = self.entries.read().await;
            let mut seen = HashSet::new();
            let mut missing: Vec<TrackId> = Vec::new();
            let mut hits = 0u64;
            for id in tracks {
                if entries.contains_key(id) {
                    hits += 1;
                } else if seen.insert(id) {
                    missing.push(id.clone());
                }
            }
            (missing, hits)
        };
        self.hit_count.fetch_add(hits, Ordering::Relaxed);
        self.miss_count.fetch_add(missing.len() as u64, Ordering::Relaxed);

        // 2. 分批拉取未缓存部分
        if !missing.is_empty() {
            tracing::debug!(
                requested = tracks.len(),
                missing = missing.len(),
                batch_size = self.batch_size,
                "Fetching missing features"
            );

            // 批次以所有权传入，保证 future 满足 Send
            let batches: Vec<Vec<TrackId>> =
                missing.chunks(self.batch_size).map(<[TrackId]>::to_vec).collect();
            let failures: Vec<FeatureFetchError> = stream::iter(batches)
                .map(|batch| async move { self.fetch_batch(&batch).await })
                .buffer_unordered(self.max_concurrent_batches)
                .filter_map(|result| async move { result.err() })
                .collect()
                .await;

            if let Some(err) = FeatureFetchError::merge(failures) {
                return Err(err);
            }
        }

        // 3. 按输入顺序组装
        let entries = self.entries.read().await;
        let mut vectors = Vec::with_capacity(tracks.len());
        let mut unresolved = Vec::new();
        for id in tracks {
            match entries.get(id) {
                Some(mood) => vectors.push(*mood),
                None => unresolved.push(id.clone()),
            }
        }
        if unresolved.is_empty() {
            Ok(vectors)
        } else {
            Err(FeatureFetchError::new(&unresolved, "features missing after fetch"))
        }
    }

    async fn cached(&self, track: &TrackId) -> Option<MoodVector> {
        self.entries.read().await.get(track).copied()
    }

    async fn stats(&self) -> FeatureCacheStats {
        FeatureCacheStats {
            total_entries: self.entries.read().await.len(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            batches_fetched: self.batches_fetched.load(Ordering::Relaxed),
            batches_failed: self.batches_failed.load(Ordering::Relaxed),
        }
    }
}
