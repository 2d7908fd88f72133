//! Fake Feature Provider - 用于测试的特征提供方
//!
//! 从内存表返回特征，不实际调用外部服务；表中缺失的曲目会让所在批次整体失败

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::application::ports::{FeatureFetchError, FeatureProviderPort};
use crate::domain::mood::{MoodVector, TrackId};

/// Fake Feature Provider
#[derive(Default)]
pub struct FakeFeatureProvider {
    features: DashMap<TrackId, MoodVector>,
    /// 包含这些曲目的批次一律失败
    poisoned: DashSet<TrackId>,
    failing: AtomicBool,
    /// 每次调用的批次大小（按调用顺序）
    calls: Mutex<Vec<usize>>,
}

impl FakeFeatureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 `(id, [valence, energy, danceability])` 列表构造
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, [f64; 3])>) -> Self {
        let provider = Self::new();
        for (id, values) in entries {
            provider.insert(TrackId::from(id), MoodVector::from_array(values));
        }
        provider
    }

    pub fn insert(&self, id: TrackId, mood: MoodVector) {
        self.features.insert(id, mood);
    }

    /// 整体失败开关
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fail_on(&self, id: TrackId) {
        self.poisoned.insert(id);
    }

    pub fn clear_failures(&self) {
        self.poisoned.clear();
        self.set_failing(false);
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FeatureProviderPort for FakeFeatureProvider {
    async fn fetch_features(&self, batch: &[TrackId]) -> Result<Vec<MoodVector>, FeatureFetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(batch.len());
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(FeatureFetchError::new(batch, "fake provider unavailable"));
        }
        if batch.iter().any(|id| self.poisoned.contains(id)) {
            return Err(FeatureFetchError::new(batch, "fake provider rejected batch"));
        }

        batch
            .iter()
            .map(|id| {
                self.features
                    .get(id)
                    .map(|mood| *mood)
                    .ok_or_else(|| FeatureFetchError::new(batch, format!("no features for {}", id)))
            })
            .collect()
    }
}
