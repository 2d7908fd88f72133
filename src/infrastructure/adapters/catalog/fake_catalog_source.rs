//! Fake Catalog Source - 用于测试的曲库
//!
//! 返回固定的曲目列表，不实际调用曲库服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::application::ports::{CatalogError, CatalogSourcePort};
use crate::domain::mood::TrackId;

/// Fake Catalog Source
pub struct FakeCatalogSource {
    saved: Vec<TrackId>,
    popular: Vec<TrackId>,
    failing: AtomicBool,
    saved_calls: AtomicUsize,
    popular_calls: AtomicUsize,
}

impl FakeCatalogSource {
    pub fn new(saved: Vec<&str>, popular: Vec<&str>) -> Self {
        Self {
            saved: saved.into_iter().map(TrackId::from).collect(),
            popular: popular.into_iter().map(TrackId::from).collect(),
            failing: AtomicBool::new(false),
            saved_calls: AtomicUsize::new(0),
            popular_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn saved_calls(&self) -> usize {
        self.saved_calls.load(Ordering::SeqCst)
    }

    pub fn popular_calls(&self) -> usize {
        self.popular_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CatalogError::ServiceError("fake catalog unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogSourcePort for FakeCatalogSource {
    async fn fetch_saved_library(&self, auth_token: &str) -> Result<Vec<TrackId>, CatalogError> {
        self.saved_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if auth_token.is_empty() {
            return Err(CatalogError::Unauthorized("empty token".to_string()));
        }
        Ok(self.saved.clone())
    }

    async fn fetch_popular_catalog(&self) -> Result<Vec<TrackId>, CatalogError> {
        self.popular_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.popular.clone())
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}
