//! Ping Handler
//!
//! 健康检查，附带会话与特征缓存概况

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub cached_features: usize,
    pub catalog_reachable: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let stats = state.feature_cache.stats().await;
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.registry.len(),
        cached_features: stats.total_entries,
        catalog_reachable: state.catalog.health_check().await,
    })
}
