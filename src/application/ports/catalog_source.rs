//! Catalog Source Port - 外部曲库抽象
//!
//! 拉取用户收藏曲目或热门榜单，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mood::TrackId;

/// 曲库错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Catalog Source Port
///
/// 返回的曲目应已按用户所在地区过滤，核心逻辑不再二次过滤
#[async_trait]
pub trait CatalogSourcePort: Send + Sync {
    /// 用户收藏的曲目
    async fn fetch_saved_library(&self, auth_token: &str) -> Result<Vec<TrackId>, CatalogError>;

    /// 热门榜单曲目
    async fn fetch_popular_catalog(&self) -> Result<Vec<TrackId>, CatalogError>;

    /// 检查曲库服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
