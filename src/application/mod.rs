//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CatalogSource、FeatureProvider、FeatureCache、SessionRegistry）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    AdvanceCommand,
    FeedbackCommand,
    NewPlaylistCommand,
    PlaylistView,
    // Handlers
    handlers::{AdvanceHandler, FeedbackHandler, NewPlaylistHandler, PlaylistSettings},
};

pub use error::ApplicationError;

pub use ports::{
    // Catalog source
    CatalogError,
    CatalogSourcePort,
    // Feature cache / provider
    FeatureCachePort,
    FeatureCacheStats,
    FeatureFetchError,
    FeatureProviderPort,
    // Session registry
    RegistryError,
    SessionRegistryPort,
    SharedSession,
};

pub use queries::{
    GetQueueQuery,
    ListMoodsQuery,
    MoodEntry,
    // Handlers
    handlers::{GetQueueHandler, ListMoodsHandler},
};

/// 日志中使用的用户标识（只保留 token 前缀）
pub fn token_tag(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    if prefix.len() < token.len() {
        format!("{}…", prefix)
    } else {
        prefix
    }
}
