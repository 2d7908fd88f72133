//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{CatalogError, FeatureFetchError, RegistryError};
use crate::domain::mood::MoodError;
use crate::domain::playlist::PlaylistError;

/// 应用层错误
///
/// 均为单次操作的局部失败，不影响进程
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 心情名称不在配置表中
    #[error("Unknown mood name: {0}")]
    UnknownMoodName(String),

    /// 用户没有活跃会话
    #[error("No active session for user {0}")]
    NoActiveSession(String),

    /// 特征拉取失败，会话保持调用前的状态，可安全重试
    #[error(transparent)]
    FeatureFetch(#[from] FeatureFetchError),

    /// 曲库拉取失败，会话未创建/替换
    #[error("Catalog fetch failed: {0}")]
    CatalogFetch(String),

    /// 播放位置越界
    #[error("Invalid cursor: {cursor} (total tracks: {len})")]
    InvalidCursor { cursor: i64, len: usize },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<MoodError> for ApplicationError {
    fn from(err: MoodError) -> Self {
        match err {
            MoodError::UnknownName(name) => Self::UnknownMoodName(name),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

impl From<PlaylistError> for ApplicationError {
    fn from(err: PlaylistError) -> Self {
        match err {
            PlaylistError::InvalidCursor { cursor, len } => Self::InvalidCursor { cursor, len },
            PlaylistError::NoCurrentTrack => Self::ValidationError(err.to_string()),
            PlaylistError::MissingFeatures(_) => Self::InternalError(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(err: CatalogError) -> Self {
        Self::CatalogFetch(err.to_string())
    }
}

impl From<RegistryError> for ApplicationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(user) => Self::NoActiveSession(user),
        }
    }
}
