//! Mood Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoodError {
    #[error("未知的心情名称: {0}")]
    UnknownName(String),

    #[error("无效的心情名称: {0:?}")]
    InvalidName(String),

    #[error("心情向量包含非有限值: {0}")]
    InvalidVector(String),
}
