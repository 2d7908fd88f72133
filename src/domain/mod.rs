//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Mood Context: 心情向量、排序引擎与反馈调整
//! - Playlist Context: 单用户播放列表会话

pub mod mood;
pub mod playlist;
