//! Playlist Context - 播放列表限界上下文
//!
//! 职责:
//! - 单个用户的曲目序列、播放位置与可播放边界
//! - 组合排序引擎与反馈调整，响应队列查询与反馈事件

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::PlaylistSession;
pub use errors::PlaylistError;
pub use value_objects::{FeatureTable, TrackSource};
