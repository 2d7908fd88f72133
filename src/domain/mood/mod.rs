//! Mood Context - 心情限界上下文
//!
//! 职责:
//! - MoodVector 值类型及其运算
//! - 心情名称表
//! - 距离排序 / 可播放边界 / 局部打乱
//! - 反馈驱动的心情调整

mod catalog;
mod errors;
mod feedback;
mod ranking;
mod value_objects;

pub use catalog::{MoodCatalog, BUILTIN_MOODS};
pub use errors::MoodError;
pub use feedback::{apply as apply_feedback, update, Feedback, DISLIKE_SCALE, LIKE_SCALE, SKIP_SCALE};
pub use ranking::{
    local_shuffle, playable_boundary, rank, rank_by_distance, RankingPolicy,
    DEFAULT_SHUFFLE_WINDOW, DEFAULT_THRESHOLD,
};
pub use value_objects::{MoodVector, TrackId};
