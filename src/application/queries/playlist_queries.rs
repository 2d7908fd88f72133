//! Playlist Queries - 播放列表相关查询

use crate::domain::mood::MoodVector;

/// 查询当前队列（只读，不改变会话）
#[derive(Debug, Clone)]
pub struct GetQueueQuery {
    pub token: String,
    pub limit: Option<usize>,
}

/// 列出可用的心情名称
#[derive(Debug, Clone, Default)]
pub struct ListMoodsQuery;

/// 心情条目
#[derive(Debug, Clone)]
pub struct MoodEntry {
    pub name: String,
    pub mood: MoodVector,
}
