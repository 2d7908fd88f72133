//! Playlist Commands - 播放列表相关命令

use uuid::Uuid;

use crate::domain::mood::{Feedback, MoodVector, TrackId};
use crate::domain::playlist::{PlaylistSession, TrackSource};

/// 新建播放列表命令
///
/// 同一来源已有会话时只更新心情（尾部重排），否则重新拉取曲目并创建会话
#[derive(Debug, Clone)]
pub struct NewPlaylistCommand {
    pub token: String,
    pub mood: String,
    pub source: TrackSource,
    /// 更新心情时使用的播放位置，缺省保持当前位置
    pub cursor: Option<i64>,
    pub limit: Option<usize>,
}

/// 推进播放位置命令 - 返回后续队列
#[derive(Debug, Clone)]
pub struct AdvanceCommand {
    pub token: String,
    pub cursor: i64,
    pub limit: Option<usize>,
}

/// 反馈命令 - 先把播放位置移到 `cursor`，再对该曲目应用反馈
#[derive(Debug, Clone)]
pub struct FeedbackCommand {
    pub token: String,
    pub cursor: i64,
    pub feedback: Feedback,
    pub limit: Option<usize>,
}

/// 播放列表视图（命令与查询共用的响应）
#[derive(Debug, Clone)]
pub struct PlaylistView {
    pub session_id: Uuid,
    pub source: TrackSource,
    pub mood: MoodVector,
    pub cursor: i64,
    pub playable_end: usize,
    pub total: usize,
    pub queue: Vec<TrackId>,
}

impl PlaylistView {
    pub fn of(session: &PlaylistSession, limit: usize) -> Self {
        Self {
            session_id: session.id(),
            source: session.source(),
            mood: session.mood(),
            cursor: session.cursor(),
            playable_end: session.playable_end(),
            total: session.len(),
            queue: session.queue(Some(limit)).to_vec(),
        }
    }
}
