//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{MoodEntry, PlaylistView};
use crate::domain::mood::{MoodVector, TrackId};
use crate::domain::playlist::TrackSource;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Playlist DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NewPlaylistRequest {
    pub token: String,
    pub mood: String,
    pub source: TrackSource,
    #[serde(default)]
    pub cursor: Option<i64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// next / like 共用
#[derive(Debug, Deserialize)]
pub struct CursorRequest {
    pub token: String,
    pub cursor: i64,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct DislikeRequest {
    pub token: String,
    pub cursor: i64,
    /// true 表示跳过（较弱的负反馈）
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    pub token: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub session_id: Uuid,
    pub source: TrackSource,
    pub tracks: Vec<TrackId>,
    pub cursor: i64,
    pub playable_end: usize,
    pub total: usize,
    pub mood: MoodVector,
}

impl From<PlaylistView> for PlaylistResponse {
    fn from(view: PlaylistView) -> Self {
        Self {
            session_id: view.session_id,
            source: view.source,
            tracks: view.queue,
            cursor: view.cursor,
            playable_end: view.playable_end,
            total: view.total,
            mood: view.mood,
        }
    }
}

// ============================================================================
// Mood DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub name: String,
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
}

impl From<MoodEntry> for MoodResponse {
    fn from(entry: MoodEntry) -> Self {
        Self {
            name: entry.name,
            valence: entry.mood.valence,
            energy: entry.mood.energy,
            danceability: entry.mood.danceability,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub moods: Vec<MoodResponse>,
}
