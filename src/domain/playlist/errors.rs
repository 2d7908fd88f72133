//! Playlist Context - Errors

use thiserror::Error;

use crate::domain::mood::TrackId;

#[derive(Debug, Error, PartialEq)]
pub enum PlaylistError {
    #[error("无效的播放位置: {cursor} (曲目总数: {len})")]
    InvalidCursor { cursor: i64, len: usize },

    #[error("当前没有正在播放的曲目")]
    NoCurrentTrack,

    #[error("缺少曲目特征: {0:?}")]
    MissingFeatures(Vec<TrackId>),
}
