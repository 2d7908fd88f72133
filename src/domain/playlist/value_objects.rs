//! Playlist Context - Value Objects

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::mood::{MoodVector, TrackId};

/// 曲目来源
///
/// 来源变化会使会话失效，必须重新拉取曲目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackSource {
    /// 用户收藏的曲目
    #[serde(rename = "saved")]
    SavedLibrary,
    /// 热门榜单
    #[serde(rename = "popular")]
    PopularCatalog,
}

impl TrackSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SavedLibrary => "saved",
            Self::PopularCatalog => "popular",
        }
    }
}

impl std::fmt::Display for TrackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 曲目特征查找表，由特征缓存批量取回后构建
pub type FeatureTable = HashMap<TrackId, MoodVector>;
