//! Mood Context - 反馈调整
//!
//! 根据 like / dislike / skip 把当前心情向"正在播放曲目"的特征靠近或远离

use serde::{Deserialize, Serialize};

use super::MoodVector;

/// like：向喜欢的曲目移动一半距离
pub const LIKE_SCALE: f64 = 0.5;

/// 显式 dislike：以同样幅度远离
pub const DISLIKE_SCALE: f64 = -0.5;

/// skip 是较弱的负反馈，权重为 dislike 的一半
pub const SKIP_SCALE: f64 = -0.25;

/// 反馈类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Like,
    Dislike,
    Skip,
}

impl Feedback {
    pub fn scale(self) -> f64 {
        match self {
            Self::Like => LIKE_SCALE,
            Self::Dislike => DISLIKE_SCALE,
            Self::Skip => SKIP_SCALE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Skip => "skip",
        }
    }
}

/// `current + scale * (target - current)`
pub fn update(current: MoodVector, target: MoodVector, scale: f64) -> MoodVector {
    current.lerp(target, scale)
}

/// 以曲目特征为目标应用一次反馈
pub fn apply(current: MoodVector, track_mood: MoodVector, feedback: Feedback) -> MoodVector {
    update(current, track_mood, feedback.scale())
}
