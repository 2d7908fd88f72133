//! Mood Context - Value Objects

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 曲目唯一标识（外部曲库的不透明 ID，引擎不解析其结构）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 心情向量 (valence, energy, danceability)
///
/// 不变量:
/// - 不可变值类型，每次更新都产生新向量
/// - 各分量通常位于 [0, 1]，但不做强制截断
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodVector {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
}

impl MoodVector {
    pub const ZERO: MoodVector = MoodVector::new(0.0, 0.0, 0.0);

    pub const fn new(valence: f64, energy: f64, danceability: f64) -> Self {
        Self {
            valence,
            energy,
            danceability,
        }
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.valence, self.energy, self.danceability]
    }

    /// 欧氏距离，三个维度等权
    pub fn distance(self, other: MoodVector) -> f64 {
        (self - other).norm()
    }

    pub fn norm(self) -> f64 {
        (self.valence * self.valence
            + self.energy * self.energy
            + self.danceability * self.danceability)
            .sqrt()
    }

    /// 向 `target` 线性插值 `scale` 比例：`self + scale * (target - self)`
    ///
    /// `scale` 为负时远离 `target`
    pub fn lerp(self, target: MoodVector, scale: f64) -> MoodVector {
        self + (target - self) * scale
    }

    pub fn is_finite(self) -> bool {
        self.valence.is_finite() && self.energy.is_finite() && self.danceability.is_finite()
    }
}

impl Add for MoodVector {
    type Output = MoodVector;

    fn add(self, rhs: MoodVector) -> MoodVector {
        MoodVector::new(
            self.valence + rhs.valence,
            self.energy + rhs.energy,
            self.danceability + rhs.danceability,
        )
    }
}

impl Sub for MoodVector {
    type Output = MoodVector;

    fn sub(self, rhs: MoodVector) -> MoodVector {
        MoodVector::new(
            self.valence - rhs.valence,
            self.energy - rhs.energy,
            self.danceability - rhs.danceability,
        )
    }
}

impl Mul<f64> for MoodVector {
    type Output = MoodVector;

    fn mul(self, rhs: f64) -> MoodVector {
        MoodVector::new(self.valence * rhs, self.energy * rhs, self.danceability * rhs)
    }
}

impl std::fmt::Display for MoodVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3})",
            self.valence, self.energy, self.danceability
        )
    }
}
