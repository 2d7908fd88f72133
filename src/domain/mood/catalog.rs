//! Mood Context - 心情名称表
//!
//! 人类可读的心情标签 → MoodVector 常量

use std::collections::BTreeMap;

use super::{MoodError, MoodVector};

/// 内置心情表，数值需与客户端保持一致
pub const BUILTIN_MOODS: &[(&str, [f64; 3])] = &[
    ("upbeat", [1.0, 1.0, 0.0]),
    ("slow_dance", [1.0, 0.0, 1.0]),
    ("hide_the_tears", [0.0, 1.0, 1.0]),
    ("sad_bops", [0.0, 0.0, 1.0]),
    ("happy_chill", [1.0, 1.0, 0.0]),
    ("mellow", [1.0, 0.0, 0.0]),
    ("adele", [0.0, 1.0, 0.0]),
    ("depressed", [0.0, 0.0, 0.0]),
];

/// 心情名称表
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    moods: BTreeMap<String, MoodVector>,
}

impl MoodCatalog {
    pub fn builtin() -> Self {
        let moods = BUILTIN_MOODS
            .iter()
            .map(|(name, values)| (name.to_string(), MoodVector::from_array(*values)))
            .collect();
        Self { moods }
    }

    /// 在内置表之上合并自定义条目（同名覆盖）
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self, MoodError>
    where
        I: IntoIterator<Item = (&'a String, &'a [f64; 3])>,
    {
        let mut catalog = Self::builtin();
        for (name, values) in overrides {
            let key = normalize(name);
            if key.is_empty() {
                return Err(MoodError::InvalidName(name.clone()));
            }
            let mood = MoodVector::from_array(*values);
            if !mood.is_finite() {
                return Err(MoodError::InvalidVector(name.clone()));
            }
            catalog.moods.insert(key, mood);
        }
        Ok(catalog)
    }

    /// 解析心情名称
    ///
    /// 忽略大小写，空格与连字符视为下划线（"Slow Dance" == "slow_dance"）
    pub fn resolve(&self, name: &str) -> Result<MoodVector, MoodError> {
        self.moods
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| MoodError::UnknownName(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MoodVector)> {
        self.moods.iter().map(|(name, mood)| (name.as_str(), *mood))
    }

    pub fn len(&self) -> usize {
        self.moods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
