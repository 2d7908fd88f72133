//! Playlist Context - Aggregate Root

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

use super::{FeatureTable, PlaylistError, TrackSource};
use crate::domain::mood::{
    apply_feedback, local_shuffle, playable_boundary, rank_by_distance, Feedback, MoodVector,
    RankingPolicy, TrackId,
};

/// PlaylistSession 聚合根
///
/// `tracks` 保存本会话全部候选曲目（已播放与未播放），`tracks[cursor + 1 .. playable_end]`
/// 即当前队列。`playable_end` 之后的曲目因距离超过阈值而暂不入队，但仍保留，
/// 心情回调后可以重新进入队列而无需重新拉取。
///
/// 不变量:
/// - `cursor` 为 `None`（尚未播放）或 `< tracks.len()`
/// - `playable_end <= tracks.len()`
/// - 重排只作用于 `cursor + 1` 之后的尾部，已播放前缀的顺序冻结
#[derive(Debug, Clone)]
pub struct PlaylistSession {
    id: Uuid,
    owner: String,
    source: TrackSource,
    tracks: Vec<TrackId>,
    cursor: Option<usize>,
    playable_end: usize,
    mood: MoodVector,
    policy: RankingPolicy,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlaylistSession {
    /// 创建新会话并对全部曲目做一次完整排序
    ///
    /// 重复的曲目 ID 只保留第一次出现的位置
    pub fn create<R>(
        owner: impl Into<String>,
        source: TrackSource,
        mood: MoodVector,
        tracks: Vec<TrackId>,
        features: &FeatureTable,
        policy: RankingPolicy,
        rng: &mut R,
    ) -> Result<Self, PlaylistError>
    where
        R: Rng + ?Sized,
    {
        let mut seen = HashSet::with_capacity(tracks.len());
        let tracks: Vec<TrackId> = tracks
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let now = Utc::now();
        let mut session = Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            source,
            tracks,
            cursor: None,
            playable_end: 0,
            mood,
            policy,
            created_at: now,
            updated_at: now,
        };
        session.rerank_tail(features, rng)?;
        Ok(session)
    }

    /// 设置新心情：把播放位置重置为调用方给定的值，然后只重排其后的尾部
    pub fn set_mood<R>(
        &mut self,
        mood: MoodVector,
        cursor: i64,
        features: &FeatureTable,
        rng: &mut R,
    ) -> Result<(), PlaylistError>
    where
        R: Rng + ?Sized,
    {
        let cursor = self.resolve_cursor(cursor)?;
        let tail_start = cursor.map_or(0, |c| c + 1);
        check_features(&self.tracks[tail_start..], features)?;

        self.cursor = cursor;
        self.mood = mood;
        self.rerank_tail(features, rng)
    }

    /// 移动播放位置，不重排
    ///
    /// 合法范围 `[-1, len)`，-1 表示尚未播放任何曲目
    pub fn advance(&mut self, cursor: i64) -> Result<(), PlaylistError> {
        self.cursor = self.resolve_cursor(cursor)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 对当前曲目应用反馈，返回新的心情
    pub fn apply_feedback<R>(
        &mut self,
        feedback: Feedback,
        features: &FeatureTable,
        rng: &mut R,
    ) -> Result<MoodVector, PlaylistError>
    where
        R: Rng + ?Sized,
    {
        let current = self.current_track().ok_or(PlaylistError::NoCurrentTrack)?;
        let track_mood = features
            .get(current)
            .copied()
            .ok_or_else(|| PlaylistError::MissingFeatures(vec![current.clone()]))?;
        check_features(self.tail(), features)?;

        self.mood = apply_feedback(self.mood, track_mood, feedback);
        self.rerank_tail(features, rng)?;
        Ok(self.mood)
    }

    /// 接下来要播放的曲目，最多 `limit` 首
    pub fn queue(&self, limit: Option<usize>) -> &[TrackId] {
        let start = self.tail_start().min(self.playable_end);
        let queue = &self.tracks[start..self.playable_end];
        match limit {
            Some(limit) if limit < queue.len() => &queue[..limit],
            _ => queue,
        }
    }

    /// 尚未播放的尾部（含超出阈值的曲目）
    pub fn tail(&self) -> &[TrackId] {
        &self.tracks[self.tail_start()..]
    }

    /// 假设播放位置为 `cursor` 时的尾部，用于在重排前预取特征
    pub fn tail_after(&self, cursor: i64) -> Result<&[TrackId], PlaylistError> {
        let start = self.resolve_cursor(cursor)?.map_or(0, |c| c + 1);
        Ok(&self.tracks[start..])
    }

    pub fn current_track(&self) -> Option<&TrackId> {
        self.cursor.map(|c| &self.tracks[c])
    }

    /// 把外部传入的位置校验为内部表示
    fn resolve_cursor(&self, cursor: i64) -> Result<Option<usize>, PlaylistError> {
        if cursor == -1 {
            return Ok(None);
        }
        if cursor < -1 || cursor as u64 >= self.tracks.len() as u64 {
            return Err(PlaylistError::InvalidCursor {
                cursor,
                len: self.tracks.len(),
            });
        }
        Ok(Some(cursor as usize))
    }

    fn tail_start(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// 冻结前缀 + 重排尾部，再合并
    fn rerank_tail<R>(&mut self, features: &FeatureTable, rng: &mut R) -> Result<(), PlaylistError>
    where
        R: Rng + ?Sized,
    {
        let start = self.tail_start();
        let (prefix, tail) = self.tracks.split_at(start);
        check_features(tail, features)?;

        let ranked = rank_by_distance(tail.to_vec(), |id| features[id], self.mood);
        let distances: Vec<f64> = ranked.iter().map(|(_, d)| *d).collect();
        let boundary = playable_boundary(&distances, self.policy.threshold);

        let mut tracks = Vec::with_capacity(self.tracks.len());
        tracks.extend_from_slice(prefix);
        tracks.extend(ranked.into_iter().map(|(id, _)| id));

        let playable_end = start + boundary;
        local_shuffle(&mut tracks, start, playable_end, self.policy.shuffle_window, rng);

        tracing::debug!(
            session_id = %self.id,
            mood = %self.mood,
            tail_start = start,
            playable_end,
            total = tracks.len(),
            "Playlist tail re-ranked"
        );

        self.tracks = tracks;
        self.playable_end = playable_end;
        self.updated_at = Utc::now();
        Ok(())
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn source(&self) -> TrackSource {
        self.source
    }

    pub fn mood(&self) -> MoodVector {
        self.mood
    }

    /// 当前播放位置，-1 表示尚未播放
    pub fn cursor(&self) -> i64 {
        self.cursor.map_or(-1, |c| c as i64)
    }

    pub fn playable_end(&self) -> usize {
        self.playable_end
    }

    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn policy(&self) -> RankingPolicy {
        self.policy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn check_features(tracks: &[TrackId], features: &FeatureTable) -> Result<(), PlaylistError> {
    let missing: Vec<TrackId> = tracks
        .iter()
        .filter(|id| !features.contains_key(*id))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PlaylistError::MissingFeatures(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(names: &[&str]) -> Vec<TrackId> {
        names.iter().map(|n| TrackId::from(*n)).collect()
    }

    fn table(entries: &[(&str, [f64; 3])]) -> FeatureTable {
        entries
            .iter()
            .map(|(id, v)| (TrackId::from(*id), MoodVector::from_array(*v)))
            .collect()
    }

    fn no_shuffle() -> RankingPolicy {
        RankingPolicy {
            shuffle_window: 0,
            ..RankingPolicy::default()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_create_sorts_and_thresholds() {
        let features = table(&[
            ("far", [0.0, 0.0, 1.0]),
            ("near", [0.9, 0.9, 0.1]),
            ("exact", [1.0, 1.0, 0.0]),
            ("mid", [0.5, 0.5, 0.5]),
        ]);
        let session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::new(1.0, 1.0, 0.0),
            ids(&["far", "near", "exact", "mid"]),
            &features,
            no_shuffle(),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(session.tracks(), ids(&["exact", "near", "mid", "far"]).as_slice());
        assert_eq!(session.cursor(), -1);
        assert_eq!(session.playable_end(), 2);
        assert_eq!(session.queue(None), ids(&["exact", "near"]).as_slice());
    }

    #[test]
    fn test_create_deduplicates_tracks() {
        let features = table(&[("a", [0.0, 0.0, 0.0]), ("b", [0.1, 0.0, 0.0])]);
        let session = PlaylistSession::create(
            "user",
            TrackSource::PopularCatalog,
            MoodVector::ZERO,
            ids(&["a", "b", "a"]),
            &features,
            no_shuffle(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_create_empty_catalog() {
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            Vec::new(),
            &FeatureTable::new(),
            RankingPolicy::default(),
            &mut rng(),
        )
        .unwrap();
        assert!(session.is_empty());
        assert!(session.queue(Some(10)).is_empty());
        assert!(session.advance(0).is_err());
    }

    #[test]
    fn test_create_missing_features() {
        let features = table(&[("a", [0.0, 0.0, 0.0])]);
        let err = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            ids(&["a", "b"]),
            &features,
            RankingPolicy::default(),
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err, PlaylistError::MissingFeatures(ids(&["b"])));
    }

    #[test]
    fn test_like_after_advance() {
        let features = table(&[
            ("X", [1.0, 1.0, 0.0]),
            ("Y", [0.0, 0.1, 0.0]),
            ("Z", [0.1, 0.0, 0.0]),
        ]);
        let policy = RankingPolicy {
            threshold: 10.0,
            shuffle_window: 0,
        };
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::new(1.0, 1.0, 0.0),
            ids(&["X", "Y", "Z"]),
            &features,
            policy,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(session.tracks()[0], TrackId::from("X"));

        // 回到 (0,0,0) 以便验证 like 的插值
        session.set_mood(MoodVector::ZERO, -1, &features, &mut rng()).unwrap();
        let x_index = session.tracks().iter().position(|t| t.as_str() == "X").unwrap();
        session.advance(x_index as i64).unwrap();

        let mood = session
            .apply_feedback(Feedback::Like, &features, &mut rng())
            .unwrap();
        assert!(mood.distance(MoodVector::new(0.5, 0.5, 0.0)) < 1e-12);
        assert_eq!(session.cursor(), x_index as i64);
    }

    #[test]
    fn test_feedback_requires_current_track() {
        let features = table(&[("a", [0.0, 0.0, 0.0])]);
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            ids(&["a"]),
            &features,
            RankingPolicy::default(),
            &mut rng(),
        )
        .unwrap();
        let before = session.clone();
        let err = session
            .apply_feedback(Feedback::Like, &features, &mut rng())
            .unwrap_err();
        assert_eq!(err, PlaylistError::NoCurrentTrack);
        assert_eq!(session.mood(), before.mood());
        assert_eq!(session.tracks(), before.tracks());
    }

    #[test]
    fn test_skip_moves_mood_away() {
        let features = table(&[("cur", [1.0, 1.0, 1.0]), ("next", [0.4, 0.4, 0.4])]);
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::new(0.5, 0.5, 0.5),
            ids(&["cur", "next"]),
            &features,
            no_shuffle(),
            &mut rng(),
        )
        .unwrap();
        let cur = session.tracks().iter().position(|t| t.as_str() == "cur").unwrap();
        session.advance(cur as i64).unwrap();

        let mood = session
            .apply_feedback(Feedback::Skip, &features, &mut rng())
            .unwrap();
        assert!(mood.distance(MoodVector::new(0.375, 0.375, 0.375)) < 1e-12);
        assert_eq!(session.mood(), mood);
    }

    #[test]
    fn test_tail_rerank_freezes_played_prefix() {
        let features = table(&[
            ("a", [0.0, 0.0, 0.0]),
            ("b", [0.1, 0.0, 0.0]),
            ("c", [0.2, 0.0, 0.0]),
            ("d", [0.9, 0.9, 0.9]),
            ("e", [1.0, 1.0, 1.0]),
        ]);
        let policy = RankingPolicy {
            threshold: 2.0,
            shuffle_window: 0,
        };
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            ids(&["e", "d", "c", "b", "a"]),
            &features,
            policy,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(session.tracks(), ids(&["a", "b", "c", "d", "e"]).as_slice());

        session
            .set_mood(MoodVector::new(1.0, 1.0, 1.0), 1, &features, &mut rng())
            .unwrap();
        assert_eq!(session.cursor(), 1);
        assert_eq!(&session.tracks()[..2], ids(&["a", "b"]).as_slice());
        assert_eq!(session.queue(None), ids(&["e", "d", "c"]).as_slice());
    }

    #[test]
    fn test_boundary_grows_back_without_refetch() {
        let features = table(&[
            ("low", [0.0, 0.0, 0.0]),
            ("high", [1.0, 1.0, 1.0]),
        ]);
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            ids(&["low", "high"]),
            &features,
            RankingPolicy::default(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(session.queue(None), ids(&["low"]).as_slice());
        assert_eq!(session.len(), 2);

        session
            .set_mood(MoodVector::new(1.0, 1.0, 1.0), -1, &features, &mut rng())
            .unwrap();
        assert_eq!(session.queue(None), ids(&["high"]).as_slice());
        assert_eq!(session.playable_end(), 1);
    }

    #[test]
    fn test_advance_bounds() {
        let features = table(&[("a", [0.0, 0.0, 0.0]), ("b", [0.0, 0.0, 0.1])]);
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            ids(&["a", "b"]),
            &features,
            no_shuffle(),
            &mut rng(),
        )
        .unwrap();

        assert!(session.advance(1).is_ok());
        assert_eq!(session.current_track(), Some(&TrackId::from("b")));
        assert!(session.queue(None).is_empty());
        assert!(session.advance(-1).is_ok());
        assert_eq!(
            session.advance(2),
            Err(PlaylistError::InvalidCursor { cursor: 2, len: 2 })
        );
        assert!(session.advance(-2).is_err());
        assert_eq!(session.cursor(), -1);
    }

    #[test]
    fn test_queue_limit_and_idempotence() {
        let features: FeatureTable = (0..20)
            .map(|i| (TrackId::new(format!("t{}", i)), MoodVector::new(i as f64 * 0.01, 0.0, 0.0)))
            .collect();
        let tracks: Vec<TrackId> = features.keys().cloned().collect();
        let session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            tracks,
            &features,
            RankingPolicy::default(),
            &mut rng(),
        )
        .unwrap();

        let first = session.queue(Some(5)).to_vec();
        assert_eq!(first.len(), 5);
        assert_eq!(session.queue(Some(5)), first.as_slice());
        assert_eq!(session.queue(Some(100)).len(), 20);
        assert_eq!(session.queue(Some(0)).len(), 0);
    }

    #[test]
    fn test_set_mood_with_invalid_cursor_leaves_session_unchanged() {
        let features = table(&[("a", [0.0, 0.0, 0.0]), ("b", [0.2, 0.0, 0.0])]);
        let mut session = PlaylistSession::create(
            "user",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            ids(&["a", "b"]),
            &features,
            no_shuffle(),
            &mut rng(),
        )
        .unwrap();
        let before = session.clone();

        let err = session
            .set_mood(MoodVector::new(1.0, 1.0, 1.0), 5, &features, &mut rng())
            .unwrap_err();
        assert!(matches!(err, PlaylistError::InvalidCursor { .. }));
        assert_eq!(session.mood(), before.mood());
        assert_eq!(session.tracks(), before.tracks());
        assert_eq!(session.cursor(), before.cursor());
    }
}
