//! Playlist Command Handlers

use std::sync::Arc;

use crate::application::commands::playlist_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{CatalogSourcePort, FeatureCachePort, SessionRegistryPort};
use crate::application::token_tag;
use crate::domain::mood::{MoodCatalog, RankingPolicy, TrackId};
use crate::domain::playlist::{PlaylistSession, TrackSource};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 默认返回的队列长度
pub const DEFAULT_QUEUE_LEN: usize = 10;

/// 播放列表行为参数
#[derive(Debug, Clone, Copy)]
pub struct PlaylistSettings {
    pub policy: RankingPolicy,
    pub default_queue_len: usize,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            policy: RankingPolicy::default(),
            default_queue_len: DEFAULT_QUEUE_LEN,
        }
    }
}

/// 队列局部打乱用的随机源（可跨 await 持有）
fn shuffle_rng() -> StdRng {
    StdRng::from_entropy()
}

impl PlaylistSettings {
    pub fn queue_len(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.default_queue_len)
    }
}

/// NewPlaylist Handler - 创建或替换会话
pub struct NewPlaylistHandler {
    registry: Arc<dyn SessionRegistryPort>,
    catalog: Arc<dyn CatalogSourcePort>,
    features: Arc<dyn FeatureCachePort>,
    moods: Arc<MoodCatalog>,
    settings: PlaylistSettings,
}

impl NewPlaylistHandler {
    pub fn new(
        registry: Arc<dyn SessionRegistryPort>,
        catalog: Arc<dyn CatalogSourcePort>,
        features: Arc<dyn FeatureCachePort>,
        moods: Arc<MoodCatalog>,
        settings: PlaylistSettings,
    ) -> Self {
        Self {
            registry,
            catalog,
            features,
            moods,
            settings,
        }
    }

    pub async fn handle(&self, cmd: NewPlaylistCommand) -> Result<PlaylistView, ApplicationError> {
        let mood = self.moods.resolve(&cmd.mood)?;
        let limit = self.settings.queue_len(cmd.limit);

        // 同一来源：只换心情，已播放前缀保持不变
        if let Some(shared) = self.registry.find(&cmd.token) {
            let mut session = shared.lock().await;
            if session.source() == cmd.source {
                let cursor = cmd.cursor.unwrap_or_else(|| session.cursor());
                let tail = session.tail_after(cursor)?.to_vec();
                let features = self.features.feature_table(&tail).await?;
                session.set_mood(mood, cursor, &features, &mut shuffle_rng())?;
                self.registry.touch(&cmd.token);

                tracing::info!(
                    user = %token_tag(&cmd.token),
                    session_id = %session.id(),
                    mood_name = %cmd.mood,
                    mood = %mood,
                    cursor,
                    playable_end = session.playable_end(),
                    "Playlist mood changed"
                );
                return Ok(PlaylistView::of(&session, limit));
            }
        }

        // 新会话或来源切换：重新拉取曲目；失败时旧会话保持有效
        let tracks = self.fetch_tracks(&cmd.token, cmd.source).await?;
        let features = self.features.feature_table(&tracks).await?;
        let session = PlaylistSession::create(
            cmd.token.clone(),
            cmd.source,
            mood,
            tracks,
            &features,
            self.settings.policy,
            &mut shuffle_rng(),
        )?;
        let view = PlaylistView::of(&session, limit);

        tracing::info!(
            user = %token_tag(&cmd.token),
            session_id = %session.id(),
            source = %cmd.source,
            mood_name = %cmd.mood,
            total = session.len(),
            playable_end = session.playable_end(),
            "Playlist session created"
        );

        self.registry.insert(&cmd.token, session);
        Ok(view)
    }

    async fn fetch_tracks(
        &self,
        token: &str,
        source: TrackSource,
    ) -> Result<Vec<TrackId>, ApplicationError> {
        let tracks = match source {
            TrackSource::SavedLibrary => self.catalog.fetch_saved_library(token).await,
            TrackSource::PopularCatalog => self.catalog.fetch_popular_catalog().await,
        };
        tracks.map_err(|e| {
            tracing::warn!(user = %token_tag(token), source = %source, error = %e, "Catalog fetch failed");
            ApplicationError::from(e)
        })
    }
}

/// Advance Handler - 移动播放位置并返回后续队列
pub struct AdvanceHandler {
    registry: Arc<dyn SessionRegistryPort>,
    settings: PlaylistSettings,
}

impl AdvanceHandler {
    pub fn new(registry: Arc<dyn SessionRegistryPort>, settings: PlaylistSettings) -> Self {
        Self { registry, settings }
    }

    pub async fn handle(&self, cmd: AdvanceCommand) -> Result<PlaylistView, ApplicationError> {
        let shared = self.registry.get(&cmd.token)?;
        let mut session = shared.lock().await;
        session.advance(cmd.cursor)?;
        self.registry.touch(&cmd.token);

        tracing::debug!(
            user = %token_tag(&cmd.token),
            session_id = %session.id(),
            cursor = cmd.cursor,
            "Playlist advanced"
        );

        Ok(PlaylistView::of(&session, self.settings.queue_len(cmd.limit)))
    }
}

/// Feedback Handler - like / dislike / skip
pub struct FeedbackHandler {
    registry: Arc<dyn SessionRegistryPort>,
    features: Arc<dyn FeatureCachePort>,
    settings: PlaylistSettings,
}

impl FeedbackHandler {
    pub fn new(
        registry: Arc<dyn SessionRegistryPort>,
        features: Arc<dyn FeatureCachePort>,
        settings: PlaylistSettings,
    ) -> Self {
        Self {
            registry,
            features,
            settings,
        }
    }

    /// 移动位置与应用反馈作为一个整体提交：任何一步失败，会话保持调用前的状态
    pub async fn handle(&self, cmd: FeedbackCommand) -> Result<PlaylistView, ApplicationError> {
        let shared = self.registry.get(&cmd.token)?;
        let mut session = shared.lock().await;

        if cmd.cursor < 0 {
            return Err(ApplicationError::InvalidCursor {
                cursor: cmd.cursor,
                len: session.len(),
            });
        }

        let mut next = session.clone();
        next.advance(cmd.cursor)?;

        let mut needed: Vec<TrackId> = next.current_track().cloned().into_iter().collect();
        needed.extend_from_slice(next.tail());
        let features = self.features.feature_table(&needed).await.map_err(|e| {
            tracing::warn!(
                user = %token_tag(&cmd.token),
                feedback = cmd.feedback.as_str(),
                unresolved = e.unresolved.len(),
                error = %e.reason,
                "Feature fetch failed, session left unchanged"
            );
            e
        })?;

        let previous = next.mood();
        let mood = next.apply_feedback(cmd.feedback, &features, &mut shuffle_rng())?;
        *session = next;
        self.registry.touch(&cmd.token);

        tracing::info!(
            user = %token_tag(&cmd.token),
            session_id = %session.id(),
            feedback = cmd.feedback.as_str(),
            cursor = cmd.cursor,
            from = %previous,
            to = %mood,
            playable_end = session.playable_end(),
            "Feedback applied"
        );

        Ok(PlaylistView::of(&session, self.settings.queue_len(cmd.limit)))
    }
}
