//! Playlist Query Handlers

use std::sync::Arc;

use crate::application::commands::handlers::PlaylistSettings;
use crate::application::commands::PlaylistView;
use crate::application::error::ApplicationError;
use crate::application::ports::SessionRegistryPort;
use crate::application::queries::{GetQueueQuery, ListMoodsQuery, MoodEntry};
use crate::domain::mood::MoodCatalog;

/// GetQueue Handler
pub struct GetQueueHandler {
    registry: Arc<dyn SessionRegistryPort>,
    settings: PlaylistSettings,
}

impl GetQueueHandler {
    pub fn new(registry: Arc<dyn SessionRegistryPort>, settings: PlaylistSettings) -> Self {
        Self { registry, settings }
    }

    pub async fn handle(&self, query: GetQueueQuery) -> Result<PlaylistView, ApplicationError> {
        let shared = self.registry.get(&query.token)?;
        let session = shared.lock().await;
        Ok(PlaylistView::of(&session, self.settings.queue_len(query.limit)))
    }
}

/// ListMoods Handler
pub struct ListMoodsHandler {
    moods: Arc<MoodCatalog>,
}

impl ListMoodsHandler {
    pub fn new(moods: Arc<MoodCatalog>) -> Self {
        Self { moods }
    }

    pub fn handle(&self, _query: ListMoodsQuery) -> Vec<MoodEntry> {
        self.moods
            .iter()
            .map(|(name, mood)| MoodEntry {
                name: name.to_string(),
                mood,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mood::{MoodVector, RankingPolicy, TrackId};
    use crate::domain::playlist::{FeatureTable, PlaylistSession, TrackSource};
    use crate::infrastructure::memory::InMemorySessionRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry_with_session() -> Arc<InMemorySessionRegistry> {
        let features: FeatureTable = (0..8)
            .map(|i| (TrackId::new(format!("t{}", i)), MoodVector::new(i as f64 * 0.03, 0.0, 0.0)))
            .collect();
        let tracks: Vec<TrackId> = (0..8).map(|i| TrackId::new(format!("t{}", i))).collect();
        let session = PlaylistSession::create(
            "token",
            TrackSource::SavedLibrary,
            MoodVector::ZERO,
            tracks,
            &features,
            RankingPolicy::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        let registry = Arc::new(InMemorySessionRegistry::new());
        registry.insert("token", session);
        registry
    }

    #[tokio::test]
    async fn test_get_queue_is_idempotent() {
        let handler = GetQueueHandler::new(registry_with_session(), PlaylistSettings::default());
        let query = GetQueueQuery {
            token: "token".to_string(),
            limit: Some(4),
        };

        let first = handler.handle(query.clone()).await.unwrap();
        let second = handler.handle(query).await.unwrap();
        assert_eq!(first.queue.len(), 4);
        assert_eq!(first.queue, second.queue);
        assert_eq!(first.cursor, second.cursor);
    }

    #[tokio::test]
    async fn test_get_queue_uses_default_length() {
        let settings = PlaylistSettings {
            default_queue_len: 3,
            ..PlaylistSettings::default()
        };
        let handler = GetQueueHandler::new(registry_with_session(), settings);
        let view = handler
            .handle(GetQueueQuery {
                token: "token".to_string(),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(view.queue.len(), 3);
        assert_eq!(view.total, 8);
    }

    #[tokio::test]
    async fn test_get_queue_without_session() {
        let handler = GetQueueHandler::new(
            Arc::new(InMemorySessionRegistry::new()),
            PlaylistSettings::default(),
        );
        let err = handler
            .handle(GetQueueQuery {
                token: "missing".to_string(),
                limit: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoActiveSession(_)));
    }

    #[test]
    fn test_list_moods() {
        let handler = ListMoodsHandler::new(Arc::new(MoodCatalog::builtin()));
        let moods = handler.handle(ListMoodsQuery);
        assert_eq!(moods.len(), 8);
        let adele = moods.iter().find(|m| m.name == "adele").unwrap();
        assert_eq!(adele.mood, MoodVector::new(0.0, 1.0, 0.0));
    }
}
