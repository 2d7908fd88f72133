//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AdvanceHandler, FeedbackHandler, NewPlaylistHandler, PlaylistSettings,
    // Query handlers
    GetQueueHandler, ListMoodsHandler,
    // Ports
    CatalogSourcePort, FeatureCachePort, SessionRegistryPort,
};
use crate::domain::mood::MoodCatalog;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub registry: Arc<dyn SessionRegistryPort>,
    pub catalog: Arc<dyn CatalogSourcePort>,
    pub feature_cache: Arc<dyn FeatureCachePort>,

    // ========== Command Handlers ==========
    pub new_playlist_handler: NewPlaylistHandler,
    pub advance_handler: AdvanceHandler,
    pub feedback_handler: FeedbackHandler,

    // ========== Query Handlers ==========
    pub get_queue_handler: GetQueueHandler,
    pub list_moods_handler: ListMoodsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        registry: Arc<dyn SessionRegistryPort>,
        catalog: Arc<dyn CatalogSourcePort>,
        feature_cache: Arc<dyn FeatureCachePort>,
        moods: Arc<MoodCatalog>,
        settings: PlaylistSettings,
    ) -> Self {
        Self {
            // Ports
            registry: registry.clone(),
            catalog: catalog.clone(),
            feature_cache: feature_cache.clone(),

            // Command handlers
            new_playlist_handler: NewPlaylistHandler::new(
                registry.clone(),
                catalog,
                feature_cache.clone(),
                moods.clone(),
                settings,
            ),
            advance_handler: AdvanceHandler::new(registry.clone(), settings),
            feedback_handler: FeedbackHandler::new(registry.clone(), feature_cache, settings),

            // Query handlers
            get_queue_handler: GetQueueHandler::new(registry, settings),
            list_moods_handler: ListMoodsHandler::new(moods),
        }
    }
}
