//! Moodlist - 心情驱动的播放列表服务

use std::sync::Arc;

use moodlist::application::PlaylistSettings;
use moodlist::config::{load_config, print_config};
use moodlist::domain::mood::{MoodCatalog, RankingPolicy};
use moodlist::infrastructure::adapters::{
    HttpCatalogClient, HttpCatalogClientConfig, HttpFeatureClient, HttpFeatureClientConfig,
};
use moodlist::infrastructure::http::{AppState, HttpServer, ServerConfig};
use moodlist::infrastructure::memory::{InMemoryFeatureCache, InMemorySessionRegistry};
use moodlist::infrastructure::worker::{SessionSweeper, SessionSweeperConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},moodlist={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Moodlist - 心情播放列表服务");
    print_config(&config);

    // 心情表（内置 + 配置覆盖）
    let moods = Arc::new(MoodCatalog::with_overrides(&config.moods)?);
    tracing::info!(count = moods.len(), "Mood catalog loaded");

    // 曲库客户端
    let catalog = Arc::new(HttpCatalogClient::new(HttpCatalogClientConfig {
        base_url: config.catalog.url.clone(),
        timeout_secs: config.catalog.timeout_secs,
        market: config.catalog.market.clone(),
        saved_limit: config.catalog.saved_limit,
        popular_limit: config.catalog.popular_limit,
        api_key: config.catalog.api_key.clone(),
    })?);

    // 特征客户端 + 进程内缓存
    let feature_client = Arc::new(HttpFeatureClient::new(HttpFeatureClientConfig {
        base_url: config.features.url.clone(),
        timeout_secs: config.features.timeout_secs,
        api_key: config.features.api_key.clone(),
    })?);
    let feature_cache = Arc::new(
        InMemoryFeatureCache::new(feature_client, config.features.batch_size)
            .with_max_concurrent_batches(config.features.max_concurrent_batches),
    );

    let registry = Arc::new(InMemorySessionRegistry::new());

    // 启动空闲会话清理
    if config.gc.enabled {
        let sweeper = SessionSweeper::new(
            SessionSweeperConfig {
                interval_secs: config.gc.interval_secs,
                session_expire_secs: config.gc.session_expire_secs,
            },
            registry.clone(),
        );
        tokio::spawn(sweeper.run());
    }

    let settings = PlaylistSettings {
        policy: RankingPolicy {
            threshold: config.ranking.threshold,
            shuffle_window: config.ranking.shuffle_window,
        },
        default_queue_len: config.ranking.default_queue_len,
    };

    let state = AppState::new(registry, catalog, feature_cache, moods, settings);
    let server = HttpServer::new(
        ServerConfig::new(&config.server.host, config.server.port)
            .with_cors_origins(config.server.cors_origins.clone()),
        state,
    );

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
