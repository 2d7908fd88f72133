//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::application::ports::MAX_FEATURE_BATCH;
use crate::domain::mood::MoodCatalog;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 会话空闲超时上限（chrono 能表示的毫秒范围）
const MAX_SESSION_EXPIRE_SECS: u64 = i64::MAX as u64 / 1000;

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `MOODLIST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `MOODLIST_SERVER__PORT=8080`
/// - `MOODLIST_CATALOG__URL=http://catalog:8100`
/// - `MOODLIST_RANKING__THRESHOLD=0.5`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("catalog.url", "http://localhost:8100")?
        .set_default("catalog.timeout_secs", 30)?
        .set_default("catalog.market", "US")?
        .set_default("catalog.saved_limit", 1000)?
        .set_default("catalog.popular_limit", 200)?
        .set_default("features.url", "http://localhost:8100")?
        .set_default("features.timeout_secs", 30)?
        .set_default("features.batch_size", 100)?
        .set_default("features.max_concurrent_batches", 4)?
        .set_default("ranking.threshold", 0.4)?
        .set_default("ranking.shuffle_window", 5)?
        .set_default("ranking.default_queue_len", 10)?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 300)?
        .set_default("gc.session_expire_secs", 86400)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("MOODLIST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.server.port == 0 {
        return invalid("Server port cannot be 0");
    }

    if config.catalog.url.is_empty() {
        return invalid("Catalog URL cannot be empty");
    }
    if config.features.url.is_empty() {
        return invalid("Features URL cannot be empty");
    }

    if config.features.batch_size == 0 || config.features.batch_size > MAX_FEATURE_BATCH {
        return Err(ConfigError::ValidationError(format!(
            "Feature batch size must be within 1..={}, got {}",
            MAX_FEATURE_BATCH, config.features.batch_size
        )));
    }

    if !config.ranking.threshold.is_finite() || config.ranking.threshold < 0.0 {
        return invalid("Ranking threshold must be a finite non-negative number");
    }
    if config.ranking.default_queue_len == 0 {
        return invalid("Default queue length cannot be 0");
    }

    if config.features.max_concurrent_batches == 0 {
        return invalid("Feature max concurrent batches cannot be 0");
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return invalid("GC interval cannot be 0 when GC is enabled");
    }
    if config.gc.session_expire_secs > MAX_SESSION_EXPIRE_SECS {
        return Err(ConfigError::ValidationError(format!(
            "Session expire must be at most {}s, got {}",
            MAX_SESSION_EXPIRE_SECS, config.gc.session_expire_secs
        )));
    }

    for origin in &config.server.cors_origins {
        if http::HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Invalid CORS origin: {:?}",
                origin
            )));
        }
    }

    MoodCatalog::with_overrides(&config.moods)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    if config.server.cors_origins.is_empty() {
        tracing::info!("CORS Origins: any");
    } else {
        tracing::info!("CORS Origins: {}", config.server.cors_origins.join(", "));
    }
    tracing::info!("Catalog URL: {}", config.catalog.url);
    tracing::info!("Catalog Market: {}", config.catalog.market);
    tracing::info!(
        "Catalog Limits: saved={} popular={}",
        config.catalog.saved_limit,
        config.catalog.popular_limit
    );
    tracing::info!("Features URL: {}", config.features.url);
    tracing::info!(
        "Features Batch: size={} concurrency={}",
        config.features.batch_size,
        config.features.max_concurrent_batches
    );
    tracing::info!(
        "Ranking: threshold={} shuffle_window={} queue_len={}",
        config.ranking.threshold,
        config.ranking.shuffle_window,
        config.ranking.default_queue_len
    );
    if !config.moods.is_empty() {
        tracing::info!("Custom Moods: {}", config.moods.len());
    }
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Session Expire: {}s", config.gc.session_expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
