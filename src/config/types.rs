//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::HashMap;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 曲库服务配置
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 特征服务配置
    #[serde(default)]
    pub features: FeaturesConfig,

    /// 排序参数
    #[serde(default)]
    pub ranking: RankingConfig,

    /// 追加 / 覆盖的心情：`name = [valence, energy, danceability]`
    #[serde(default)]
    pub moods: HashMap<String, [f64; 3]>,

    /// 空闲会话清理配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许跨域的前端来源，为空时允许任意来源
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// 曲库服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// 曲库服务 URL
    #[serde(default = "default_service_url")]
    pub url: String,

    /// 请求超时（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 地区过滤，空字符串表示不过滤
    #[serde(default = "default_market")]
    pub market: String,

    /// 收藏曲目最多拉取数量
    #[serde(default = "default_saved_limit")]
    pub saved_limit: usize,

    /// 热门榜单数量
    #[serde(default = "default_popular_limit")]
    pub popular_limit: usize,

    /// 服务级凭证
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_service_url() -> String {
    "http://localhost:8100".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_market() -> String {
    "US".to_string()
}

fn default_saved_limit() -> usize {
    1000
}

fn default_popular_limit() -> usize {
    200
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout_secs: default_timeout(),
            market: default_market(),
            saved_limit: default_saved_limit(),
            popular_limit: default_popular_limit(),
            api_key: None,
        }
    }
}

/// 特征服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_service_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 单批次曲目数（1..=100）
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// 同一请求内并发拉取的批次数
    #[serde(default = "default_max_concurrent_batches")]
    pub max_concurrent_batches: usize,

    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_batch_size() -> usize {
    100
}

fn default_max_concurrent_batches() -> usize {
    4
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout_secs: default_timeout(),
            batch_size: default_batch_size(),
            max_concurrent_batches: default_max_concurrent_batches(),
            api_key: None,
        }
    }
}

/// 排序参数
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// 可播放距离阈值
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// 局部打乱窗口
    #[serde(default = "default_shuffle_window")]
    pub shuffle_window: usize,

    /// 未指定时返回的队列长度
    #[serde(default = "default_queue_len")]
    pub default_queue_len: usize,
}

fn default_threshold() -> f64 {
    0.4
}

fn default_shuffle_window() -> usize {
    5
}

fn default_queue_len() -> usize {
    10
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            shuffle_window: default_shuffle_window(),
            default_queue_len: default_queue_len(),
        }
    }
}

/// 空闲会话清理配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// 扫描间隔（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// 会话空闲超时（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    300
}

fn default_session_expire() -> u64 {
    86400
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            session_expire_secs: default_session_expire(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别：trace / debug / info / warn / error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
