//! Moodlist - 心情驱动的播放列表服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Mood Context: 心情向量、心情表、排序与反馈
//! - Playlist Context: 播放列表会话（尾部重排状态机）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CatalogSource, FeatureProvider, FeatureCache, SessionRegistry）
//! - Commands: 新建 / 推进 / 反馈
//! - Queries: 队列、心情列表
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful JSON API
//! - Memory: SessionRegistry, FeatureCache 内存实现
//! - Worker: SessionSweeper 空闲会话清理
//! - Adapters: 曲库 / 特征服务 HTTP 客户端与测试替身

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
