//! Memory Layer - In-Memory State Management
//!
//! 实现 SessionRegistry 和 FeatureCache，管理播放列表会话和曲目特征的内存状态

mod feature_cache;
mod session_registry;

pub use feature_cache::{InMemoryFeatureCache, DEFAULT_MAX_CONCURRENT_BATCHES};
pub use session_registry::InMemorySessionRegistry;
