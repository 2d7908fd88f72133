//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod catalog_source;
mod feature_cache;
mod feature_provider;
mod session_registry;

pub use catalog_source::{CatalogError, CatalogSourcePort};
pub use feature_cache::{FeatureCachePort, FeatureCacheStats};
pub use feature_provider::{FeatureFetchError, FeatureProviderPort, MAX_FEATURE_BATCH};
pub use session_registry::{RegistryError, SessionRegistryPort, SharedSession};
