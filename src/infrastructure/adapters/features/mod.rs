//! Feature Adapter - 曲目特征提供方实现

mod fake_feature_provider;
mod http_feature_client;

pub use fake_feature_provider::FakeFeatureProvider;
pub use http_feature_client::*;
