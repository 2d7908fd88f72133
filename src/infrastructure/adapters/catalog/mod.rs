//! Catalog Adapter - 外部曲库客户端实现

mod fake_catalog_source;
mod http_catalog_client;

pub use fake_catalog_source::FakeCatalogSource;
pub use http_catalog_client::*;
