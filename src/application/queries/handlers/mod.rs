//! Query Handlers

mod playlist_handlers;

pub use playlist_handlers::{GetQueueHandler, ListMoodsHandler};
