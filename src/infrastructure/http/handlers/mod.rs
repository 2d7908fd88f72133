//! HTTP Handlers

mod mood;
mod ping;
mod playlist;

pub use mood::*;
pub use ping::*;
pub use playlist::*;
