//! Command Handlers

mod playlist_command_handlers;

pub use playlist_command_handlers::{
    AdvanceHandler, FeedbackHandler, NewPlaylistHandler, PlaylistSettings, DEFAULT_QUEUE_LEN,
};
