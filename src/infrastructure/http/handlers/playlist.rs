//! Playlist Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    AdvanceCommand, FeedbackCommand, GetQueueQuery, NewPlaylistCommand, PlaylistView,
};
use crate::domain::mood::Feedback;
use crate::infrastructure::http::dto::{
    ApiResponse, CursorRequest, DislikeRequest, NewPlaylistRequest, PlaylistResponse, QueueRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type PlaylistResult = Result<Json<ApiResponse<PlaylistResponse>>, ApiError>;

fn respond(view: PlaylistView) -> PlaylistResult {
    Ok(Json(ApiResponse::success(view.into())))
}

// ============================================================================
// New
// ============================================================================

pub async fn new_playlist(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewPlaylistRequest>,
) -> PlaylistResult {
    let cmd = NewPlaylistCommand {
        token: req.token,
        mood: req.mood,
        source: req.source,
        cursor: req.cursor,
        limit: req.limit,
    };

    respond(state.new_playlist_handler.handle(cmd).await?)
}

// ============================================================================
// Next
// ============================================================================

pub async fn next(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CursorRequest>,
) -> PlaylistResult {
    let cmd = AdvanceCommand {
        token: req.token,
        cursor: req.cursor,
        limit: req.limit,
    };

    respond(state.advance_handler.handle(cmd).await?)
}

// ============================================================================
// Feedback
// ============================================================================

pub async fn like(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CursorRequest>,
) -> PlaylistResult {
    let cmd = FeedbackCommand {
        token: req.token,
        cursor: req.cursor,
        feedback: Feedback::Like,
        limit: req.limit,
    };

    respond(state.feedback_handler.handle(cmd).await?)
}

pub async fn dislike(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DislikeRequest>,
) -> PlaylistResult {
    let cmd = FeedbackCommand {
        token: req.token,
        cursor: req.cursor,
        feedback: if req.skip { Feedback::Skip } else { Feedback::Dislike },
        limit: req.limit,
    };

    respond(state.feedback_handler.handle(cmd).await?)
}

// ============================================================================
// Queue
// ============================================================================

pub async fn queue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueueRequest>,
) -> PlaylistResult {
    let query = GetQueueQuery {
        token: req.token,
        limit: req.limit,
    };

    respond(state.get_queue_handler.handle(query).await?)
}
