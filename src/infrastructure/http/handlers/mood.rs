//! Mood Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListMoodsQuery;
use crate::infrastructure::http::dto::{ApiResponse, MoodListResponse, MoodResponse};
use crate::infrastructure::http::state::AppState;

pub async fn list_moods(State(state): State<Arc<AppState>>) -> Json<ApiResponse<MoodListResponse>> {
    let moods = state
        .list_moods_handler
        .handle(ListMoodsQuery)
        .into_iter()
        .map(MoodResponse::from)
        .collect();

    Json(ApiResponse::success(MoodListResponse { moods }))
}
