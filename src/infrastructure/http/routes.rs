//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/moods             GET   列出可用心情
//! - /api/playlist/new      POST  创建会话，或在同一来源下切换心情
//! - /api/playlist/next     POST  推进播放位置并返回后续队列
//! - /api/playlist/like     POST  喜欢当前曲目
//! - /api/playlist/dislike  POST  不喜欢 / 跳过当前曲目
//! - /api/playlist/queue    POST  读取当前队列

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/moods", get(handlers::list_moods))
        .nest("/playlist", playlist_routes())
}

/// Playlist 路由
fn playlist_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/new", post(handlers::new_playlist))
        .route("/next", post(handlers::next))
        .route("/like", post(handlers::like))
        .route("/dislike", post(handlers::dislike))
        .route("/queue", post(handlers::queue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::PlaylistSettings;
    use crate::domain::mood::{MoodCatalog, RankingPolicy};
    use crate::infrastructure::adapters::{FakeCatalogSource, FakeFeatureProvider};
    use crate::infrastructure::memory::{InMemoryFeatureCache, InMemorySessionRegistry};

    fn app() -> Router {
        let provider = Arc::new(FakeFeatureProvider::from_entries([
            ("happy1", [1.0, 1.0, 0.0]),
            ("happy2", [0.9, 0.9, 0.1]),
            ("sad1", [0.0, 0.0, 1.0]),
            ("sad2", [0.1, 0.0, 0.9]),
        ]));
        let catalog = Arc::new(FakeCatalogSource::new(
            vec!["sad1", "happy1", "sad2", "happy2"],
            vec!["happy1"],
        ));
        let settings = PlaylistSettings {
            policy: RankingPolicy {
                threshold: 0.4,
                shuffle_window: 0,
            },
            default_queue_len: 10,
        };
        let state = AppState::new(
            Arc::new(InMemorySessionRegistry::new()),
            catalog,
            Arc::new(InMemoryFeatureCache::new(provider, 100)),
            Arc::new(MoodCatalog::builtin()),
            settings,
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn tracks(body: &Value) -> Vec<&str> {
        body["data"]["tracks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t.as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = app();
        let body = call(&app, "GET", "/api/ping", None).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_list_moods() {
        let app = app();
        let body = call(&app, "GET", "/api/moods", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["moods"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_playlist_flow() {
        let app = app();

        let created = call(
            &app,
            "POST",
            "/api/playlist/new",
            Some(json!({"token": "tok-1", "mood": "upbeat", "source": "saved"})),
        )
        .await;
        assert_eq!(created["errno"], 0);
        assert_eq!(created["data"]["cursor"], -1);
        assert_eq!(created["data"]["total"], 4);
        assert_eq!(created["data"]["playable_end"], 2);
        assert_eq!(tracks(&created)[..2], ["happy1", "happy2"]);

        let next = call(
            &app,
            "POST",
            "/api/playlist/next",
            Some(json!({"token": "tok-1", "cursor": 0, "limit": 2})),
        )
        .await;
        assert_eq!(next["data"]["cursor"], 0);
        assert_eq!(tracks(&next), vec!["happy2"]);

        let liked = call(
            &app,
            "POST",
            "/api/playlist/like",
            Some(json!({"token": "tok-1", "cursor": 0})),
        )
        .await;
        assert_eq!(liked["errno"], 0);
        // (1,1,0) 向 (1,1,0) 移动，不变
        assert_eq!(liked["data"]["mood"]["valence"], 1.0);

        let queue = call(
            &app,
            "POST",
            "/api/playlist/queue",
            Some(json!({"token": "tok-1", "limit": 1})),
        )
        .await;
        assert_eq!(tracks(&queue).len(), 1);
    }

    #[tokio::test]
    async fn test_dislike_with_skip_moves_mood_less() {
        let app = app();
        call(
            &app,
            "POST",
            "/api/playlist/new",
            Some(json!({"token": "a", "mood": "adele", "source": "popular"})),
        )
        .await;
        let skipped = call(
            &app,
            "POST",
            "/api/playlist/dislike",
            Some(json!({"token": "a", "cursor": 0, "skip": true})),
        )
        .await;
        assert_eq!(skipped["errno"], 0);
        // adele (0,1,0)，曲目 (1,1,0)，scale -0.25 → valence -0.25
        let valence = skipped["data"]["mood"]["valence"].as_f64().unwrap();
        assert!((valence + 0.25).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_errors_use_envelope() {
        let app = app();

        let unknown = call(
            &app,
            "POST",
            "/api/playlist/new",
            Some(json!({"token": "t", "mood": "grumpy", "source": "saved"})),
        )
        .await;
        assert_eq!(unknown["errno"], 400);
        assert!(unknown["data"].is_null());

        let missing = call(
            &app,
            "POST",
            "/api/playlist/next",
            Some(json!({"token": "nobody", "cursor": 0})),
        )
        .await;
        assert_eq!(missing["errno"], 404);

        call(
            &app,
            "POST",
            "/api/playlist/new",
            Some(json!({"token": "t", "mood": "upbeat", "source": "saved"})),
        )
        .await;
        let out_of_range = call(
            &app,
            "POST",
            "/api/playlist/next",
            Some(json!({"token": "t", "cursor": 99})),
        )
        .await;
        assert_eq!(out_of_range["errno"], 400);
    }
}
