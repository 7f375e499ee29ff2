use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{config, events, health};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // Public config
        .route("/config", get(config::get_config))
        .route("/config/features", get(config::get_features))

        // Event routes
        .route("/events", post(events::create_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/archive", post(events::archive_event))
        .route("/events/:id/schedule-event", post(events::schedule_event))
}

pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/config.js", get(config::config_script))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use shared::config::PublicConfig;
    use shared::models::Event;
    use tower::ServiceExt;

    async fn app_with_event(id: &str) -> (Router, EventStore) {
        let store = EventStore::new();
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
        store.insert(Event::new(id, "Board meeting", now)).await;
        let app = create_app(AppState::new(store.clone(), PublicConfig::example()));
        (app, store)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_archive_event() {
        let (app, store) = app_with_event("42").await;

        let (status, body) = send(
            app,
            Method::POST,
            "/api/events/42/archive",
            Some(json!({ "archive": true })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "42");
        assert_eq!(body["isArchived"], true);
        assert!(store.get("42").await.unwrap().is_archived);
    }

    #[tokio::test]
    async fn test_schedule_event() {
        let (app, store) = app_with_event("7").await;
        let slot = json!({ "startDate": "2024-04-03T15:00:00Z", "endDate": "2024-04-03T16:00:00Z" });

        let (status, body) = send(
            app,
            Method::POST,
            "/api/events/7/schedule-event",
            Some(json!({ "scheduledEvent": slot })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scheduledEvent"], slot);
        assert_eq!(store.get("7").await.unwrap().scheduled_event, Some(slot));
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let (app, _) = app_with_event("1").await;

        let (status, body) = send(
            app,
            Method::POST,
            "/api/events/999/archive",
            Some(json!({ "archive": true })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event not found");
    }

    #[tokio::test]
    async fn test_bad_payload_is_bad_request() {
        let (app, _) = app_with_event("1").await;

        let (status, body) = send(
            app,
            Method::POST,
            "/api/events/1/archive",
            Some(json!({ "archive": "yes please" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid JSON format");
    }

    #[tokio::test]
    async fn test_create_and_get_event() {
        let (app, _) = app_with_event("1").await;

        let (status, created) = send(
            app.clone(),
            Method::POST,
            "/api/events",
            Some(json!({
                "name": "Book club",
                "dates": ["2024-04-10T18:00:00Z"],
                "isRecurring": true,
                "recurrenceInterval": 2,
                "recurrenceUnit": "weeks",
                "recurrenceAdvanceDays": 7,
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["isRecurring"], true);
        assert_eq!(created["recurrenceInterval"], 2);
        assert_eq!(created["recurrenceUnit"], "weeks");
        assert_eq!(created["recurrenceAdvanceDays"], 7);
        // Apr 10 + 2 weeks - 7 days
        assert_eq!(created["nextOccurrenceDate"], "2024-04-17T18:00:00Z");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(app, Method::GET, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Book club");
    }

    #[tokio::test]
    async fn test_create_event_validation() {
        let (app, _) = app_with_event("1").await;

        let (status, _) = send(app.clone(), Method::POST, "/api/events", Some(json!({ "name": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/events",
            Some(json!({ "name": "Standup", "isRecurring": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("recurrenceInterval"));
    }

    #[tokio::test]
    async fn test_config_endpoints() {
        let (app, _) = app_with_event("1").await;

        let (status, config) = send(app.clone(), Method::GET, "/api/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(config["blogEnabled"], true);
        assert_eq!(config["googleClientId"], "");

        let (status, features) = send(app, Method::GET, "/api/config/features", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(features["analytics"], false);
        assert_eq!(features["blog"]["text"], "Blog");
    }

    #[tokio::test]
    async fn test_config_script() {
        let (app, _) = app_with_event("1").await;

        let response = app
            .oneshot(Request::get("/config.js").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript; charset=utf-8"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let script = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(script.starts_with("window.__TIMEFUL_CONFIG__ = {"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with_event("1").await;
        let (status, body) = send(app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
