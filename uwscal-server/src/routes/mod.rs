pub mod content;
pub mod events;
pub mod site;

use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use uwscal_core::CalError;

use crate::state::AppState;

/// The full API with permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(site::router())
        .merge(content::router())
        .merge(events::router())
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned from handlers, rendered as `{"error": ...}`.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::NOT_FOUND,
            error: anyhow::anyhow!(message.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = match error.downcast_ref::<CalError>() {
            Some(CalError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError { status, error }
    }
}

async fn not_found(uri: Uri) -> AppError {
    if uri.path().starts_with("/api") {
        AppError::not_found("API endpoint not found")
    } else {
        AppError::not_found(format!("No route for {}", uri.path()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use uwscal_core::EventStore;
    use uwscal_core::content::ContentStore;

    use crate::state::AppState;

    const EVENTS: &str = r#"[
        {"id": 1, "title": "Budgeting 101", "category": "workshop",
         "start": "2024-03-10T09:00", "end": "2024-03-10T10:00"},
        {"id": 2, "title": "Town Hall", "category": "community-meeting",
         "start": "2024-03-12T18:00", "end": "2024-03-12T19:30", "location": "Library"},
        {"id": 3, "title": "Park Cleanup", "category": "volunteer-opportunity",
         "start": "2024-03-31T08:00", "end": "2024-03-31T12:00",
         "maxAttendees": 20, "currentAttendees": 25},
        {"id": 4, "title": "Food Pantry", "category": "resource-distribution",
         "start": "2024-04-02T10:00", "end": "2024-04-02T14:00"}
    ]"#;

    const CONTENT: &str = r#"{
        "home": {"hero": {"title": "United We Stand"}},
        "footer": {"email": "info@example.org"}
    }"#;

    pub fn app() -> Router {
        let (events, _) = EventStore::from_json(EVENTS).unwrap();
        let content = ContentStore::from_json(CONTENT).unwrap();
        crate::routes::router(AppState::new(events, content))
    }

    pub async fn get(uri: &str) -> (StatusCode, Value) {
        send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(request).await
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
