//! Index, health and form endpoints

use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::state::{API_VERSION, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api", get(index))
        .route("/api/health", get(health))
        .route("/api/contact", post(contact))
        .route("/api/newsletter", post(newsletter))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "United We Stand CAC Backend Server",
        "api": "/api",
    }))
}

/// GET /api - Endpoint map
async fn index() -> Json<Value> {
    Json(json!({
        "message": "United We Stand CAC API",
        "version": API_VERSION,
        "endpoints": {
            "content": "/api/content/:page",
            "events": "/api/events",
            "health": "/api/health",
        },
    }))
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

/// GET /api/health
async fn health() -> Json<Health> {
    Json(Health {
        status: "OK",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        version: API_VERSION,
    })
}

/// Generic acknowledgement for form submissions
#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// POST /api/contact - Log the submission and acknowledge it
async fn contact(Json(form): Json<ContactForm>) -> Json<Ack> {
    tracing::info!(
        name = form.name.as_deref().unwrap_or(""),
        email = form.email.as_deref().unwrap_or(""),
        subject = form.subject.as_deref().unwrap_or(""),
        length = form.message.as_deref().map_or(0, str::len),
        "contact form submission"
    );

    Json(Ack {
        success: true,
        message: "Your message has been sent successfully. We will get back to you soon.",
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsletterSignup {
    pub email: Option<String>,
}

/// POST /api/newsletter
async fn newsletter(Json(signup): Json<NewsletterSignup>) -> Json<Ack> {
    tracing::info!(email = signup.email.as_deref().unwrap_or(""), "newsletter signup");

    Json(Ack {
        success: true,
        message: "Successfully subscribed to our newsletter!",
    })
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get, post};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let (status, body) = get("/api").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["endpoints"]["events"], "/api/events");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_forms_acknowledge() {
        let (status, body) = post(
            "/api/contact",
            json!({"name": "Ada", "email": "ada@example.org", "message": "Hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = post("/api/newsletter", json!({"email": "ada@example.org"})).await;
        assert_eq!(body["message"], "Successfully subscribed to our newsletter!");
    }
}
