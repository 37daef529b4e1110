//! Event listing and RSVP endpoints

use std::collections::BTreeSet;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use uwscal_core::event::parse_event_time;
use uwscal_core::grid::day_range;
use uwscal_core::store::{by_categories, by_date_range};
use uwscal_core::{Category, Event, EventId};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/{id}", get(get_event))
        .route("/api/events/{id}/rsvp", post(rsvp))
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub category: Option<String>,
}

/// GET /api/events - All events, optionally narrowed by date range and category
///
/// The date range only applies when both bounds are present and readable.
/// A bare date as `end` covers that whole day.
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<Event>> {
    let mut events: Vec<&Event> = state.events.iter().collect();

    let start = query.start.as_deref().and_then(|s| parse_bound(s, |(from, _)| from));
    let end = query.end.as_deref().and_then(|s| parse_bound(s, |(_, to)| to));
    if let (Some(start), Some(end)) = (start, end) {
        events = by_date_range(events, start, end);
    }

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        events = by_categories(events, &BTreeSet::from([Category::from_key(category)]));
    }

    Json(events.into_iter().cloned().collect())
}

/// A bare `YYYY-MM-DD` picks its bound out of the whole day's range.
fn parse_bound(
    s: &str,
    pick: fn((NaiveDateTime, NaiveDateTime)) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Some(pick(day_range(date))),
        Err(_) => parse_event_time(s),
    }
}

/// GET /api/events/:id - A single event
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    find_event(&state, &id).cloned().map(Json)
}

fn find_event<'a>(state: &'a AppState, id: &str) -> Result<&'a Event, AppError> {
    id.parse::<EventId>()
        .ok()
        .and_then(|id| state.events.get(id))
        .ok_or_else(|| AppError::not_found("Event not found."))
}

/// Request body for an RSVP
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Attendee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpResponse {
    pub success: bool,
    pub message: String,
    pub event_id: EventId,
    pub attendee: Attendee,
}

/// POST /api/events/:id/rsvp - Acknowledge an RSVP. Nothing is stored.
async fn rsvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(attendee): Json<Attendee>,
) -> Result<Json<RsvpResponse>, AppError> {
    let event = find_event(&state, &id)?;

    tracing::info!(
        event = %event.id,
        title = %event.title,
        name = attendee.name.as_deref().unwrap_or(""),
        "rsvp received"
    );

    Ok(Json(RsvpResponse {
        success: true,
        message: "RSVP recorded successfully".to_string(),
        event_id: event.id,
        attendee,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get, post};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn ids(body: &Value) -> Vec<u64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_u64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_all_events() {
        let (status, body) = get("/api/events").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 2, 3, 4]);
        assert_eq!(body[1]["location"], "Library");
        assert_eq!(body[2]["maxAttendees"], 20);
    }

    #[tokio::test]
    async fn test_date_range_with_bare_dates_is_inclusive() {
        let (_, body) = get("/api/events?start=2024-03-12&end=2024-03-31").await;
        assert_eq!(ids(&body), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_date_range_needs_both_readable_bounds() {
        let (_, body) = get("/api/events?start=2024-03-12").await;
        assert_eq!(ids(&body), vec![1, 2, 3, 4]);

        let (_, body) = get("/api/events?start=soon&end=2024-03-31").await;
        assert_eq!(ids(&body), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_category_filter_is_exact() {
        let (_, body) = get("/api/events?category=workshop").await;
        assert_eq!(ids(&body), vec![1]);

        let (_, body) = get("/api/events?category=Workshop").await;
        assert!(ids(&body).is_empty());

        let (_, body) = get("/api/events?category=community-meeting&start=2024-03-01&end=2024-03-11").await;
        assert!(ids(&body).is_empty());
    }

    #[tokio::test]
    async fn test_get_event() {
        let (status, body) = get("/api/events/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Town Hall");

        for uri in ["/api/events/99", "/api/events/abc"] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], "Event not found.");
        }
    }

    #[tokio::test]
    async fn test_rsvp_echoes_attendee() {
        let (status, body) = post(
            "/api/events/3/rsvp",
            json!({"name": "Ada", "email": "ada@example.org"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["eventId"], 3);
        assert_eq!(body["attendee"]["name"], "Ada");
        assert!(body["attendee"]["phone"].is_null());
    }

    #[tokio::test]
    async fn test_rsvp_unknown_event() {
        let (status, body) = post("/api/events/42/rsvp", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event not found.");

        let (_, lookup) = get("/api/events/42").await;
        assert_eq!(body, lookup);

        let (status, body) = post("/api/events/abc/rsvp", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event not found.");
    }

    #[test]
    fn test_parse_bound() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(parse_bound("2024-03-31", |(from, _)| from), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_bound("2024-03-31", |(_, to)| to), day.and_hms_opt(23, 59, 59));
        assert_eq!(parse_bound("2024-03-31T08:00", |(_, to)| to), day.and_hms_opt(8, 0, 0));
        assert_eq!(parse_bound("next week", |(from, _)| from), None);
    }
}
