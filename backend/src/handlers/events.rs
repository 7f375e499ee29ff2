use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use shared::api::{ArchiveEventRequest, CreateEventRequest, EventResponse, ScheduleEventRequest};
use shared::models::Event;

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let now = Utc::now();
    let mut event = Event::new(Uuid::new_v4().to_string(), payload.name, now);
    event.owner_id = payload.owner_id;
    event.description = payload.description;
    event.location = payload.location;
    event.duration = payload.duration;
    event.has_specific_times = !payload.times.is_empty();
    event.dates = payload.dates;
    event.times = payload.times;
    event.days_only = payload.days_only;

    if payload.is_recurring {
        if payload.recurrence_interval.is_none() || payload.recurrence_unit.is_none() {
            return Err(ApiError::bad_request(
                "Recurring events need recurrenceInterval and recurrenceUnit",
            ));
        }

        event.is_recurring = true;
        event.recurrence_enabled = true;
        event.recurrence_interval = payload.recurrence_interval;
        event.recurrence_unit = payload.recurrence_unit;
        event.recurrence_advance_days = payload.recurrence_advance_days;
        event.next_occurrence_date = match payload.next_occurrence_date {
            Some(date) => Some(date),
            None => Some(event.next_creation_date()?),
        };
    }

    let event = state.store.insert(event).await;
    tracing::info!("Created event {}", event.id);

    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EventResponse>> {
    let event = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Event"))?;

    Ok(Json(event.into()))
}

pub async fn archive_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ArchiveEventRequest>, JsonRejection>,
) -> ApiResult<Json<EventResponse>> {
    let Json(payload) = payload?;

    let event = state
        .store
        .archive(&id, payload.archive, Utc::now())
        .await
        .ok_or_else(|| ApiError::not_found("Event"))?;

    tracing::debug!("Event {} archived={}", id, payload.archive);
    Ok(Json(event.into()))
}

pub async fn schedule_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ScheduleEventRequest>, JsonRejection>,
) -> ApiResult<Json<EventResponse>> {
    let Json(payload) = payload?;

    let event = state
        .store
        .schedule(&id, payload.scheduled_event, Utc::now())
        .await
        .ok_or_else(|| ApiError::not_found("Event"))?;

    tracing::debug!("Event {} scheduled", id);
    Ok(Json(event.into()))
}
