use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Event, RecurrenceUnit};

// ============================================================================
// Event API Types
// ============================================================================

/// Body of `POST /events/{id}/archive`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEventRequest {
    pub archive: bool,
}

/// Body of `POST /events/{id}/schedule-event`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEventRequest {
    pub scheduled_event: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub location: Option<String>,

    pub owner_id: Option<String>,
    pub duration: Option<f64>,

    #[serde(default)]
    pub dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub times: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub days_only: bool,

    #[serde(default)]
    pub is_recurring: bool,
    #[validate(range(min = 1))]
    pub recurrence_interval: Option<i32>,
    pub recurrence_unit: Option<RecurrenceUnit>,
    #[validate(range(min = 0))]
    pub recurrence_advance_days: Option<i32>,
    pub next_occurrence_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub has_specific_times: bool,
    #[serde(default)]
    pub times: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub days_only: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub scheduled_event: Option<serde_json::Value>,
    #[serde(default)]
    pub num_responses: u32,
    #[serde(default)]
    pub parent_event_id: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_enabled: bool,
    #[serde(default)]
    pub recurrence_interval: Option<i32>,
    #[serde(default)]
    pub recurrence_unit: Option<RecurrenceUnit>,
    #[serde(default)]
    pub recurrence_advance_days: Option<i32>,
    #[serde(default)]
    pub next_occurrence_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            owner_id: event.owner_id,
            name: event.name,
            description: event.description,
            location: event.location,
            duration: event.duration,
            dates: event.dates,
            has_specific_times: event.has_specific_times,
            times: event.times,
            days_only: event.days_only,
            is_archived: event.is_archived,
            scheduled_event: event.scheduled_event,
            num_responses: event.num_responses,
            parent_event_id: event.parent_event_id,
            is_recurring: event.is_recurring,
            recurrence_enabled: event.recurrence_enabled,
            recurrence_interval: event.recurrence_interval,
            recurrence_unit: event.recurrence_unit,
            recurrence_advance_days: event.recurrence_advance_days,
            next_occurrence_date: event.next_occurrence_date,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

// ============================================================================
// Health API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
