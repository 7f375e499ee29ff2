use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit a recurring event advances by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Days,
    Weeks,
    Months,
}

/// Calendar event model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Length of the event in hours
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
    pub is_deleted: bool,
    /// Finalized time slot; the backend treats it as opaque JSON
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
    /// Days before the next date at which the next instance is created
    #[serde(default)]
    pub recurrence_advance_days: Option<i32>,
    #[serde(default)]
    pub next_occurrence_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// A blank, non-recurring event.
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            owner_id: None,
            name: name.into(),
            description: None,
            location: None,
            duration: None,
            dates: Vec::new(),
            has_specific_times: false,
            times: Vec::new(),
            days_only: false,
            is_archived: false,
            is_deleted: false,
            scheduled_event: None,
            num_responses: 0,
            parent_event_id: None,
            is_recurring: false,
            recurrence_enabled: false,
            recurrence_interval: None,
            recurrence_unit: None,
            recurrence_advance_days: None,
            next_occurrence_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}
