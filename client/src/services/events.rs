use std::fmt::Display;

use shared::api::{ArchiveEventRequest, EventResponse, ScheduleEventRequest};

use super::api::{ApiClient, ClientError};

/// Event mutations against the backend.
#[derive(Debug, Clone, Default)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Archive or unarchive an event.
    pub async fn archive_event(
        &self,
        event_id: impl Display,
        archive: bool,
    ) -> Result<EventResponse, ClientError> {
        self.api
            .post(
                &format!("/events/{}/archive", event_id),
                &ArchiveEventRequest { archive },
            )
            .await
    }

    /// Record the finalized time slot for an event. `scheduled_event` is sent
    /// as-is; its shape is owned by the backend.
    pub async fn schedule_event(
        &self,
        event_id: impl Display,
        scheduled_event: serde_json::Value,
    ) -> Result<EventResponse, ClientError> {
        self.api
            .post(
                &format!("/events/{}/schedule-event", event_id),
                &ScheduleEventRequest { scheduled_event },
            )
            .await
    }
}
