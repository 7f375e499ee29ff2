//! In-memory event storage shared by handlers and the scheduler.

use chrono::{DateTime, Utc};
use shared::models::Event;
use shared::recurrence::Rollover;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<HashMap<String, Event>>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, event: Event) -> Event {
        let mut events = self.events.write().await;
        events.insert(event.id.clone(), event.clone());
        event
    }

    /// Look up a live event. Deleted events are reported as missing.
    pub async fn get(&self, id: &str) -> Option<Event> {
        let events = self.events.read().await;
        events.get(id).filter(|event| !event.is_deleted).cloned()
    }

    /// Apply `change` to a live event and bump its `updated_at`.
    pub async fn update<F>(&self, id: &str, now: DateTime<Utc>, change: F) -> Option<Event>
    where
        F: FnOnce(&mut Event),
    {
        let mut events = self.events.write().await;
        let event = events.get_mut(id).filter(|event| !event.is_deleted)?;
        change(event);
        event.updated_at = now;
        Some(event.clone())
    }

    pub async fn archive(&self, id: &str, archive: bool, now: DateTime<Utc>) -> Option<Event> {
        self.update(id, now, |event| event.is_archived = archive).await
    }

    pub async fn schedule(
        &self,
        id: &str,
        scheduled_event: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Option<Event> {
        self.update(id, now, |event| event.scheduled_event = Some(scheduled_event))
            .await
    }

    /// Recurring events whose next instance should exist by `now`.
    pub async fn due_recurring(&self, now: DateTime<Utc>) -> Vec<Event> {
        let events = self.events.read().await;
        events
            .values()
            .filter(|event| event.is_due(now))
            .cloned()
            .collect()
    }

    /// Insert a rollover's instance and move its parent onto the new period.
    ///
    /// Both writes happen under one lock. The parent takes the instance's dates
    /// and times so the following rollover is built from the latest period.
    /// Returns the inserted instance, or `None` if the parent is gone.
    pub async fn roll_forward(
        &self,
        parent_id: &str,
        rollover: Rollover,
        now: DateTime<Utc>,
    ) -> Option<Event> {
        let mut events = self.events.write().await;

        let parent = events.get_mut(parent_id).filter(|event| !event.is_deleted)?;
        parent.dates = rollover.instance.dates.clone();
        parent.times = rollover.instance.times.clone();
        parent.next_occurrence_date = Some(rollover.next_occurrence_date);
        parent.updated_at = now;

        let instance = rollover.instance;
        events.insert(instance.id.clone(), instance.clone());
        Some(instance)
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Events created from the recurring event `parent_id`.
    #[cfg(test)]
    pub async fn instances_of(&self, parent_id: &str) -> Vec<Event> {
        let events = self.events.read().await;
        let mut instances: Vec<Event> = events
            .values()
            .filter(|event| event.parent_event_id.as_deref() == Some(parent_id))
            .cloned()
            .collect();
        instances.sort_by_key(|event| event.dates.first().copied());
        instances
    }
}
