use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time;
use uuid::Uuid;

use crate::store::EventStore;
use shared::models::Event;
use shared::recurrence;

/// Creates the next instance of each recurring event once it falls due.
pub struct RecurringEventScheduler {
    store: EventStore,
    interval: Duration,
}

impl RecurringEventScheduler {
    pub fn new(store: EventStore, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Check immediately, then once per interval, forever.
    pub async fn run(&self) -> Result<()> {
        ensure!(
            !self.interval.is_zero(),
            "Recurring event check interval must be greater than zero"
        );

        let mut ticker = time::interval(self.interval);

        tracing::info!("Recurring event scheduler started (interval: {:?})", self.interval);

        loop {
            ticker.tick().await;
            tracing::debug!("Checking for recurring events to create");

            let created = self.check_and_create(Utc::now()).await;
            if created > 0 {
                tracing::info!(
                    "Created {} recurring event instance(s), {} events stored",
                    created,
                    self.store.len().await
                );
            }
        }
    }

    /// Roll every due event forward once. Returns how many instances were created.
    pub async fn check_and_create(&self, now: DateTime<Utc>) -> usize {
        let due = self.store.due_recurring(now).await;
        tracing::debug!("Found {} recurring events to process", due.len());

        let mut created = 0;
        for parent in &due {
            match self.create_next(parent, now).await {
                Ok(()) => created += 1,
                Err(e) => tracing::error!(
                    "Error creating recurring event for {}: {:?}",
                    parent.id,
                    e
                ),
            }
        }

        created
    }

    async fn create_next(&self, parent: &Event, now: DateTime<Utc>) -> Result<()> {
        let rollover = recurrence::next_instance(parent, Uuid::new_v4().to_string(), now)
            .context("Failed to build next occurrence")?;

        let instance = self
            .store
            .roll_forward(&parent.id, rollover, now)
            .await
            .with_context(|| format!("Parent event {} disappeared", parent.id))?;

        tracing::info!("Created event {} from parent {}", instance.id, parent.id);

        Ok(())
    }
}
