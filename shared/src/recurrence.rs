//! Date arithmetic for recurring events.
//!
//! A recurring event is a template: once its `next_occurrence_date` passes, a
//! copy shifted forward by one recurrence period is created and the template's
//! next creation date moves along with it.

use chrono::{DateTime, Duration, Months, Utc};
use thiserror::Error;

use crate::models::{Event, RecurrenceUnit};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("invalid recurrence configuration")]
    InvalidConfiguration,

    #[error("event has no dates to repeat")]
    NoDates,

    #[error("date out of range")]
    OutOfRange,
}

/// Result of rolling a recurring event forward once
#[derive(Debug, Clone, PartialEq)]
pub struct Rollover {
    /// Newly created instance of the event
    pub instance: Event,
    /// When the parent should produce its following instance
    pub next_occurrence_date: DateTime<Utc>,
}

/// Advance `base` by `interval` units.
///
/// Month steps clamp to the last day of the target month, so Jan 31 + 1 month
/// lands on Feb 28 (or 29).
pub fn next_date(
    base: DateTime<Utc>,
    interval: i32,
    unit: RecurrenceUnit,
) -> Result<DateTime<Utc>, RecurrenceError> {
    let next = match unit {
        RecurrenceUnit::Days => Duration::try_days(i64::from(interval))
            .and_then(|step| base.checked_add_signed(step)),
        RecurrenceUnit::Weeks => Duration::try_weeks(i64::from(interval))
            .and_then(|step| base.checked_add_signed(step)),
        RecurrenceUnit::Months => {
            let months = Months::new(interval.unsigned_abs());
            if interval >= 0 {
                base.checked_add_months(months)
            } else {
                base.checked_sub_months(months)
            }
        }
    };

    next.ok_or(RecurrenceError::OutOfRange)
}

impl Event {
    /// Whether the scheduler should create the next instance of this event.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_recurring
            && self.recurrence_enabled
            && !self.is_deleted
            && self.next_occurrence_date.is_some_and(|date| date <= now)
    }

    fn recurrence(&self) -> Result<(i32, RecurrenceUnit), RecurrenceError> {
        match (self.recurrence_interval, self.recurrence_unit) {
            (Some(interval), Some(unit)) if interval > 0 => Ok((interval, unit)),
            _ => Err(RecurrenceError::InvalidConfiguration),
        }
    }

    /// When the instance following this event's current dates should be created.
    pub fn next_creation_date(&self) -> Result<DateTime<Utc>, RecurrenceError> {
        let (interval, unit) = self.recurrence()?;
        creation_date(&self.dates, interval, unit, self.recurrence_advance_days)
    }
}

/// One period after the latest of `dates`, pulled earlier by `advance_days`.
fn creation_date(
    dates: &[DateTime<Utc>],
    interval: i32,
    unit: RecurrenceUnit,
    advance_days: Option<i32>,
) -> Result<DateTime<Utc>, RecurrenceError> {
    let latest = dates.iter().max().copied().ok_or(RecurrenceError::NoDates)?;
    let advance = Duration::try_days(i64::from(advance_days.unwrap_or(0)))
        .ok_or(RecurrenceError::OutOfRange)?;

    next_date(latest, interval, unit)?
        .checked_sub_signed(advance)
        .ok_or(RecurrenceError::OutOfRange)
}

/// Build the next instance of `parent`, identified by `new_id`.
pub fn next_instance(
    parent: &Event,
    new_id: impl Into<String>,
    now: DateTime<Utc>,
) -> Result<Rollover, RecurrenceError> {
    let (interval, unit) = parent.recurrence()?;

    let dates = parent
        .dates
        .iter()
        .map(|date| next_date(*date, interval, unit))
        .collect::<Result<Vec<_>, _>>()?;
    let times = parent
        .times
        .iter()
        .map(|time| next_date(*time, interval, unit))
        .collect::<Result<Vec<_>, _>>()?;

    let next_occurrence_date =
        creation_date(&dates, interval, unit, parent.recurrence_advance_days)?;

    let instance = Event {
        id: new_id.into(),
        owner_id: parent.owner_id.clone(),
        name: parent.name.clone(),
        description: parent.description.clone(),
        location: parent.location.clone(),
        duration: parent.duration,
        dates,
        has_specific_times: parent.has_specific_times,
        times,
        days_only: parent.days_only,
        is_archived: false,
        is_deleted: false,
        scheduled_event: None,
        num_responses: 0,
        parent_event_id: Some(parent.id.clone()),
        is_recurring: false,
        recurrence_enabled: false,
        recurrence_interval: None,
        recurrence_unit: None,
        recurrence_advance_days: None,
        next_occurrence_date: None,
        created_at: now,
        updated_at: now,
    };

    Ok(Rollover {
        instance,
        next_occurrence_date,
    })
}
