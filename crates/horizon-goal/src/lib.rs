//! # horizon-goal
//!
//! Goal model, store, and hierarchy resolution for goals planned across five
//! nested time horizons (daily → weekly → monthly → quarterly → yearly).
//!
//! A [`Goal`] belongs to one [`Period`] and may link to a parent goal on a
//! strictly longer horizon in the same [`Category`]. The [`GoalStore`] owns
//! the session's goal collection and validates every mutation; the
//! [`hierarchy`] module answers read-only parent/child queries over a
//! snapshot.
//!
//! ## Key components
//!
//! - [`Goal`] — the goal record, plus [`GoalDraft`] / [`GoalPatch`] inputs
//! - [`GoalStore`] — in-memory owner of the collection (add/update/remove/list)
//! - [`hierarchy`] — period filtering, eligible parents, children, parent lookup
//! - [`GoalEvent`] / [`EventDispatcher`] — lifecycle events to notification sinks
//! - [`BackupSink`] — full-snapshot export for round-trip restore
//! - [`CalendarSink`] — per-goal calendar sync trigger point

pub mod backup;
pub mod calendar;
pub mod error;
pub mod events;
pub mod goal;
pub mod hierarchy;
pub mod store;

pub use backup::{BackupDocument, BackupSink, JsonFileBackup};
pub use calendar::{request_calendar_sync, CalendarEntry, CalendarSink, IcsCalendarSink};
pub use error::{GoalError, ValidationError};
pub use events::{EventDispatcher, GoalEvent, LogSink, NotificationSink};
pub use goal::{
    clamp_progress, coerce_progress, parse_deadline, Category, Goal, GoalDraft, GoalId,
    GoalPatch, GoalStatus, Period,
};
pub use store::{sample_goals, GoalStore};
