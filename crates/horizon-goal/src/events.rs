// events.rs — Goal lifecycle events and notification dispatch.
//
// The store emits an event after every successful mutation. Sinks (a JSONL
// log, a webhook, a sync bridge) subscribe through `NotificationSink`.
// Dispatch is synchronous and fire-and-forget: a failing sink is logged and
// skipped, and never rolls back the mutation that produced the event.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::{Goal, GoalId, Period};

/// Events emitted at goal lifecycle points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GoalEvent {
    /// A goal was added to the store.
    GoalCreated {
        goal_id: GoalId,
        title: String,
        period: Period,
        timestamp: DateTime<Utc>,
    },

    /// A goal was partially updated.
    GoalUpdated {
        goal_id: GoalId,
        progress: u8,
        status: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was removed. Children keep their (now dangling) links.
    GoalRemoved {
        goal_id: GoalId,
        orphaned_children: usize,
        timestamp: DateTime<Utc>,
    },

    /// A calendar sync was requested for a goal.
    CalendarSyncRequested {
        goal_id: GoalId,
        title: String,
        deadline: NaiveDate,
        succeeded: bool,
        timestamp: DateTime<Utc>,
    },
}

impl GoalEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            GoalEvent::GoalCreated { .. } => "goal_created",
            GoalEvent::GoalUpdated { .. } => "goal_updated",
            GoalEvent::GoalRemoved { .. } => "goal_removed",
            GoalEvent::CalendarSyncRequested { .. } => "calendar_sync_requested",
        }
    }

    pub fn goal_created(goal: &Goal) -> Self {
        GoalEvent::GoalCreated {
            goal_id: goal.id,
            title: goal.title.clone(),
            period: goal.period,
            timestamp: Utc::now(),
        }
    }

    pub fn goal_updated(goal: &Goal) -> Self {
        GoalEvent::GoalUpdated {
            goal_id: goal.id,
            progress: goal.progress,
            status: goal.status.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_removed(goal_id: GoalId, orphaned_children: usize) -> Self {
        GoalEvent::GoalRemoved {
            goal_id,
            orphaned_children,
            timestamp: Utc::now(),
        }
    }

    pub fn calendar_sync_requested(goal: &Goal, succeeded: bool) -> Self {
        GoalEvent::CalendarSyncRequested {
            goal_id: goal.id,
            title: goal.title.clone(),
            deadline: goal.deadline,
            succeeded,
            timestamp: Utc::now(),
        }
    }
}

/// Receives goal events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the system.
    fn send(&self, event: &GoalEvent) -> Result<(), GoalError>;
}

/// Appends events as JSONL to a file.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &GoalEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn dispatch(&self, event: &GoalEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!(event = event.event_type(), "notification sink error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{Category, GoalStatus};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use uuid::Uuid;

    fn sample_goal(title: &str) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category: Category::Learning,
            period: Period::Weekly,
            progress: 0,
            status: GoalStatus::NotStarted,
            deadline: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            notes: String::new(),
            parent_goal_id: None,
            created_at: Utc::now(),
        }
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn send(&self, _event: &GoalEvent) -> Result<(), GoalError> {
            Err(GoalError::NotificationError("offline".to_string()))
        }
    }

    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl NotificationSink for RecordingSink {
        fn send(&self, event: &GoalEvent) -> Result<(), GoalError> {
            self.0.lock().unwrap().push(event.event_type().to_string());
            Ok(())
        }
    }

    #[test]
    fn event_serialization_round_trip() {
        let event = GoalEvent::goal_created(&sample_goal("Read a book"));
        let json = serde_json::to_string(&event).unwrap();
        let restored: GoalEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type(), restored.event_type());
        assert!(json.contains("\"goal_created\""));
        assert!(json.contains("\"weekly\""));
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let sink = LogSink::new(&path);

        sink.send(&GoalEvent::goal_created(&sample_goal("Goal 1"))).unwrap();
        sink.send(&GoalEvent::goal_removed(Uuid::new_v4(), 2)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"orphaned_children\":2"));
    }

    #[test]
    fn failing_sink_does_not_block_others() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(FailingSink));
        dispatcher.add_sink(Box::new(RecordingSink(seen.clone())));
        assert_eq!(dispatcher.sink_count(), 2);

        dispatcher.dispatch(&GoalEvent::goal_updated(&sample_goal("x")));

        assert_eq!(*seen.lock().unwrap(), vec!["goal_updated".to_string()]);
    }

    #[test]
    fn event_type_names() {
        let goal = sample_goal("x");
        assert_eq!(GoalEvent::goal_created(&goal).event_type(), "goal_created");
        assert_eq!(GoalEvent::goal_updated(&goal).event_type(), "goal_updated");
        assert_eq!(
            GoalEvent::goal_removed(goal.id, 0).event_type(),
            "goal_removed"
        );
        assert_eq!(
            GoalEvent::calendar_sync_requested(&goal, true).event_type(),
            "calendar_sync_requested"
        );
    }
}
