// calendar.rs — Per-goal calendar sync trigger point.
//
// A calendar sink receives a goal's title and deadline. The outcome is
// logged and reported as an event, but never written back into the goal.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Utc};

use crate::error::GoalError;
use crate::events::GoalEvent;
use crate::goal::{Goal, GoalId};
use crate::store::GoalStore;

/// What a calendar sink receives for one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub uid: GoalId,
    pub title: String,
    pub deadline: NaiveDate,
}

impl From<&Goal> for CalendarEntry {
    fn from(goal: &Goal) -> Self {
        Self {
            uid: goal.id,
            title: goal.title.clone(),
            deadline: goal.deadline,
        }
    }
}

/// External calendar integration.
pub trait CalendarSink {
    fn sync(&self, entry: &CalendarEntry) -> Result<(), GoalError>;

    /// Sink name (for logging).
    fn name(&self) -> &str;
}

/// Writes one all-day iCalendar event per goal into a directory.
pub struct IcsCalendarSink {
    dir: PathBuf,
}

impl IcsCalendarSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the `.ics` file for a goal.
    pub fn entry_path(&self, uid: GoalId) -> PathBuf {
        self.dir.join(format!("{}.ics", uid))
    }

    fn render(entry: &CalendarEntry) -> String {
        let end = entry.deadline + Duration::days(1);
        [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//horizon//goal planner//EN".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}@horizon", entry.uid),
            format!("DTSTAMP:{}", Utc::now().format("%Y%m%dT%H%M%SZ")),
            format!("DTSTART;VALUE=DATE:{}", entry.deadline.format("%Y%m%d")),
            format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")),
            format!("SUMMARY:{}", escape_text(&entry.title)),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ]
        .join("\r\n")
            + "\r\n"
    }
}

impl CalendarSink for IcsCalendarSink {
    fn sync(&self, entry: &CalendarEntry) -> Result<(), GoalError> {
        fs::create_dir_all(&self.dir).map_err(|source| GoalError::IoError {
            path: self.dir.display().to_string(),
            source,
        })?;
        let path = self.entry_path(entry.uid);
        fs::write(&path, Self::render(entry)).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })
    }

    fn name(&self) -> &str {
        "ics"
    }
}

// RFC 5545 TEXT escaping.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

/// Hand goal `id` to `sink`.
///
/// Returns whether the sink accepted it. Only an unknown id is an error;
/// sink failures are logged and reported through the store's event
/// dispatcher.
pub fn request_calendar_sync(
    store: &GoalStore,
    id: GoalId,
    sink: &dyn CalendarSink,
) -> Result<bool, GoalError> {
    let goal = store.get(id).ok_or(GoalError::NotFound(id))?;
    let entry = CalendarEntry::from(goal);

    let succeeded = match sink.sync(&entry) {
        Ok(()) => {
            tracing::info!(goal_id = %id, sink = sink.name(), "calendar sync requested");
            true
        }
        Err(e) => {
            tracing::warn!(goal_id = %id, sink = sink.name(), "calendar sync failed: {}", e);
            false
        }
    };

    store.notify(&GoalEvent::calendar_sync_requested(goal, succeeded));
    Ok(succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{Category, GoalDraft, Period};
    use tempfile::tempdir;
    use uuid::Uuid;

    struct Unreachable;

    impl CalendarSink for Unreachable {
        fn sync(&self, _entry: &CalendarEntry) -> Result<(), GoalError> {
            Err(GoalError::NotificationError("calendar offline".to_string()))
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    fn store_with_goal(title: &str) -> (GoalStore, GoalId) {
        let mut store = GoalStore::new();
        let goal = store
            .add(GoalDraft::new(
                title,
                Category::Professional,
                Period::Monthly,
                NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            ))
            .unwrap();
        (store, goal.id)
    }

    #[test]
    fn ics_sink_writes_all_day_event() {
        let dir = tempdir().unwrap();
        let sink = IcsCalendarSink::new(dir.path().join("calendar"));
        let (store, id) = store_with_goal("Ship v2, finally; really");

        assert!(request_calendar_sync(&store, id, &sink).unwrap());

        let ics = fs::read_to_string(sink.entry_path(id)).unwrap();
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20261130"));
        assert!(ics.contains("DTEND;VALUE=DATE:20261201"));
        assert!(ics.contains("SUMMARY:Ship v2\\, finally\\; really"));
    }

    #[test]
    fn line_breaks_in_titles_are_escaped() {
        assert_eq!(escape_text("a\r\nb\rc\nd"), "a\\nb\\nc\\nd");

        let dir = tempdir().unwrap();
        let sink = IcsCalendarSink::new(dir.path());
        let (store, id) = store_with_goal("Plan\rDTEND;VALUE=DATE:19990101");
        assert!(request_calendar_sync(&store, id, &sink).unwrap());

        let ics = fs::read_to_string(sink.entry_path(id)).unwrap();
        assert!(ics.contains("SUMMARY:Plan\\nDTEND\\;VALUE=DATE:19990101\r\n"));
        assert!(ics.split("\r\n").all(|line| !line.contains('\r')));
    }

    #[test]
    fn sink_failure_is_reported_not_raised() {
        let (store, id) = store_with_goal("Quarterly review");
        let before = store.get(id).unwrap().clone();

        assert!(!request_calendar_sync(&store, id, &Unreachable).unwrap());
        assert_eq!(store.get(id).unwrap(), &before);
    }

    #[test]
    fn unknown_goal_is_not_found() {
        let (store, _) = store_with_goal("x");
        let result = request_calendar_sync(&store, Uuid::new_v4(), &Unreachable);
        assert!(matches!(result, Err(GoalError::NotFound(_))));
    }
}
