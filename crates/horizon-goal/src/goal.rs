// goal.rs — Goal: one objective on one time horizon.
//
// A goal lives on exactly one Period and may point at a parent goal on a
// strictly longer horizon in the same Category:
//   daily → weekly → monthly → quarterly → yearly
//
// Enum values serialize with their wire names ("in-progress", "quarterly")
// and parse back through FromStr, so unknown values surface as
// ValidationError instead of being silently accepted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Identifier assigned to a goal by the store.
pub type GoalId = Uuid;

/// Life area a goal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Professional,
    Health,
    Learning,
}

impl Category {
    /// All categories in enumeration order. Report tie-breaks follow this order.
    pub const ALL: [Category; 4] = [
        Category::Personal,
        Category::Professional,
        Category::Health,
        Category::Learning,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Professional => "Professional",
            Category::Health => "Health",
            Category::Learning => "Learning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Personal => write!(f, "personal"),
            Category::Professional => write!(f, "professional"),
            Category::Health => write!(f, "health"),
            Category::Learning => write!(f, "learning"),
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Category::Personal),
            "professional" => Ok(Category::Professional),
            "health" => Ok(Category::Health),
            "learning" => Ok(Category::Learning),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

/// Time horizon of a goal.
///
/// Variants are declared shortest first, so the derived `Ord` is the
/// horizon ordering: `Daily < Weekly < Monthly < Quarterly < Yearly`.
/// Hierarchy eligibility depends entirely on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Period {
    /// All periods, shortest horizon first.
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Quarterly,
        Period::Yearly,
    ];

    /// Position in the horizon ordering (daily = 0).
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// True when `self` is a strictly longer horizon than `other`.
    pub fn is_longer_than(&self, other: Period) -> bool {
        *self > other
    }

    /// Periods strictly longer than this one, in ascending order.
    pub fn longer_periods(&self) -> &'static [Period] {
        static ORDER: [Period; 5] = Period::ALL;
        &ORDER[self.rank() + 1..]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Quarterly => "Quarterly",
            Period::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Daily => write!(f, "daily"),
            Period::Weekly => write!(f, "weekly"),
            Period::Monthly => write!(f, "monthly"),
            Period::Quarterly => write!(f, "quarterly"),
            Period::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "quarterly" => Ok(Period::Quarterly),
            "yearly" => Ok(Period::Yearly),
            _ => Err(ValidationError::UnknownPeriod(s.to_string())),
        }
    }
}

/// Work status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

impl GoalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "Not Started",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::Paused => "Paused",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::NotStarted => write!(f, "not-started"),
            GoalStatus::InProgress => write!(f, "in-progress"),
            GoalStatus::Completed => write!(f, "completed"),
            GoalStatus::Paused => write!(f, "paused"),
        }
    }
}

impl FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "not-started" => Ok(GoalStatus::NotStarted),
            "in-progress" => Ok(GoalStatus::InProgress),
            "completed" => Ok(GoalStatus::Completed),
            "paused" => Ok(GoalStatus::Paused),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// Clamp a raw progress value into [0, 100].
pub fn clamp_progress(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Coerce free-form progress input. Non-numeric input becomes 0.
pub fn coerce_progress(raw: &str) -> u8 {
    raw.trim().parse::<i64>().map(clamp_progress).unwrap_or(0)
}

/// Parse a `YYYY-MM-DD` deadline.
pub fn parse_deadline(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate(raw.to_string()))
}

/// A goal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier, immutable once assigned.
    pub id: GoalId,

    pub title: String,

    pub category: Category,

    pub period: Period,

    /// Always within [0, 100].
    pub progress: u8,

    pub status: GoalStatus,

    pub deadline: NaiveDate,

    #[serde(default)]
    pub notes: String,

    /// Parent goal on a longer horizon. May dangle after the parent is removed.
    #[serde(default)]
    pub parent_goal_id: Option<GoalId>,

    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// Whole days from `as_of` until the deadline (negative once past due).
    pub fn days_until_deadline(&self, as_of: NaiveDate) -> i64 {
        (self.deadline - as_of).num_days()
    }
}

/// Input for creating a goal.
///
/// `deadline` is optional here only so that a missing value can be reported
/// as `ValidationError::MissingDeadline` instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    pub category: Category,
    pub period: Period,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub parent_goal_id: Option<GoalId>,
    /// Overrides the default progress of 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    /// Overrides the default status of not-started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
}

impl GoalDraft {
    pub fn new(
        title: impl Into<String>,
        category: Category,
        period: Period,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            period,
            deadline: Some(deadline),
            notes: String::new(),
            parent_goal_id: None,
            progress: None,
            status: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn parent(mut self, parent_goal_id: GoalId) -> Self {
        self.parent_goal_id = Some(parent_goal_id);
        self
    }

    pub fn progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn status(mut self, status: GoalStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Partial update for an existing goal. `None` leaves a field untouched.
///
/// `parent_goal_id` is doubly optional: `Some(None)` clears the link,
/// `Some(Some(id))` sets it.
#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub period: Option<Period>,
    pub progress: Option<i64>,
    pub status: Option<GoalStatus>,
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
    pub parent_goal_id: Option<Option<GoalId>>,
}

impl GoalPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.period.is_none()
            && self.progress.is_none()
            && self.status.is_none()
            && self.deadline.is_none()
            && self.notes.is_none()
            && self.parent_goal_id.is_none()
    }

    /// Merge the patch into `goal`. Field typing is checked; hierarchy links
    /// are checked by the store before this is called.
    pub(crate) fn apply_to(self, goal: &mut Goal) -> Result<(), ValidationError> {
        if let Some(title) = self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
            goal.title = title.to_string();
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(period) = self.period {
            goal.period = period;
        }
        if let Some(progress) = self.progress {
            goal.progress = clamp_progress(progress);
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        if let Some(deadline) = self.deadline {
            goal.deadline = deadline;
        }
        if let Some(notes) = self.notes {
            goal.notes = notes;
        }
        if let Some(parent) = self.parent_goal_id {
            goal.parent_goal_id = parent;
        }
        Ok(())
    }
}
