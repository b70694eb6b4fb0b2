// store.rs — GoalStore: the session's single owner of the goal collection.
//
// All mutation goes through add/update/remove, which validate their input
// and emit a lifecycle event on success. Readers get slices or owned
// snapshots; nothing outside the store holds a mutable reference.
//
// Insertion order is kept (a Vec, not a map) because it is the default
// listing order. Lookups are linear, which is fine at personal-planner scale.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{GoalError, ValidationError};
use crate::events::{EventDispatcher, GoalEvent};
use crate::goal::{clamp_progress, Category, Goal, GoalDraft, GoalId, GoalPatch, Period};
use crate::hierarchy;

/// In-memory goal collection with validated mutations.
#[derive(Default)]
pub struct GoalStore {
    goals: Vec<Goal>,
    dispatcher: EventDispatcher,
}

impl GoalStore {
    /// Create an empty store with no notification sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from an existing snapshot (e.g. a restored backup).
    /// Rejects snapshots that repeat an id; out-of-range progress is clamped.
    pub fn from_goals(mut goals: Vec<Goal>) -> Result<Self, GoalError> {
        let mut seen = std::collections::HashSet::new();
        for goal in &mut goals {
            if !seen.insert(goal.id) {
                return Err(ValidationError::DuplicateId(goal.id).into());
            }
            let progress = clamp_progress(i64::from(goal.progress));
            if progress != goal.progress {
                tracing::warn!(goal_id = %goal.id, progress = goal.progress, "clamping restored progress");
                goal.progress = progress;
            }
        }
        Ok(Self {
            goals,
            dispatcher: EventDispatcher::new(),
        })
    }

    /// Attach the dispatcher that receives lifecycle events.
    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Validate a draft and append the new goal.
    ///
    /// The store assigns `id` and `created_at`. Progress defaults to 0 and
    /// status to not-started unless the draft overrides them.
    pub fn add(&mut self, draft: GoalDraft) -> Result<Goal, GoalError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let deadline = draft.deadline.ok_or(ValidationError::MissingDeadline)?;
        if let Some(parent_id) = draft.parent_goal_id {
            self.check_parent(None, parent_id, draft.period, draft.category)?;
        }

        let goal = Goal {
            id: self.fresh_id(),
            title: title.to_string(),
            category: draft.category,
            period: draft.period,
            progress: draft.progress.map(clamp_progress).unwrap_or(0),
            status: draft.status.unwrap_or_default(),
            deadline,
            notes: draft.notes,
            parent_goal_id: draft.parent_goal_id,
            created_at: Utc::now(),
        };

        tracing::debug!(goal_id = %goal.id, period = %goal.period, "goal added");
        self.goals.push(goal.clone());
        self.dispatcher.dispatch(&GoalEvent::goal_created(&goal));
        Ok(goal)
    }

    /// Merge `patch` into the goal with `id`.
    ///
    /// A parent link set by the patch is checked against the goal's
    /// post-merge period and category. Links that already exist are not
    /// re-checked when period or category change.
    pub fn update(&mut self, id: GoalId, patch: GoalPatch) -> Result<Goal, GoalError> {
        let index = self.index_of(id).ok_or(GoalError::NotFound(id))?;

        if let Some(Some(parent_id)) = patch.parent_goal_id {
            let current = &self.goals[index];
            let period = patch.period.unwrap_or(current.period);
            let category = patch.category.unwrap_or(current.category);
            self.check_parent(Some(id), parent_id, period, category)?;
        }

        let mut updated = self.goals[index].clone();
        patch.apply_to(&mut updated)?;
        self.goals[index] = updated.clone();

        tracing::debug!(goal_id = %id, progress = updated.progress, "goal updated");
        self.dispatcher.dispatch(&GoalEvent::goal_updated(&updated));
        Ok(updated)
    }

    /// Remove the goal with `id`. Children keep their parent link.
    pub fn remove(&mut self, id: GoalId) -> Result<Goal, GoalError> {
        let index = self.index_of(id).ok_or(GoalError::NotFound(id))?;
        let removed = self.goals.remove(index);

        let orphaned = hierarchy::children_of(&self.goals, id).len();
        if orphaned > 0 {
            tracing::debug!(goal_id = %id, orphaned, "removed goal leaves dangling child links");
        }
        self.dispatcher
            .dispatch(&GoalEvent::goal_removed(id, orphaned));
        Ok(removed)
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// All goals in insertion order.
    pub fn list(&self) -> &[Goal] {
        &self.goals
    }

    /// Owned copy of the collection, for computations that must not observe
    /// later mutations.
    pub fn snapshot(&self) -> Vec<Goal> {
        self.goals.clone()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Emit an event through the store's dispatcher.
    pub fn notify(&self, event: &GoalEvent) {
        self.dispatcher.dispatch(event);
    }

    fn index_of(&self, id: GoalId) -> Option<usize> {
        self.goals.iter().position(|g| g.id == id)
    }

    fn fresh_id(&self) -> GoalId {
        loop {
            let id = Uuid::new_v4();
            if self.index_of(id).is_none() {
                return id;
            }
        }
    }

    fn check_parent(
        &self,
        child: Option<GoalId>,
        parent_id: GoalId,
        period: Period,
        category: Category,
    ) -> Result<(), ValidationError> {
        if child == Some(parent_id) {
            return Err(ValidationError::SelfParent(parent_id));
        }
        if !hierarchy::is_eligible_parent(&self.goals, parent_id, period, category) {
            return Err(ValidationError::IneligibleParent {
                parent: parent_id,
                period: period.to_string(),
                category: category.to_string(),
            });
        }
        Ok(())
    }
}

/// Demonstration goals: a health chain (daily → weekly → yearly) and a
/// learning chain (weekly → quarterly), with deadlines relative to `today`.
pub fn sample_goals(today: NaiveDate) -> Vec<Goal> {
    let now = Utc::now();
    let make = |title: &str,
                category: Category,
                period: Period,
                progress: u8,
                days: i64,
                notes: &str,
                parent: Option<GoalId>| Goal {
        id: Uuid::new_v4(),
        title: title.to_string(),
        category,
        period,
        progress,
        status: crate::goal::GoalStatus::InProgress,
        deadline: today + Duration::days(days),
        notes: notes.to_string(),
        parent_goal_id: parent,
        created_at: now,
    };

    let fitness = make(
        "Get in best shape of my life",
        Category::Health,
        Period::Yearly,
        25,
        180,
        "Long-term fitness transformation",
        None,
    );
    let react = make(
        "Master React development",
        Category::Learning,
        Period::Quarterly,
        30,
        90,
        "Comprehensive React learning path",
        None,
    );
    let exercise = make(
        "Exercise 5 times this week",
        Category::Health,
        Period::Weekly,
        60,
        6,
        "Building consistency",
        Some(fitness.id),
    );
    let fundamentals = make(
        "Learn React fundamentals",
        Category::Learning,
        Period::Weekly,
        40,
        6,
        "Making good progress on components",
        Some(react.id),
    );
    let workout = make(
        "Complete morning workout",
        Category::Health,
        Period::Daily,
        75,
        0,
        "Been consistent this week",
        Some(exercise.id),
    );

    vec![workout, exercise, fundamentals, fitness, react]
}
