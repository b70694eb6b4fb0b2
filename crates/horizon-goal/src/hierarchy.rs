// hierarchy.rs — Read-only parent/child queries over a goal snapshot.
//
// Links only ever point from a shorter horizon to a strictly longer one in
// the same category. The ordering comes from `Period`'s derived `Ord`.
//
// A parent link may dangle once its target has been removed; lookups treat
// that as "no parent" rather than an error.

use std::collections::HashSet;

use crate::goal::{Category, Goal, GoalId, Period};

/// Goals on exactly `period`, in snapshot order.
pub fn filter_by_period(goals: &[Goal], period: Period) -> Vec<&Goal> {
    goals.iter().filter(|g| g.period == period).collect()
}

/// Goals that a `period` goal in `category` may link to as its parent.
///
/// Only strictly longer horizons qualify; equal periods never do, so a goal
/// can never appear as its own candidate.
pub fn eligible_parents(goals: &[Goal], period: Period, category: Category) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| g.category == category && g.period.is_longer_than(period))
        .collect()
}

/// Candidate parents for an existing goal, excluding the goal itself.
pub fn eligible_parents_for<'a>(goals: &'a [Goal], goal: &Goal) -> Vec<&'a Goal> {
    eligible_parents(goals, goal.period, goal.category)
        .into_iter()
        .filter(|g| g.id != goal.id)
        .collect()
}

/// Whether `parent_id` is a valid parent for a goal on `period` in `category`.
pub fn is_eligible_parent(
    goals: &[Goal],
    parent_id: GoalId,
    period: Period,
    category: Category,
) -> bool {
    eligible_parents(goals, period, category)
        .iter()
        .any(|g| g.id == parent_id)
}

/// Goals whose parent link points at `parent_id`.
pub fn children_of(goals: &[Goal], parent_id: GoalId) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| g.parent_goal_id == Some(parent_id))
        .collect()
}

/// The parent of `child_id`, if the child exists and its link resolves.
pub fn parent_of(goals: &[Goal], child_id: GoalId) -> Option<&Goal> {
    let child = goals.iter().find(|g| g.id == child_id)?;
    let parent_id = child.parent_goal_id?;
    goals.iter().find(|g| g.id == parent_id)
}

/// Goals whose parent link resolves to nothing.
pub fn dangling_links(goals: &[Goal]) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| {
            g.parent_goal_id
                .is_some_and(|pid| !goals.iter().any(|other| other.id == pid))
        })
        .collect()
}

/// Parent chain of `id`, nearest parent first.
///
/// Stops at a goal without a parent, at a dangling link, or when an id
/// repeats (a cycle can only appear through hand-edited snapshots).
pub fn ancestry(goals: &[Goal], id: GoalId) -> Vec<&Goal> {
    let mut chain = Vec::new();
    let mut seen = HashSet::from([id]);
    let mut current = id;
    while let Some(parent) = parent_of(goals, current) {
        if !seen.insert(parent.id) {
            break;
        }
        chain.push(parent);
        current = parent.id;
    }
    chain
}

/// Number of goals on each period, shortest horizon first.
pub fn period_counts(goals: &[Goal]) -> Vec<(Period, usize)> {
    Period::ALL
        .iter()
        .map(|p| (*p, goals.iter().filter(|g| g.period == *p).count()))
        .collect()
}
