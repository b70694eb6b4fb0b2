// stats.rs — QuickStats: headline numbers across every period.

use serde::{Deserialize, Serialize};

use horizon_goal::hierarchy;
use horizon_goal::{Goal, GoalStatus, Period};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub in_progress_goals: usize,
    /// Goal count per period, shortest horizon first.
    pub per_period: Vec<(Period, usize)>,
}

impl QuickStats {
    pub fn from_goals(goals: &[Goal]) -> Self {
        let count = |status: GoalStatus| goals.iter().filter(|g| g.status == status).count();
        Self {
            total_goals: goals.len(),
            completed_goals: count(GoalStatus::Completed),
            in_progress_goals: count(GoalStatus::InProgress),
            per_period: hierarchy::period_counts(goals),
        }
    }
}
