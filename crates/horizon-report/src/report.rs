// report.rs — Report: period-scoped analytics over a goal snapshot.
//
// Pipeline (deterministic for identical input):
//   1. scope the snapshot to one period
//   2. count by status, average progress, completion rate
//   3. per-category stats (empty categories dropped) and the top category
//   4. hierarchy insights; orphan detection looks for children across the
//      *full* snapshot, since children usually live on shorter periods
//   5. overdue / upcoming deadline alerts relative to `as_of`
//
// Deadlines are calendar dates, so all deadline arithmetic is in whole days.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use horizon_goal::hierarchy;
use horizon_goal::{Category, Goal, GoalStatus, Period};

/// A goal is "upcoming" when its deadline is at most this many days away.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Performance of one category within the report's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: Category,
    pub count: usize,
    pub completed: usize,
    pub average_progress: u8,
    pub goals: Vec<Goal>,
}

/// Link structure of the scoped goals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyInsights {
    /// Scoped goals without a parent link.
    pub parent_goals: Vec<Goal>,
    /// Scoped goals with a parent link (resolvable or not).
    pub child_goals: Vec<Goal>,
    /// Scoped goals with no parent link and no children anywhere.
    pub orphan_goals: Vec<Goal>,
}

/// Report over one period, as of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub period: Period,
    pub as_of: NaiveDate,
    pub total_goals: usize,
    pub completed_goals: usize,
    pub in_progress_goals: usize,
    pub not_started_goals: usize,
    pub paused_goals: usize,
    pub average_progress: u8,
    pub category_stats: Vec<CategoryStat>,
    pub hierarchy_insights: HierarchyInsights,
    pub overdue_goals: Vec<Goal>,
    pub upcoming_deadlines: Vec<Goal>,
    pub completion_rate: u8,
    pub top_performing_category: Option<CategoryStat>,
}

/// Advice derived from a report, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    TopCategory {
        category: Category,
        average_progress: u8,
    },
    LinkOrphans {
        count: usize,
    },
    FocusOverdue {
        count: usize,
    },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::TopCategory {
                category,
                average_progress,
            } => write!(
                f,
                "Top performing category: {} ({}% avg progress)",
                category.label(),
                average_progress
            ),
            Recommendation::LinkOrphans { count } => write!(
                f,
                "Consider linking {} standalone goals to longer-term objectives",
                count
            ),
            Recommendation::FocusOverdue { count } => write!(
                f,
                "Focus on completing {} overdue goals to maintain momentum",
                count
            ),
        }
    }
}

impl Report {
    /// Recommendations that apply to this report. Each rule is evaluated
    /// independently; rules that don't apply produce nothing.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        if let Some(top) = &self.top_performing_category {
            recs.push(Recommendation::TopCategory {
                category: top.category,
                average_progress: top.average_progress,
            });
        }
        let orphans = self.hierarchy_insights.orphan_goals.len();
        if orphans > 0 {
            recs.push(Recommendation::LinkOrphans { count: orphans });
        }
        if !self.overdue_goals.is_empty() {
            recs.push(Recommendation::FocusOverdue {
                count: self.overdue_goals.len(),
            });
        }
        recs
    }
}

/// Half-up rounding of `num / den` for non-negative integers; 0 when `den` is 0.
fn round_ratio(num: u64, den: u64) -> u8 {
    if den == 0 {
        return 0;
    }
    ((2 * num + den) / (2 * den)) as u8
}

fn average_progress(goals: &[&Goal]) -> u8 {
    let sum: u64 = goals.iter().map(|g| u64::from(g.progress)).sum();
    round_ratio(sum, goals.len() as u64)
}

fn owned<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Vec<Goal> {
    goals.into_iter().cloned().collect()
}

fn category_stats(scoped: &[&Goal]) -> Vec<CategoryStat> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let in_category: Vec<&Goal> = scoped
                .iter()
                .copied()
                .filter(|g| g.category == *category)
                .collect();
            if in_category.is_empty() {
                return None;
            }
            Some(CategoryStat {
                category: *category,
                count: in_category.len(),
                completed: in_category.iter().filter(|g| g.is_completed()).count(),
                average_progress: average_progress(&in_category),
                goals: owned(in_category),
            })
        })
        .collect()
}

// First maximum in enumeration order wins ties.
fn top_category(stats: &[CategoryStat]) -> Option<CategoryStat> {
    let mut best: Option<&CategoryStat> = None;
    for stat in stats {
        if best.map_or(true, |b| stat.average_progress > b.average_progress) {
            best = Some(stat);
        }
    }
    best.cloned()
}

fn hierarchy_insights(goals: &[Goal], scoped: &[&Goal]) -> HierarchyInsights {
    HierarchyInsights {
        parent_goals: owned(scoped.iter().copied().filter(|g| g.parent_goal_id.is_none())),
        child_goals: owned(scoped.iter().copied().filter(|g| g.parent_goal_id.is_some())),
        orphan_goals: owned(scoped.iter().copied().filter(|g| {
            g.parent_goal_id.is_none() && hierarchy::children_of(goals, g.id).is_empty()
        })),
    }
}

/// Build the report for `period` from `goals`, with deadlines judged
/// relative to `as_of`.
pub fn generate_report(goals: &[Goal], period: Period, as_of: NaiveDate) -> Report {
    let scoped = hierarchy::filter_by_period(goals, period);
    let count_status =
        |status: GoalStatus| scoped.iter().filter(|g| g.status == status).count();

    let total_goals = scoped.len();
    let completed_goals = count_status(GoalStatus::Completed);

    let category_stats = category_stats(&scoped);
    let top_performing_category = top_category(&category_stats);

    let open = || scoped.iter().copied().filter(|g| !g.is_completed());
    let overdue_goals = owned(open().filter(|g| g.days_until_deadline(as_of) < 0));
    let upcoming_deadlines = owned(open().filter(|g| {
        (0..=UPCOMING_WINDOW_DAYS).contains(&g.days_until_deadline(as_of))
    }));

    let report = Report {
        period,
        as_of,
        total_goals,
        completed_goals,
        in_progress_goals: count_status(GoalStatus::InProgress),
        not_started_goals: count_status(GoalStatus::NotStarted),
        paused_goals: count_status(GoalStatus::Paused),
        average_progress: average_progress(&scoped),
        hierarchy_insights: hierarchy_insights(goals, &scoped),
        overdue_goals,
        upcoming_deadlines,
        completion_rate: round_ratio(100 * completed_goals as u64, total_goals as u64),
        category_stats,
        top_performing_category,
    };

    tracing::debug!(
        period = %period,
        total = report.total_goals,
        overdue = report.overdue_goals.len(),
        "report generated"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use horizon_goal::GoalId;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn goal(
        category: Category,
        period: Period,
        progress: u8,
        status: GoalStatus,
        days_out: i64,
    ) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            title: format!("{} {} goal", category, period),
            category,
            period,
            progress,
            status,
            deadline: today() + Duration::days(days_out),
            notes: String::new(),
            parent_goal_id: None,
            created_at: Utc::now(),
        }
    }

    fn linked(mut child: Goal, parent: GoalId) -> Goal {
        child.parent_goal_id = Some(parent);
        child
    }

    #[test]
    fn empty_scope_yields_zeroes() {
        let report = generate_report(&[], Period::Monthly, today());
        assert_eq!(report.total_goals, 0);
        assert_eq!(report.average_progress, 0);
        assert_eq!(report.completion_rate, 0);
        assert!(report.category_stats.is_empty());
        assert!(report.top_performing_category.is_none());
        assert!(report.recommendations().is_empty());
    }

    #[test]
    fn weekly_scenario() {
        let health = goal(Category::Health, Period::Weekly, 60, GoalStatus::InProgress, 3);
        let learning = goal(Category::Learning, Period::Weekly, 100, GoalStatus::Completed, -1);
        let goals = vec![health.clone(), learning];

        let report = generate_report(&goals, Period::Weekly, today());
        assert_eq!(report.total_goals, 2);
        assert_eq!(report.completed_goals, 1);
        assert_eq!(report.in_progress_goals, 1);
        assert_eq!(report.completion_rate, 50);
        assert_eq!(report.average_progress, 80);
        assert!(report.overdue_goals.is_empty());
        assert_eq!(report.upcoming_deadlines, vec![health]);
    }

    #[test]
    fn scope_ignores_other_periods() {
        let goals = vec![
            goal(Category::Health, Period::Daily, 10, GoalStatus::InProgress, 1),
            goal(Category::Health, Period::Yearly, 90, GoalStatus::InProgress, 100),
        ];
        let report = generate_report(&goals, Period::Daily, today());
        assert_eq!(report.total_goals, 1);
        assert_eq!(report.average_progress, 10);
    }

    #[test]
    fn averages_round_half_up() {
        let goals = vec![
            goal(Category::Personal, Period::Monthly, 50, GoalStatus::InProgress, 20),
            goal(Category::Personal, Period::Monthly, 51, GoalStatus::InProgress, 20),
        ];
        let report = generate_report(&goals, Period::Monthly, today());
        // 50.5 rounds up
        assert_eq!(report.average_progress, 51);

        let thirds = vec![
            goal(Category::Personal, Period::Monthly, 0, GoalStatus::Completed, 20),
            goal(Category::Personal, Period::Monthly, 0, GoalStatus::NotStarted, 20),
            goal(Category::Personal, Period::Monthly, 0, GoalStatus::Paused, 20),
        ];
        let report = generate_report(&thirds, Period::Monthly, today());
        assert_eq!(report.completion_rate, 33);
        assert_eq!(report.not_started_goals, 1);
        assert_eq!(report.paused_goals, 1);
    }

    #[test]
    fn category_stats_skip_empty_categories_in_enum_order() {
        let goals = vec![
            goal(Category::Learning, Period::Weekly, 40, GoalStatus::InProgress, 5),
            goal(Category::Personal, Period::Weekly, 20, GoalStatus::InProgress, 5),
            goal(Category::Learning, Period::Weekly, 100, GoalStatus::Completed, 5),
        ];
        let report = generate_report(&goals, Period::Weekly, today());
        let cats: Vec<Category> = report.category_stats.iter().map(|s| s.category).collect();
        assert_eq!(cats, vec![Category::Personal, Category::Learning]);

        let learning = &report.category_stats[1];
        assert_eq!(learning.count, 2);
        assert_eq!(learning.completed, 1);
        assert_eq!(learning.average_progress, 70);
        assert_eq!(learning.goals.len(), 2);
    }

    #[test]
    fn top_category_ties_go_to_first_in_enum_order() {
        let goals = vec![
            goal(Category::Learning, Period::Weekly, 60, GoalStatus::InProgress, 5),
            goal(Category::Professional, Period::Weekly, 60, GoalStatus::InProgress, 5),
            goal(Category::Health, Period::Weekly, 30, GoalStatus::InProgress, 5),
        ];
        let report = generate_report(&goals, Period::Weekly, today());
        let top = report.top_performing_category.unwrap();
        assert_eq!(top.category, Category::Professional);
    }

    #[test]
    fn orphans_consider_children_on_other_periods() {
        let weekly = goal(Category::Health, Period::Weekly, 0, GoalStatus::InProgress, 5);
        let lonely = goal(Category::Learning, Period::Weekly, 0, GoalStatus::InProgress, 5);
        let daily = linked(
            goal(Category::Health, Period::Daily, 0, GoalStatus::InProgress, 1),
            weekly.id,
        );
        let yearly = goal(Category::Learning, Period::Yearly, 0, GoalStatus::InProgress, 200);
        let attached = linked(
            goal(Category::Learning, Period::Weekly, 0, GoalStatus::InProgress, 5),
            yearly.id,
        );
        let goals = vec![weekly.clone(), lonely.clone(), daily, yearly, attached.clone()];

        let report = generate_report(&goals, Period::Weekly, today());
        let insights = &report.hierarchy_insights;
        assert_eq!(insights.parent_goals, vec![weekly, lonely.clone()]);
        assert_eq!(insights.child_goals, vec![attached]);
        assert_eq!(insights.orphan_goals, vec![lonely]);
    }

    #[test]
    fn dangling_link_is_still_a_child_goal() {
        let child = linked(
            goal(Category::Health, Period::Daily, 0, GoalStatus::InProgress, 1),
            Uuid::new_v4(),
        );
        let report = generate_report(&[child], Period::Daily, today());
        assert_eq!(report.hierarchy_insights.child_goals.len(), 1);
        assert!(report.hierarchy_insights.orphan_goals.is_empty());
    }

    #[test]
    fn deadline_boundaries() {
        let seven = goal(Category::Health, Period::Monthly, 0, GoalStatus::InProgress, 7);
        let eight = goal(Category::Health, Period::Monthly, 0, GoalStatus::InProgress, 8);
        let today_due = goal(Category::Health, Period::Monthly, 0, GoalStatus::NotStarted, 0);
        let yesterday = goal(Category::Health, Period::Monthly, 0, GoalStatus::Paused, -1);
        let done_late = goal(Category::Health, Period::Monthly, 100, GoalStatus::Completed, -3);
        let goals = vec![
            seven.clone(),
            eight,
            today_due.clone(),
            yesterday.clone(),
            done_late,
        ];

        let report = generate_report(&goals, Period::Monthly, today());
        assert_eq!(report.upcoming_deadlines, vec![seven, today_due]);
        assert_eq!(report.overdue_goals, vec![yesterday]);
    }

    #[test]
    fn generation_is_pure() {
        let goals = vec![
            goal(Category::Health, Period::Weekly, 60, GoalStatus::InProgress, 3),
            goal(Category::Learning, Period::Weekly, 20, GoalStatus::NotStarted, -2),
        ];
        let a = generate_report(&goals, Period::Weekly, today());
        let b = generate_report(&goals, Period::Weekly, today());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn recommendations_follow_fixed_order() {
        let goals = vec![
            goal(Category::Health, Period::Weekly, 60, GoalStatus::InProgress, -2),
            goal(Category::Learning, Period::Weekly, 20, GoalStatus::NotStarted, 3),
        ];
        let report = generate_report(&goals, Period::Weekly, today());
        let recs = report.recommendations();
        assert_eq!(
            recs,
            vec![
                Recommendation::TopCategory {
                    category: Category::Health,
                    average_progress: 60,
                },
                Recommendation::LinkOrphans { count: 2 },
                Recommendation::FocusOverdue { count: 1 },
            ]
        );
        assert_eq!(
            recs[1].to_string(),
            "Consider linking 2 standalone goals to longer-term objectives"
        );
    }
}
