//! text.rs — Plain-text exporter with fixed sections.
//!
//! Layout:
//!
//! ```text
//! Goal Management Report - WEEKLY
//! Generated: 2026-10-19
//!
//! OVERVIEW
//! ========
//! Total Goals: 2
//! Completed: 1 (50%)
//! ...
//! CATEGORY BREAKDOWN / ALERTS / RECOMMENDATIONS
//! ```
//!
//! Only the count lines are meant to be machine-read; [`RenderedCounts`]
//! reads them back.

use horizon_goal::Goal;
use regex::Regex;

use crate::error::ReportError;
use crate::exporters::Exporter;
use crate::report::Report;

const OVERVIEW: &str = "OVERVIEW";
const CATEGORY_BREAKDOWN: &str = "CATEGORY BREAKDOWN";
const ALERTS: &str = "ALERTS";
const RECOMMENDATIONS: &str = "RECOMMENDATIONS";

#[derive(Default)]
pub struct TextExporter {}

impl TextExporter {
    pub fn new() -> Self {
        Self {}
    }

    fn heading(lines: &mut Vec<String>, title: &str) {
        lines.push(String::new());
        lines.push(title.to_string());
        lines.push("=".repeat(title.len()));
    }

    // Titles are escaped onto one line so they can't forge count lines.
    fn due_line(goal: &Goal) -> String {
        format!(
            "- {} (Due: {})",
            single_line(&goal.title),
            goal.deadline.format("%Y-%m-%d")
        )
    }
}

impl Exporter for TextExporter {
    fn render(&self, report: &Report) -> Result<String, ReportError> {
        let mut lines = vec![
            format!(
                "Goal Management Report - {}",
                report.period.to_string().to_uppercase()
            ),
            format!("Generated: {}", report.as_of.format("%Y-%m-%d")),
        ];

        Self::heading(&mut lines, OVERVIEW);
        lines.push(format!("Total Goals: {}", report.total_goals));
        lines.push(format!(
            "Completed: {} ({}%)",
            report.completed_goals, report.completion_rate
        ));
        lines.push(format!("In Progress: {}", report.in_progress_goals));
        lines.push(format!("Not Started: {}", report.not_started_goals));
        lines.push(format!("Paused: {}", report.paused_goals));
        lines.push(format!("Average Progress: {}%", report.average_progress));

        Self::heading(&mut lines, CATEGORY_BREAKDOWN);
        for stat in &report.category_stats {
            lines.push(format!("{}:", stat.category.label()));
            lines.push(format!("  - Goals: {}", stat.count));
            lines.push(format!("  - Completed: {}", stat.completed));
            lines.push(format!("  - Average Progress: {}%", stat.average_progress));
        }

        Self::heading(&mut lines, ALERTS);
        lines.push(format!("Overdue Goals: {}", report.overdue_goals.len()));
        lines.extend(report.overdue_goals.iter().map(Self::due_line));
        lines.push(String::new());
        lines.push(format!(
            "Upcoming Deadlines: {}",
            report.upcoming_deadlines.len()
        ));
        lines.extend(report.upcoming_deadlines.iter().map(Self::due_line));

        Self::heading(&mut lines, RECOMMENDATIONS);
        lines.extend(report.recommendations().iter().map(|r| r.to_string()));

        let mut document = lines.join("\n");
        document.push('\n');
        Ok(document)
    }

    fn name(&self) -> &str {
        "text"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

/// Count fields read back from a rendered text report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedCounts {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub completion_rate: u8,
    pub in_progress_goals: usize,
    pub not_started_goals: usize,
    pub paused_goals: usize,
    pub average_progress: u8,
    pub overdue_goals: usize,
    pub upcoming_deadlines: usize,
}

impl RenderedCounts {
    /// The counts a rendering of `report` should contain.
    pub fn from_report(report: &Report) -> Self {
        Self {
            total_goals: report.total_goals,
            completed_goals: report.completed_goals,
            completion_rate: report.completion_rate,
            in_progress_goals: report.in_progress_goals,
            not_started_goals: report.not_started_goals,
            paused_goals: report.paused_goals,
            average_progress: report.average_progress,
            overdue_goals: report.overdue_goals.len(),
            upcoming_deadlines: report.upcoming_deadlines.len(),
        }
    }

    /// Read the overview and alert counts out of a text document.
    ///
    /// Lines are matched only inside their own section, so the per-category
    /// "Completed" lines never shadow the overview total.
    pub fn parse(document: &str) -> Result<Self, ReportError> {
        let count_re =
            Regex::new(r"^(?P<key>[A-Za-z ]+): (?P<value>\d+)(?:%| \((?P<rate>\d+)%\))?$")?;

        let mut section = "";
        let mut fields: [Option<u64>; 9] = [None; 9];
        for line in document.lines() {
            let trimmed = line.trim_end();
            if [OVERVIEW, CATEGORY_BREAKDOWN, ALERTS, RECOMMENDATIONS].contains(&trimmed) {
                section = trimmed;
                continue;
            }
            let Some(caps) = count_re.captures(trimmed) else {
                continue;
            };
            let value = parse_number(&caps["value"])?;
            match (section, &caps["key"]) {
                (OVERVIEW, "Total Goals") => fields[0] = Some(value),
                (OVERVIEW, "Completed") => {
                    fields[1] = Some(value);
                    if let Some(rate) = caps.name("rate") {
                        fields[2] = Some(parse_number(rate.as_str())?);
                    }
                }
                (OVERVIEW, "In Progress") => fields[3] = Some(value),
                (OVERVIEW, "Not Started") => fields[4] = Some(value),
                (OVERVIEW, "Paused") => fields[5] = Some(value),
                (OVERVIEW, "Average Progress") => fields[6] = Some(value),
                (ALERTS, "Overdue Goals") => fields[7] = Some(value),
                (ALERTS, "Upcoming Deadlines") => fields[8] = Some(value),
                _ => {}
            }
        }

        const NAMES: [&str; 9] = [
            "Total Goals",
            "Completed",
            "Completion Rate",
            "In Progress",
            "Not Started",
            "Paused",
            "Average Progress",
            "Overdue Goals",
            "Upcoming Deadlines",
        ];
        let mut values = [0u64; 9];
        for (i, field) in fields.iter().enumerate() {
            values[i] = field.ok_or_else(|| ReportError::MissingField(NAMES[i].to_string()))?;
        }

        Ok(Self {
            total_goals: values[0] as usize,
            completed_goals: values[1] as usize,
            completion_rate: percent(values[2], NAMES[2])?,
            in_progress_goals: values[3] as usize,
            not_started_goals: values[4] as usize,
            paused_goals: values[5] as usize,
            average_progress: percent(values[6], NAMES[6])?,
            overdue_goals: values[7] as usize,
            upcoming_deadlines: values[8] as usize,
        })
    }
}

fn single_line(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_number(raw: &str) -> Result<u64, ReportError> {
    raw.parse()
        .map_err(|_| ReportError::InvalidData(format!("count out of range: {}", raw)))
}

fn percent(value: u64, name: &str) -> Result<u8, ReportError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| ReportError::InvalidData(format!("{} is not a percentage: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::generate_report;
    use chrono::{Duration, NaiveDate, Utc};
    use horizon_goal::{sample_goals, Category, GoalStatus, Period};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn weekly(title: &str, category: Category, progress: u8, status: GoalStatus, days: i64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category,
            period: Period::Weekly,
            progress,
            status,
            deadline: today() + Duration::days(days),
            notes: String::new(),
            parent_goal_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn renders_all_sections() {
        let goals = vec![
            weekly("Gym x3", Category::Health, 60, GoalStatus::InProgress, 3),
            weekly("Finish course", Category::Learning, 100, GoalStatus::Completed, -1),
            weekly("Call bank", Category::Personal, 0, GoalStatus::NotStarted, -2),
        ];
        let report = generate_report(&goals, Period::Weekly, today());
        let text = TextExporter::new().render(&report).unwrap();

        assert!(text.starts_with("Goal Management Report - WEEKLY\nGenerated: 2026-10-19\n"));
        assert!(text.contains("OVERVIEW\n========\nTotal Goals: 3\nCompleted: 1 (33%)\n"));
        assert!(text.contains("Health:\n  - Goals: 1\n  - Completed: 0\n  - Average Progress: 60%"));
        assert!(text.contains("Overdue Goals: 1\n- Call bank (Due: 2026-10-17)"));
        assert!(text.contains("Upcoming Deadlines: 1\n- Gym x3 (Due: 2026-10-22)"));
        assert!(text.contains("Top performing category: Learning (100% avg progress)"));
        assert!(text.contains("Consider linking 3 standalone goals"));
        assert!(text.contains("Focus on completing 1 overdue goals"));
    }

    #[test]
    fn empty_report_prints_no_placeholders() {
        let report = generate_report(&[], Period::Daily, today());
        let text = TextExporter::new().render(&report).unwrap();
        let recommendations = text.split("RECOMMENDATIONS\n===============\n").nth(1).unwrap();
        assert_eq!(recommendations, "");
        assert!(!text.contains("No data"));
        assert!(text.contains("CATEGORY BREAKDOWN\n==================\n\nALERTS"));
    }

    #[test]
    fn counts_survive_render_and_parse() {
        let goals = sample_goals(today());
        for period in Period::ALL {
            let report = generate_report(&goals, period, today());
            let text = TextExporter::new().render(&report).unwrap();
            let parsed = RenderedCounts::parse(&text).unwrap();
            assert_eq!(parsed, RenderedCounts::from_report(&report), "period {}", period);
        }
    }

    #[test]
    fn multiline_titles_cannot_forge_counts() {
        let goals = vec![
            weekly("Pay rent\nOverdue Goals: 9\nsoon", Category::Personal, 0, GoalStatus::NotStarted, -1),
            weekly("Book flights\r\nUpcoming Deadlines: 7", Category::Personal, 0, GoalStatus::NotStarted, 2),
        ];
        let report = generate_report(&goals, Period::Weekly, today());
        let text = TextExporter::new().render(&report).unwrap();

        assert!(text.contains("- Pay rent\\nOverdue Goals: 9\\nsoon (Due: 2026-10-18)"));
        let parsed = RenderedCounts::parse(&text).unwrap();
        assert_eq!(parsed, RenderedCounts::from_report(&report));
        assert_eq!(parsed.overdue_goals, 1);
        assert_eq!(parsed.upcoming_deadlines, 1);
    }

    #[test]
    fn category_completed_lines_do_not_shadow_overview() {
        let goals = vec![
            weekly("a", Category::Health, 100, GoalStatus::Completed, 1),
            weekly("b", Category::Health, 100, GoalStatus::Completed, 1),
            weekly("c", Category::Learning, 10, GoalStatus::InProgress, 1),
        ];
        let report = generate_report(&goals, Period::Weekly, today());
        let text = TextExporter::new().render(&report).unwrap();
        let parsed = RenderedCounts::parse(&text).unwrap();
        assert_eq!(parsed.completed_goals, 2);
        assert_eq!(parsed.completion_rate, 67);
    }

    #[test]
    fn parse_reports_missing_fields() {
        let result = RenderedCounts::parse("OVERVIEW\n========\nTotal Goals: 4\n");
        assert!(matches!(result, Err(ReportError::MissingField(name)) if name == "Completed"));
    }
}
