// goal.rs — Goal subcommands: add, update, remove, list, show, parents, seed.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use horizon_goal::hierarchy;
use horizon_goal::{
    coerce_progress, sample_goals, Category, Goal, GoalDraft, GoalPatch, GoalStatus, Period,
};

use super::{date_arg, parse_id, truncate};
use crate::session::Session;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a goal.
    Add {
        /// Goal title (e.g., "Exercise 5 times this week").
        title: String,
        /// personal, professional, health, or learning.
        #[arg(long)]
        category: Category,
        /// daily, weekly, monthly, quarterly, or yearly.
        #[arg(long)]
        period: Period,
        /// Deadline as YYYY-MM-DD.
        #[arg(long, value_parser = date_arg)]
        deadline: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Parent goal ID on a longer horizon in the same category.
        #[arg(long)]
        parent: Option<String>,
        /// Initial progress (0-100; non-numeric input counts as 0).
        #[arg(long)]
        progress: Option<String>,
        /// Initial status (defaults to not-started).
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Update fields of an existing goal.
    Update {
        /// Goal ID.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        period: Option<Period>,
        /// Progress (0-100; non-numeric input counts as 0).
        #[arg(long)]
        progress: Option<String>,
        #[arg(long)]
        status: Option<GoalStatus>,
        #[arg(long, value_parser = date_arg)]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
        /// Link to a new parent goal.
        #[arg(long, conflicts_with = "clear_parent")]
        parent: Option<String>,
        /// Remove the parent link.
        #[arg(long)]
        clear_parent: bool,
    },
    /// Remove a goal. Child goals keep their link to it.
    Remove {
        /// Goal ID.
        id: String,
    },
    /// List goals, optionally for one period.
    List {
        #[arg(long)]
        period: Option<Period>,
    },
    /// Show a goal with its parent chain and children.
    Show {
        /// Goal ID.
        id: String,
    },
    /// List goals eligible as parent for a period and category.
    Parents {
        #[arg(long, required_unless_present = "goal")]
        period: Option<Period>,
        #[arg(long, required_unless_present = "goal")]
        category: Option<Category>,
        /// Use the period and category of an existing goal (excluding itself).
        #[arg(long, conflicts_with_all = ["period", "category"])]
        goal: Option<String>,
    },
    /// Load the demonstration goals into an empty project.
    Seed,
}

pub fn execute(cmd: &GoalCommands, session: &mut Session) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::Add {
            title,
            category,
            period,
            deadline,
            notes,
            parent,
            progress,
            status,
        } => {
            let draft = GoalDraft {
                title: title.clone(),
                category: *category,
                period: *period,
                deadline: *deadline,
                notes: notes.clone(),
                parent_goal_id: parent.as_deref().map(parse_id).transpose()?,
                progress: progress.as_deref().map(|p| i64::from(coerce_progress(p))),
                status: *status,
            };
            add_goal(session, draft)
        }
        GoalCommands::Update {
            id,
            title,
            category,
            period,
            progress,
            status,
            deadline,
            notes,
            parent,
            clear_parent,
        } => {
            let parent_goal_id = if *clear_parent {
                Some(None)
            } else {
                parent.as_deref().map(parse_id).transpose()?.map(Some)
            };
            let patch = GoalPatch {
                title: title.clone(),
                category: *category,
                period: *period,
                progress: progress.as_deref().map(|p| i64::from(coerce_progress(p))),
                status: *status,
                deadline: *deadline,
                notes: notes.clone(),
                parent_goal_id,
            };
            update_goal(session, id, patch)
        }
        GoalCommands::Remove { id } => remove_goal(session, id),
        GoalCommands::List { period } => list_goals(session, *period),
        GoalCommands::Show { id } => show_goal(session, id),
        GoalCommands::Parents {
            period,
            category,
            goal,
        } => list_parents(session, *period, *category, goal.as_deref()),
        GoalCommands::Seed => seed(session),
    }
}

fn add_goal(session: &mut Session, draft: GoalDraft) -> anyhow::Result<()> {
    let goal = session.store_mut().add(draft)?;
    println!("Goal added: {}", goal.id);
    println!("  Title:    {}", goal.title);
    println!("  Horizon:  {} / {}", goal.period, goal.category);
    println!("  Deadline: {}", goal.deadline);
    Ok(())
}

fn update_goal(session: &mut Session, id: &str, patch: GoalPatch) -> anyhow::Result<()> {
    let goal_id = parse_id(id)?;
    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    let goal = session.store_mut().update(goal_id, patch)?;
    println!(
        "Goal updated: {} ({}%, {})",
        goal.id, goal.progress, goal.status
    );
    Ok(())
}

fn remove_goal(session: &mut Session, id: &str) -> anyhow::Result<()> {
    let goal_id = parse_id(id)?;
    let children = hierarchy::children_of(session.store().list(), goal_id).len();
    let removed = session.store_mut().remove(goal_id)?;
    println!("Goal removed: {} ({})", removed.id, removed.title);
    if children > 0 {
        println!(
            "  {} child goal(s) still reference it and now have no resolvable parent.",
            children
        );
    }
    Ok(())
}

fn print_table(goals: &[&Goal], all: &[Goal]) {
    println!(
        "{:<38} {:<30} {:<10} {:<13} {:>5}  {:<12} {:<10}",
        "ID", "TITLE", "PERIOD", "CATEGORY", "PROG", "STATUS", "DEADLINE"
    );
    println!("{}", "-".repeat(125));
    for g in goals {
        let link = match (g.parent_goal_id, hierarchy::parent_of(all, g.id)) {
            (Some(_), Some(parent)) => format!("  ↑ {}", truncate(&parent.title, 24)),
            (Some(_), None) => "  ↑ (missing parent)".to_string(),
            (None, _) => String::new(),
        };
        println!(
            "{:<38} {:<30} {:<10} {:<13} {:>4}%  {:<12} {:<10}{}",
            g.id,
            truncate(&g.title, 28),
            g.period.to_string(),
            g.category.to_string(),
            g.progress,
            g.status.to_string(),
            g.deadline.to_string(),
            link,
        );
    }
}

fn list_goals(session: &Session, period: Option<Period>) -> anyhow::Result<()> {
    let all = session.store().list();
    let goals: Vec<&Goal> = match period {
        Some(p) => hierarchy::filter_by_period(all, p),
        None => all.iter().collect(),
    };

    if goals.is_empty() {
        println!("No goals found.");
        return Ok(());
    }

    print_table(&goals, all);
    println!("\n{} goal(s) total.", goals.len());
    Ok(())
}

fn show_goal(session: &Session, id: &str) -> anyhow::Result<()> {
    let goal_id = parse_id(id)?;
    let all = session.store().list();
    let goal = session
        .store()
        .get(goal_id)
        .ok_or(horizon_goal::GoalError::NotFound(goal_id))?;

    println!("Goal:     {}", goal.id);
    println!("Title:    {}", goal.title);
    println!("Category: {}", goal.category.label());
    println!("Period:   {}", goal.period.label());
    println!("Progress: {}%", goal.progress);
    println!("Status:   {}", goal.status.label());
    println!("Deadline: {}", goal.deadline);
    println!("Created:  {}", goal.created_at.to_rfc3339());
    if !goal.notes.is_empty() {
        println!("Notes:    {}", goal.notes);
    }

    match goal.parent_goal_id {
        Some(parent_id) => {
            let chain = hierarchy::ancestry(all, goal.id);
            if chain.is_empty() {
                println!("Parent:   {} (missing)", parent_id);
            } else {
                println!("Parents:");
                for (depth, parent) in chain.iter().enumerate() {
                    println!(
                        "  {}↑ [{}] {}",
                        "  ".repeat(depth),
                        parent.period,
                        parent.title
                    );
                }
            }
        }
        None => println!("Parent:   (none)"),
    }

    let children = hierarchy::children_of(all, goal.id);
    if !children.is_empty() {
        println!("Children:");
        for child in children {
            println!(
                "  ↓ [{}] {} ({}%)",
                child.period, child.title, child.progress
            );
        }
    }
    Ok(())
}

fn list_parents(
    session: &Session,
    period: Option<Period>,
    category: Option<Category>,
    goal: Option<&str>,
) -> anyhow::Result<()> {
    let all = session.store().list();
    let candidates = match goal {
        Some(id) => {
            let goal_id = parse_id(id)?;
            let goal = session
                .store()
                .get(goal_id)
                .ok_or(horizon_goal::GoalError::NotFound(goal_id))?;
            hierarchy::eligible_parents_for(all, goal)
        }
        None => {
            let (Some(period), Some(category)) = (period, category) else {
                anyhow::bail!("--period and --category are required without --goal");
            };
            hierarchy::eligible_parents(all, period, category)
        }
    };

    if candidates.is_empty() {
        println!("No eligible parent goals.");
        return Ok(());
    }
    print_table(&candidates, all);
    Ok(())
}

fn seed(session: &mut Session) -> anyhow::Result<()> {
    if !session.store().is_empty() {
        anyhow::bail!("project already has goals; seed only fills an empty project");
    }

    // Add longest horizons first so every parent exists before its children.
    let mut samples = sample_goals(Utc::now().date_naive());
    samples.sort_by(|a, b| b.period.cmp(&a.period));

    let mut new_ids = HashMap::new();
    for sample in samples {
        let mut draft = GoalDraft::new(sample.title, sample.category, sample.period, sample.deadline)
            .notes(sample.notes)
            .progress(i64::from(sample.progress))
            .status(sample.status);
        draft.parent_goal_id = sample.parent_goal_id.and_then(|old| new_ids.get(&old).copied());
        let added = session.store_mut().add(draft)?;
        new_ids.insert(sample.id, added.id);
    }

    println!("Seeded {} demonstration goals.", new_ids.len());
    Ok(())
}
