// report.rs — Report subcommands (show, export) and quick stats.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use horizon_goal::Period;
use horizon_report::{
    export_report, exporter_for, generate_report, ExportFormat, FileReportSink, QuickStats,
};

use super::date_arg;
use crate::config::HorizonConfig;
use crate::session::Session;

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Print a report for one period.
    Show {
        /// Period to report on (defaults to report.default_period).
        #[arg(long)]
        period: Option<Period>,
        /// text or json (defaults to report.format).
        #[arg(long)]
        format: Option<String>,
        /// Judge deadlines as of this date instead of today (YYYY-MM-DD).
        #[arg(long, value_parser = date_arg)]
        as_of: Option<NaiveDate>,
    },
    /// Write a report file named goal-report-<period>-<date>.<ext>.
    Export {
        #[arg(long)]
        period: Option<Period>,
        #[arg(long)]
        format: Option<String>,
        /// Output directory (defaults to paths.reports_dir).
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_parser = date_arg)]
        as_of: Option<NaiveDate>,
    },
}

pub fn execute(
    cmd: &ReportCommands,
    session: &Session,
    config: &HorizonConfig,
) -> anyhow::Result<()> {
    match cmd {
        ReportCommands::Show {
            period,
            format,
            as_of,
        } => {
            let report = generate_report(
                &session.store().snapshot(),
                period.unwrap_or(config.report.default_period),
                as_of.unwrap_or_else(|| Utc::now().date_naive()),
            );
            let format = resolve_format(format.as_deref(), config)?;
            print!("{}", exporter_for(format).render(&report)?);
            Ok(())
        }
        ReportCommands::Export {
            period,
            format,
            out,
            as_of,
        } => {
            let report = generate_report(
                &session.store().snapshot(),
                period.unwrap_or(config.report.default_period),
                as_of.unwrap_or_else(|| Utc::now().date_naive()),
            );
            let format = resolve_format(format.as_deref(), config)?;
            let sink = FileReportSink::new(out.as_ref().unwrap_or(&config.paths.reports_dir));
            let filename = export_report(&report, format, &sink)?;
            println!("Report written: {}", sink.dir().join(filename).display());
            Ok(())
        }
    }
}

fn resolve_format(flag: Option<&str>, config: &HorizonConfig) -> anyhow::Result<ExportFormat> {
    Ok(flag.unwrap_or(config.report.format.as_str()).parse::<ExportFormat>()?)
}

/// Headline numbers across every period.
pub fn stats(session: &Session) -> anyhow::Result<()> {
    let stats = QuickStats::from_goals(session.store().list());
    println!("Total goals:  {}", stats.total_goals);
    println!("Completed:    {}", stats.completed_goals);
    println!("In progress:  {}", stats.in_progress_goals);
    println!();
    for (period, count) in &stats.per_period {
        println!("  {:<10} {}", period.label(), count);
    }
    Ok(())
}
