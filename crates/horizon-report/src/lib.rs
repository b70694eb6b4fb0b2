//! # horizon-report
//!
//! Report generation and export over a goal snapshot.
//!
//! [`generate_report`] is a pure function of `(goals, period, as_of)`: it
//! scopes the snapshot to one period and derives status counts, category
//! performance, hierarchy insights, and deadline alerts. Exporters turn a
//! [`Report`] into a portable document for an external sink.
//!
//! ## Key components
//!
//! - [`Report`] — the immutable report record
//! - [`generate_report`] — the aggregation pipeline
//! - [`QuickStats`] — totals across all periods
//! - [`exporters`] — text and JSON renderers, the report filename, and file sinks

pub mod error;
pub mod exporters;
pub mod report;
pub mod stats;

pub use error::ReportError;
pub use exporters::{
    export_report, exporter_for, report_filename, ExportFormat, Exporter, FileReportSink,
    RenderedCounts, ReportSink,
};
pub use report::{
    generate_report, CategoryStat, HierarchyInsights, Recommendation, Report,
    UPCOMING_WINDOW_DAYS,
};
pub use stats::QuickStats;
