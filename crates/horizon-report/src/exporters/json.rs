//! json.rs — JSON exporter for machine-readable output.

use crate::error::ReportError;
use crate::exporters::Exporter;
use crate::report::Report;

#[derive(Default)]
pub struct JsonExporter {}

impl JsonExporter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Exporter for JsonExporter {
    fn render(&self, report: &Report) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
