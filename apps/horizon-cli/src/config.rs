// config.rs — CLI configuration from .horizon/config.toml.
//
// Every field has a serde default, so a missing file, a missing table, or a
// partial table all work. Relative paths resolve against the project root.

use std::path::{Path, PathBuf};

use horizon_goal::Period;
use serde::{Deserialize, Serialize};

/// Directory under the project root that holds all horizon state.
pub const STATE_DIR: &str = ".horizon";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorizonConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Where session state and sink output live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Goal snapshot loaded at startup and rewritten after mutations.
    #[serde(default = "default_goals_file")]
    pub goals_file: PathBuf,

    /// JSONL lifecycle event log.
    #[serde(default = "default_events_log")]
    pub events_log: PathBuf,

    /// Directory for exported reports.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Directory for calendar (.ics) entries.
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            goals_file: default_goals_file(),
            events_log: default_events_log(),
            reports_dir: default_reports_dir(),
            calendar_dir: default_calendar_dir(),
        }
    }
}

/// Report defaults used when a command doesn't say otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_period")]
    pub default_period: Period,

    /// "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
            format: default_format(),
        }
    }
}

// Serde default functions
fn default_goals_file() -> PathBuf {
    Path::new(STATE_DIR).join("goals.json")
}

fn default_events_log() -> PathBuf {
    Path::new(STATE_DIR).join("events.jsonl")
}

fn default_reports_dir() -> PathBuf {
    Path::new(STATE_DIR).join("reports")
}

fn default_calendar_dir() -> PathBuf {
    Path::new(STATE_DIR).join("calendar")
}

fn default_period() -> Period {
    Period::Weekly
}

fn default_format() -> String {
    "text".to_string()
}

impl HorizonConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `<root>/.horizon/config.toml` (defaults when absent) and resolve
    /// every path against `root`.
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let path = root.join(STATE_DIR).join("config.toml");
        let mut config = if path.exists() {
            Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        };
        config.paths.resolve_against(root);
        config
    }
}

impl PathsConfig {
    fn resolve_against(&mut self, root: &Path) {
        for path in [
            &mut self.goals_file,
            &mut self.events_log,
            &mut self.reports_dir,
            &mut self.calendar_dir,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let config = HorizonConfig::for_project(dir.path());
        assert_eq!(
            config.paths.goals_file,
            dir.path().join(".horizon").join("goals.json")
        );
        assert_eq!(config.report.default_period, Period::Weekly);
        assert_eq!(config.report.format, "text");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(STATE_DIR)).unwrap();
        std::fs::write(
            dir.path().join(STATE_DIR).join("config.toml"),
            "[report]\ndefault_period = \"monthly\"\n\n[paths]\nreports_dir = \"out\"\n",
        )
        .unwrap();

        let config = HorizonConfig::for_project(dir.path());
        assert_eq!(config.report.default_period, Period::Monthly);
        assert_eq!(config.report.format, "text");
        assert_eq!(config.paths.reports_dir, dir.path().join("out"));
        assert_eq!(
            config.paths.events_log,
            dir.path().join(".horizon").join("events.jsonl")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(STATE_DIR)).unwrap();
        std::fs::write(
            dir.path().join(STATE_DIR).join("config.toml"),
            format!(
                "[paths]\ngoals_file = {:?}\n",
                elsewhere.path().join("g.json").display().to_string()
            ),
        )
        .unwrap();

        let config = HorizonConfig::for_project(dir.path());
        assert_eq!(config.paths.goals_file, elsewhere.path().join("g.json"));
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(STATE_DIR)).unwrap();
        std::fs::write(
            dir.path().join(STATE_DIR).join("config.toml"),
            "[report]\ndefault_period = \"hourly\"\n",
        )
        .unwrap();

        let config = HorizonConfig::for_project(dir.path());
        assert_eq!(config.report.default_period, Period::Weekly);
    }
}
