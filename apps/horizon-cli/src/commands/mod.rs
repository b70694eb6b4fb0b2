pub mod backup;
pub mod goal;
pub mod report;
pub mod sync;

use anyhow::Context;
use horizon_goal::{parse_deadline, GoalId};

/// Parse a goal id given on the command line.
pub fn parse_id(raw: &str) -> anyhow::Result<GoalId> {
    uuid::Uuid::parse_str(raw.trim()).with_context(|| format!("invalid goal id '{}'", raw))
}

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn date_arg(raw: &str) -> Result<chrono::NaiveDate, horizon_goal::ValidationError> {
    parse_deadline(raw)
}

/// Shorten `s` to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long goal title", 10), "a very ...");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {} ", id)).unwrap(), id);
    }
}
