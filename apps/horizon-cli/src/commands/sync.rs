// sync.rs — Hand one goal to the calendar sink.

use horizon_goal::{request_calendar_sync, IcsCalendarSink};

use super::parse_id;
use crate::config::HorizonConfig;
use crate::session::Session;

pub fn execute(session: &Session, config: &HorizonConfig, id: &str) -> anyhow::Result<()> {
    let goal_id = parse_id(id)?;
    let sink = IcsCalendarSink::new(&config.paths.calendar_dir);

    if request_calendar_sync(session.store(), goal_id, &sink)? {
        println!("Calendar entry written: {}", sink.entry_path(goal_id).display());
    } else {
        println!("Calendar sync failed; see log output for details.");
    }
    Ok(())
}
