// backup.rs — Write a checksummed snapshot of every goal.

use std::path::Path;

use horizon_goal::{BackupSink, JsonFileBackup};

use crate::config::HorizonConfig;
use crate::session::Session;

pub fn execute(
    session: &Session,
    config: &HorizonConfig,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let default_path = config.paths.goals_file.with_file_name("goals-backup.json");
    let sink = JsonFileBackup::new(out.unwrap_or(default_path.as_path()));
    let document = sink.write_backup(session.store().list())?;

    println!("Backup written: {}", sink.path().display());
    println!("  Goals:    {}", document.goals.len());
    println!("  Checksum: {}", document.checksum);
    Ok(())
}
