// session.rs — One CLI invocation's view of the goal store.
//
// The store lives in memory for the length of a command. It is seeded from
// the goals file (a backup document) at startup and written back through
// the backup sink only when a command mutated it.

use std::path::Path;

use anyhow::Context;
use horizon_goal::{
    BackupDocument, BackupSink, EventDispatcher, Goal, GoalStore, JsonFileBackup, LogSink,
};

use crate::config::HorizonConfig;

pub struct Session {
    store: GoalStore,
    backup: JsonFileBackup,
    dirty: bool,
}

impl Session {
    /// Restore the store from the configured goals file and attach the
    /// event log sink.
    pub fn open(config: &HorizonConfig) -> anyhow::Result<Self> {
        let goals = restore(&config.paths.goals_file)?;
        tracing::debug!(goals = goals.len(), "session restored");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&config.paths.events_log)));
        let store = GoalStore::from_goals(goals)?.with_dispatcher(dispatcher);

        Ok(Self {
            store,
            backup: JsonFileBackup::new(&config.paths.goals_file),
            dirty: false,
        })
    }

    pub fn store(&self) -> &GoalStore {
        &self.store
    }

    /// Mutable access; the session is written back on `save`.
    pub fn store_mut(&mut self) -> &mut GoalStore {
        self.dirty = true;
        &mut self.store
    }

    /// Persist the store if anything changed.
    pub fn save(&mut self) -> anyhow::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.backup.write_backup(self.store.list())?;
        self.dirty = false;
        Ok(())
    }
}

/// Read and verify a backup document. A missing file is an empty session.
pub fn restore(path: &Path) -> anyhow::Result<Vec<Goal>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading goals file {}", path.display()))?;
    let document: BackupDocument = serde_json::from_str(&json)
        .with_context(|| format!("parsing goals file {}", path.display()))?;
    document.verify()?;
    Ok(document.goals)
}
