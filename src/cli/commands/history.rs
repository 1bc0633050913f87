use anyhow::Result;

use crate::config::ConfigManager;
use crate::history::SqliteHistory;
use crate::paths;

/// Prints the most recently recorded translations, newest first.
pub fn run_history(limit: usize) -> Result<()> {
    let file_config = ConfigManager::new().load().unwrap_or_default();
    let history_path = file_config
        .history
        .path
        .unwrap_or_else(|| paths::data_dir().join("history.db"));

    let store = SqliteHistory::new(history_path)?;
    let records = store.recent(limit)?;

    if records.is_empty() {
        println!("No translations recorded yet.");
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {} -> {}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.source_language,
            record.target_language,
            record.translated_text
        );
    }

    Ok(())
}
