use anyhow::Result;

use crate::chat::HistoryStore;
use crate::core::AppConfig;

/// Print the persisted transcript, capped to the retention window the
/// same way an interactive session would see it.
pub fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let store = HistoryStore::new(&config.history_path);
    let mut history = store.load();
    history.truncate_to_recent();

    println!("📜 Chat History");
    for turn in history.iter() {
        println!("[{}] {} {}", turn.timestamp, turn.role.label(), turn.text);
    }

    Ok(())
}
