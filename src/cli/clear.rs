use anyhow::Result;

use crate::chat::HistoryStore;
use crate::core::AppConfig;

pub fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let store = HistoryStore::new(&config.history_path);
    store.clear()?;
    println!("✅ Chat history cleared!");
    Ok(())
}
