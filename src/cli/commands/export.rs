use std::path::PathBuf;

use crate::config::Config;
use crate::content::PostStore;
use crate::front_matter;
use crate::utils::error::BoxResult;

/// Handle the export command
pub fn handle_export_command(dir: Option<&PathBuf>, config: &Config) -> BoxResult<()> {
    let store = PostStore::open(config.store_path())?;
    let target = dir.cloned().unwrap_or_else(|| config.content_path());

    let count = front_matter::export_all(&target, store.list_posts())?;
    println!("{} posts written to {}", count, target.display());
    Ok(())
}
