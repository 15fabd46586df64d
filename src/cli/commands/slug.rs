use log::warn;

use crate::cli::types::Commands;
use crate::config::Config;
use crate::content::PostStore;
use crate::slug::{slugify, SlugLookup};
use crate::utils::error::BoxResult;

/// Handle the slug command
pub fn handle_slug_command(command: &Commands, config: &Config) -> BoxResult<()> {
    if let Commands::Slug { title, unique } = command {
        let title = title.join(" ");

        let slug = if *unique {
            PostStore::open(config.store_path())?.unique_slug(&title)
        } else {
            slugify(&title)
        };

        if slug.is_empty() {
            warn!("'{}' has no characters usable in a slug", title);
        }
        println!("{}", slug);
    }
    Ok(())
}
