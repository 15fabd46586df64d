use log::{info, warn};

use crate::config::Config;
use crate::slug::slugify;
use crate::utils::error::{BoxResult, KalemError};

/// Validate the configuration
pub fn validate_config(config: &Config) -> BoxResult<()> {
    validate_source_directory(config)?;
    validate_heading_levels(config)?;
    validate_anchor_settings(config)?;
    Ok(())
}

/// Validate the source directory
fn validate_source_directory(config: &Config) -> BoxResult<()> {
    let source = &config.source;

    if !source.exists() {
        return Err(KalemError::Config(format!(
            "Source directory does not exist: {}", source.display()
        )).into());
    }

    if !source.is_dir() {
        return Err(KalemError::Config(format!(
            "Source path is not a directory: {}", source.display()
        )).into());
    }

    let store = config.store_path();
    if store.exists() && !store.is_file() {
        return Err(KalemError::Config(format!(
            "Post store path is not a file: {}", store.display()
        )).into());
    }

    info!("Source directory: {}", source.display());
    Ok(())
}

/// Validate the table of contents heading levels
fn validate_heading_levels(config: &Config) -> BoxResult<()> {
    let toc = &config.toc;

    for (name, level) in [("min_level", toc.min_level), ("max_level", toc.max_level), ("max_depth", toc.max_depth)] {
        if !(1..=6).contains(&level) {
            return Err(KalemError::Config(format!(
                "toc.{} must be between 1 and 6, got {}", name, level
            )).into());
        }
    }

    if toc.min_level > toc.max_level {
        return Err(KalemError::Config(format!(
            "toc.min_level ({}) is greater than toc.max_level ({})", toc.min_level, toc.max_level
        )).into());
    }

    if toc.max_depth < toc.min_level {
        warn!("toc.max_depth ({}) hides every collected heading level", toc.max_depth);
    }

    Ok(())
}

/// Validate the id prefix and fallback used for generated anchors
fn validate_anchor_settings(config: &Config) -> BoxResult<()> {
    let toc = &config.toc;

    let prefix_ok = toc
        .anchor_prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !prefix_ok || toc.anchor_prefix.starts_with('-') {
        return Err(KalemError::Config(format!(
            "toc.anchor_prefix must be lowercase letters, digits and hyphens: {:?}", toc.anchor_prefix
        )).into());
    }

    if slugify(&toc.heading_fallback).is_empty() {
        return Err(KalemError::Config(format!(
            "toc.heading_fallback has no slug characters: {:?}", toc.heading_fallback
        )).into());
    }

    Ok(())
}
