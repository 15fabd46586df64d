use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::defaults;
use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{BoxResult, KalemError};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Load site configuration from config files
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>
) -> BoxResult<Config> {
    // Start with default configuration
    let mut config = Config::default();

    // Load configuration from specified files or defaults
    let config_paths = match config_files {
        Some(paths) => paths,
        None => find_default_config_files(&source_dir),
    };

    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            merge_config_file(&mut config, &path)?;
        }
    }

    // Set source directory if not already set
    if config.source == defaults::default_source() {
        config.source = source_dir.as_ref().to_path_buf();
    }

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Merge a configuration file into the current configuration
fn merge_config_file(config: &mut Config, config_path: &Path) -> BoxResult<()> {
    if !config_path.exists() {
        return Err(KalemError::Config(format!(
            "Configuration file not found: {}", config_path.display()
        )).into());
    }

    let content = fs::read_to_string(config_path)
        .map_err(|e| KalemError::Config(format!(
            "Failed to read configuration file {}: {}", config_path.display(), e
        )))?;

    let format = config_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    let file_config = parse_config_str(&content, &format)
        .map_err(|e| KalemError::Config(format!("{} ({})", e, config_path.display())))?;

    merge_configs(config, &file_config);
    Ok(())
}

/// Parse configuration text in the given format (`yml`, `yaml`, `toml` or `json`)
pub fn parse_config_str(content: &str, format: &str) -> BoxResult<Config> {
    let config = match format {
        // An empty YAML file is a valid, empty configuration
        "yml" | "yaml" if content.trim().is_empty() => Config::default(),
        "yml" | "yaml" => serde_yaml::from_str(content)
            .map_err(|e| KalemError::Config(format!("Failed to parse YAML configuration: {}", e)))?,
        "toml" => toml::from_str(content)
            .map_err(|e| KalemError::Config(format!("Failed to parse TOML configuration: {}", e)))?,
        "json" => serde_json::from_str(content)
            .map_err(|e| KalemError::Config(format!("Failed to parse JSON configuration: {}", e)))?,
        other => {
            return Err(KalemError::Config(format!(
                "Unsupported configuration file format: {}", other
            )).into());
        }
    };
    Ok(config)
}

/// Merge two configurations
fn merge_configs(target: &mut Config, source: &Config) {
    // Only override non-default values from source config
    if source.source != defaults::default_source() {
        target.source = source.source.clone();
    }

    if source.data_dir != defaults::default_data_dir() {
        target.data_dir = source.data_dir.clone();
    }

    if source.posts_file != defaults::default_posts_file() {
        target.posts_file = source.posts_file.clone();
    }

    if source.content_dir != defaults::default_content_dir() {
        target.content_dir = source.content_dir.clone();
    }

    if source.toc != Default::default() {
        debug!("Merging toc settings: {:?}", source.toc);
        target.toc = source.toc.clone();
    }
}
