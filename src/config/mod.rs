mod types;
mod loader;
mod defaults;
mod validation;

pub use types::*;
pub use loader::{load_config, parse_config_str};
pub use validation::validate_config;
