//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for one CLI action.

mod config;
mod generate;

pub use config::{init_config, print_config_paths, show_config, CONFIG_FILE_NAME};
pub use generate::{run_generate, GenerateConfig};

// Re-export config types used by handlers
pub use crate::config::AppConfig;
