//! CLI command implementations

pub mod migrate;
pub mod serve;

use std::path::Path;

use roster_core::Config;

/// Print the effective configuration
pub fn show_config(config: &Config, explicit_path: Option<&Path>) {
    println!("Review Roster Configuration");
    println!("===========================");
    println!();
    println!("Server Settings:");
    println!("  addr: {}", config.server.addr);
    println!("  request_timeout: {:?}", config.server.request_timeout);
    println!();
    println!("Database Settings:");
    println!("  path: {}", config.database.path.display());
    println!("  max_connections: {}", config.database.max_connections);
    println!();

    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(Config::default_config_path);
    if let Some(path) = path {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
}
