//! Toque Server - restaurant back-office for food costing and smart
//! prep lists
//!
//! # Module structure
//!
//! ```text
//! toque-server/src/
//! ├── core/     # config, state, HTTP server
//! ├── auth/     # restaurant scope extraction
//! ├── db/       # SQLite pool and repositories
//! ├── engine/   # pure calculation (costing, covers, predictions)
//! ├── ai/       # generation provider (Anthropic REST)
//! ├── prep/     # prep list generation, enrichment, feedback
//! ├── api/      # HTTP routes and handlers
//! └── utils/    # errors, logging
//! ```

pub mod ai;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod engine;
pub mod prep;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: .env, working directory, logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".to_string());
    std::fs::create_dir_all(&work_dir)?;
    let log_dir = format!("{work_dir}/logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), Some(&log_dir));

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______
 /_  __/___  ____ ___  _____
  / / / __ \/ __ `/ / / / _ \
 / / / /_/ / /_/ / /_/ /  __/
/_/  \____/\__, /\__,_/\___/
             /_/
    "#
    );
}
