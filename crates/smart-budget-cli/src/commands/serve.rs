//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use smart_budget_core::AppConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    config: &AppConfig,
    host: Option<&str>,
    port: Option<u16>,
    static_dir: Option<&Path>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host.to_string();
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("🚀 Starting Smart Budget web server...");
    println!("   Database: {}", db_path.display());
    println!(
        "   Listening: http://{}:{}",
        config.server.host, config.server.port
    );
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if config.server.host != "127.0.0.1" && config.server.host != "localhost" {
        println!();
        println!("   ⚠️  No authentication - only expose on a trusted network!");
    }
    println!();

    let db = open_db(db_path)?;
    let static_dir = match static_dir {
        Some(dir) => Some(
            dir.to_str()
                .context("Static directory path is not valid UTF-8")?,
        ),
        None => None,
    };

    smart_budget_server::serve(db, &config, static_dir).await
}
