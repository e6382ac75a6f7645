//! REST server entry point.
//!
//! Configuration comes from environment variables:
//! - `BUJO_PORT`: listen port, defaults to 5000.
//! - `BUJO_DB`: SQLite database path, defaults to `bujo.sqlite3`.
//! - `BUJO_LOG_LEVEL` / `BUJO_LOG_DIR`: logging bootstrap.

use bujo_core::db::open_db;
use bujo_core::{core_version, default_log_level, init_logging, Store};
use bujo_server::routes::{create_router, AppState};
use log::info;
use std::env;
use std::error::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_FILE: &str = "bujo.sqlite3";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let level = env::var("BUJO_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = match env::var("BUJO_LOG_DIR") {
        Ok(dir) => dir,
        Err(_) => env::current_dir()?
            .join("logs")
            .to_string_lossy()
            .into_owned(),
    };
    init_logging(&level, &log_dir)
        .map_err(|message| format!("logging init failed: {message}"))?;

    let port: u16 = match env::var("BUJO_PORT") {
        Ok(value) => value
            .parse()
            .map_err(|_| format!("invalid BUJO_PORT `{value}`"))?,
        Err(_) => DEFAULT_PORT,
    };
    let db_path = env::var("BUJO_DB").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string());

    let conn = open_db(&db_path)?;
    let state = AppState::new(Store::new(conn));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(
        "event=server_start module=server status=ok port={port} db={db_path} version={}",
        core_version()
    );

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
