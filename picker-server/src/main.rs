//! Development directory server.
//!
//! Serves a JSON file of user records over the directory HTTP API so the
//! picker can be exercised against a real HTTP backend.
//!
//! Usage:
//!   picker-server --port 4080 --data users.json

use anyhow::{Context, Result};
use clap::Parser;
use picker_directory::MemoryDirectory;
use picker_server::{USERS_PATH, build_router};
use std::{fs, path::PathBuf, sync::Arc};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "picker-server")]
#[command(about = "Development directory server for the entity picker")]
struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "4080")]
    port: u16,

    /// JSON file holding an array of user records
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Template for search hit text
    #[arg(short, long, default_value = "{first_name} {last_name}")]
    template: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_directory(path: Option<&PathBuf>, template: &str) -> Result<MemoryDirectory> {
    let directory = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            MemoryDirectory::from_json(&json)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => {
            warn!("No --data file given, serving an empty directory");
            MemoryDirectory::new(Vec::new())
        }
    };
    Ok(directory.with_title_format(template))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let directory = load_directory(args.data.as_ref(), &args.template)?;
    info!("Loaded {} user records", directory.len());

    let app = build_router(Arc::new(directory));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", args.port))?;
    info!("Directory API listening on http://0.0.0.0:{}{}", args.port, USERS_PATH);

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
