mod app;

use std::{
    fs::{self, OpenOptions},
    sync::Arc,
};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use tubeguessr_core::{
    config::{self, AppConfig},
    session::StaticAccess,
    Backend, BackgroundBackend, Catalog, FileBackend, SessionManager, Store, SystemClock,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::london(),
    };

    let disk: Arc<dyn Backend> = Arc::new(FileBackend::new(&config.data_dir));
    let writer = if config.background_writes {
        let (writer, _task) = BackgroundBackend::spawn(disk.clone());
        Some(Arc::new(writer))
    } else {
        None
    };
    let backend = match &writer {
        Some(writer) => writer.clone() as Arc<dyn Backend>,
        None => disk,
    };
    info!(
        data_dir = %config.data_dir.display(),
        background = writer.is_some(),
        stations = catalog.len(),
        "Starting"
    );

    let manager = SessionManager::new(catalog, Store::open(backend), Arc::new(SystemClock))
        .with_day_offset(config.day_offset)
        .with_access(Arc::new(StaticAccess(config.unlimited_plays)));

    let mut app = app::ShellApp::new(manager);
    let result = app.run().await;

    if let Some(writer) = writer {
        writer.flush().await;
    }
    result
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("tubeguessr.log");

    let env_filter = EnvFilter::from_default_env();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
