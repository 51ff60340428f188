use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use storyteller_core::GenderClassifier;
use storyteller_core::config_file;
use storyteller_gender::GenderModel;
use storyteller_parsing::ParsingConfigBuilder;
use storyteller_pdf_mupdf::MupdfBackend;

mod error;
mod handlers;
mod models;
mod routes;
mod script;
mod settings;
mod state;
mod upload;


use settings::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config_file::load_config();
    let settings = Settings::resolve(&config, |key| std::env::var(key).ok())?;

    // A missing model file leaves the server up in degraded mode.
    let classifier = GenderModel::load(&settings.model_path)?
        .map(|model| Arc::new(model) as Arc<dyn GenderClassifier>);
    if classifier.is_none() {
        eprintln!(
            "Warning: gender model not found at {}; /upload-script will answer 503",
            settings.model_path.display()
        );
    }

    let mut parsing = ParsingConfigBuilder::new().include_narration(settings.include_narration);
    if let Some(name) = &settings.narrator_name {
        parsing = parsing.narrator_name(name);
    }
    let parsing = parsing.build().context("invalid parsing configuration")?;

    std::fs::create_dir_all(&settings.scratch_root).with_context(|| {
        format!(
            "failed to create scratch directory {}",
            settings.scratch_root.display()
        )
    })?;

    let state = Arc::new(AppState {
        classifier,
        backend: Arc::new(MupdfBackend::new()),
        parsing,
        scratch_root: settings.scratch_root.clone(),
    });

    let app = routes::router(state, &settings.allowed_origins, settings.max_upload_bytes);

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    println!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
