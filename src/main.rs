//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tn_casting::adapters::export::FsExporter;
use tn_casting::adapters::persistence::{MemoryRepo, seed};
use tn_casting::adapters::ui::tui::TuiInputPort;
use tn_casting::ports::{CastingRepoPort, ExportPort, InputPort};
use tn_casting::shared::config::AppConfig;
use tn_casting::usecases::{CastingService, SessionService};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config invalid, using defaults");
            AppConfig::default()
        }
    };

    tn_casting::adapters::ui::init_ui(cfg.show_banner_or_default());

    // --- Registry: seed castings unless disabled ---
    let repo: Arc<dyn CastingRepoPort> = if cfg.load_seed_or_default() {
        let castings = seed::castings();
        info!(castings = castings.len(), "loaded seed castings");
        Arc::new(MemoryRepo::with_castings(castings))
    } else {
        info!("starting with an empty registry");
        Arc::new(MemoryRepo::new())
    };

    let export_dir = cfg.export_dir_or_default();
    info!(path = %export_dir, "export directory");
    let exporter: Arc<dyn ExportPort> = Arc::new(FsExporter::new(&export_dir));

    // --- Services ---
    let casting_service = Arc::new(CastingService::new(Arc::clone(&repo)));
    let session_service = Arc::new(SessionService::new(seed::demo_users()));

    let submit_delay_ms = cfg.submit_delay_ms_or_default();
    info!(submit_delay_ms, "simulated submit latency");

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        casting_service,
        session_service,
        exporter,
        Duration::from_millis(submit_delay_ms),
    ));

    // --- Run (home -> browse / apply / dashboard) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("bye");
    Ok(())
}
