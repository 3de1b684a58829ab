use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use listkeeper_core::api::{spawn_autosave, AppConfig, CliError, ListRegistry, PersistenceGateway};
use tokio::sync::broadcast;
use tracing::{info, warn};

use super::cli::ServeArgs;
use crate::http::{start_server, AppState, ServerConfig};

/// Builds the registry, loads the snapshot, and serves until a shutdown
/// signal. A final save runs after the server stops.
pub async fn handle_serve(args: ServeArgs, cfg: &AppConfig) -> Result<(), CliError> {
    let storage = &cfg.storage;
    let registry = Arc::new(ListRegistry::new(storage.max_lists, storage.max_text_length));
    let gateway = Arc::new(PersistenceGateway::new(
        Arc::clone(&registry),
        PathBuf::from(&storage.snapshot_path),
        storage.list_limits(),
    ));

    // Load failures abort startup.
    gateway.load()?;

    let (shutdown_tx, _) = broadcast::channel(1);
    let every = Duration::from_secs(storage.save_interval_secs.max(1));
    let autosave = spawn_autosave(Arc::clone(&gateway), every, shutdown_tx.subscribe());
    info!(
        path = %gateway.path().display(),
        interval_secs = every.as_secs(),
        "autosave enabled"
    );

    let config = ServerConfig {
        host: args.host.unwrap_or_else(|| cfg.http_server.host.clone()),
        port: args.port.unwrap_or(cfg.http_server.port),
    };
    let state = AppState::new(registry, storage.max_items_per_list, shutdown_tx.clone());

    let served = start_server(config, state).await;

    // Stops autosave after one last write.
    let _ = shutdown_tx.send(());
    if let Err(e) = autosave.await {
        warn!(error = %e, "autosave task did not finish cleanly");
    }

    served.map_err(|e| CliError::Command(e.to_string()))
}
