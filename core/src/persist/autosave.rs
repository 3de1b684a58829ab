use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use super::gateway::{PersistenceGateway, SaveOutcome};

/// Saves on every tick of `every`, and once more when `shutdown` fires or its
/// sender is dropped. Failures are logged and retried on the next tick.
pub fn spawn_autosave(
    gateway: Arc<PersistenceGateway>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => save_once(&gateway).await,
                _ = shutdown.recv() => {
                    info!("autosave stopping, writing final snapshot");
                    save_once(&gateway).await;
                    break;
                }
            }
        }
    })
}

async fn save_once(gateway: &Arc<PersistenceGateway>) {
    let gw = Arc::clone(gateway);
    match tokio::task::spawn_blocking(move || gw.save()).await {
        Ok(Ok(SaveOutcome::Written { lists })) => debug!(lists, "autosave wrote snapshot"),
        Ok(Ok(SaveOutcome::Skipped)) => {}
        Ok(Err(e)) => error!(error = %e, path = %gateway.path().display(), "saving file failed"),
        Err(e) => error!(error = %e, "autosave task failed"),
    }
}
