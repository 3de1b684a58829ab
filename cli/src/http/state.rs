//! HTTP服务器状态管理

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use listkeeper_core::api::ListRegistry;
use tokio::sync::broadcast;

/// 应用状态（在所有handlers间共享）
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ListRegistry>,
    /// Item capacity given to lists created through the API.
    pub default_max_items: usize,
    pub stats: Arc<ServerStats>,
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(
        registry: Arc<ListRegistry>,
        default_max_items: usize,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            registry,
            default_max_items,
            stats: Arc::new(ServerStats::new()),
            shutdown_tx,
        }
    }
}

/// 服务器统计信息
pub struct ServerStats {
    requests_total: AtomicU64,
    errors_total: AtomicU64,
    pub start_time: DateTime<Local>,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            errors_total: AtomicU64::new(0),
            start_time: Local::now(),
        }
    }

    pub fn increment_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn errors_total(&self) -> u64 {
        self.errors_total.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> f64 {
        let now = Local::now();
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
