use std::path::Path;
use std::sync::Arc;

use listkeeper_core::api::{ListRegistry, PersistenceGateway, StoreLimits};

pub fn gateway_at(path: &Path) -> PersistenceGateway {
    gateway_with_registry(path, ListRegistry::new(100, 100))
}

pub fn gateway_with_registry(path: &Path, registry: ListRegistry) -> PersistenceGateway {
    PersistenceGateway::new(Arc::new(registry), path, StoreLimits::default())
}

pub fn item_ids(gateway: &PersistenceGateway, list_id: &str) -> Vec<String> {
    gateway
        .registry()
        .get_list(list_id)
        .expect("list should exist")
        .store
        .list_all()
        .into_iter()
        .map(|item| item.id)
        .collect()
}
