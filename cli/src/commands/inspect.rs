use std::path::PathBuf;
use std::sync::Arc;

use listkeeper_core::api::{AppConfig, CliError, ListRegistry, PersistenceGateway};

use super::cli::InspectArgs;

/// Loads the snapshot with the same validation as `serve` and prints it.
pub fn handle_inspect(args: InspectArgs, cfg: &AppConfig) -> Result<(), CliError> {
    let storage = &cfg.storage;
    let registry = Arc::new(ListRegistry::new(storage.max_lists, storage.max_text_length));
    let gateway = PersistenceGateway::new(
        Arc::clone(&registry),
        PathBuf::from(&storage.snapshot_path),
        storage.list_limits(),
    );
    gateway.load()?;

    println!("{}", render(&registry, args.items));
    Ok(())
}

fn render(registry: &ListRegistry, with_items: bool) -> String {
    let summaries = registry.all_lists();
    let mut out = format!("{} list(s)\n", summaries.len());
    for summary in summaries {
        let Some(list) = registry.get_list(&summary.id) else {
            continue;
        };
        out.push_str(&format!(
            "{}  {}  {} ({} items)\n",
            summary.id,
            summary.created_at.to_rfc3339(),
            summary.name,
            list.store.len()
        ));
        if with_items {
            for item in list.store.list_all() {
                out.push_str(&format!("    {}  {}\n", item.id, item.text));
            }
        }
    }
    out
}
