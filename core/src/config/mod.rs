pub mod load;
pub mod types;

pub use load::{get_listkeeper_data_dir, load_default, load_from_path};
pub use types::{AppConfig, HttpServerConfig, LoggingConfig, StorageConfig};
