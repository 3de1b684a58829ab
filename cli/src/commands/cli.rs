use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "listkeeper",
    version,
    about = "Ordered item lists over HTTP with snapshot persistence"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to read instead of ~/.listkeeper/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file. Overrides `storage.snapshot_path` and LISTKEEPER_DATA_FILE.
    #[arg(long, global = true)]
    pub data_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API (default when no subcommand is given).
    Serve(ServeArgs),
    /// Load the snapshot file and print its lists.
    Inspect(InspectArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct InspectArgs {
    /// Also print every item, in list order.
    #[arg(long)]
    pub items: bool,
}
