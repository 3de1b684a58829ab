use clap::Parser;
use listkeeper_cli::commands::{cli, inspect, serve};
use listkeeper_core::api::{
    load_default, load_from_path, AppConfig, CliError, LoggingConfig, PersistError,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "listkeeper exited with an error");
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let mut args = cli::Args::parse();
    let cfg = load_config(&args)?;
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    match args.command.take() {
        Some(cli::Commands::Serve(serve_args)) => serve::handle_serve(serve_args, &cfg).await?,
        Some(cli::Commands::Inspect(inspect_args)) => inspect::handle_inspect(inspect_args, &cfg)?,
        None => serve::handle_serve(cli::ServeArgs::default(), &cfg).await?,
    }
    Ok(0)
}

fn load_config(args: &cli::Args) -> Result<AppConfig, CliError> {
    let loaded = match args.config.as_deref() {
        Some(path) => load_from_path(path),
        None => load_default(),
    };
    let mut cfg = loaded.map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(data_file) = args.data_file.as_deref().filter(|s| !s.trim().is_empty()) {
        cfg.storage.snapshot_path = data_file.to_string();
    }
    Ok(cfg)
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: startup / IO / persistence error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Persist(pe) => match pe {
            PersistError::Io { .. } => 20,
            PersistError::Parse(_) | PersistError::InvalidList { .. } => 20,
            PersistError::Serialize(_) => 50,
        },
        CliError::Io(_) => 20,
        CliError::Command(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("listkeeper"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("listkeeper.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
