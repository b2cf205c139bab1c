use anyhow::{Context, Result};
use clap::Parser;
use log::{error, warn};
use rg_status::core::{spawn_signal_handlers, LoopControl};
use rg_status::{build_update_manager, builtin_registry, config, RootNameSink, Sink, TextSink};
use std::path::PathBuf;
use std::sync::Arc;

/// rg-status - A lightweight status line aggregator for dwm and other X11 bars
#[derive(Parser, Debug, Clone)]
#[command(name = "rg-status")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write the status to stdout instead of setting the X root window name
    #[arg(short = 's', long = "stdout")]
    stdout: bool,

    /// Run a single update cycle and exit (implies --stdout)
    #[arg(short = '1', long = "once")]
    once: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// List the available producers and exit
    #[arg(long = "list-producers")]
    list_producers: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting rg-status v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("rg-status: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.list_producers {
        for info in builtin_registry().list_producers() {
            println!("{:<20} {}", info.id, info.name);
        }
        return Ok(());
    }

    let mut manager = build_update_manager(&config)?;

    let mut sink: Box<dyn Sink> = if cli.stdout || cli.once {
        Box::new(TextSink::stdout())
    } else {
        Box::new(RootNameSink::connect()?)
    };

    // One thread: producers run in order and a slow one delays the rest
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let control = Arc::new(if cli.once {
            LoopControl::once()
        } else {
            LoopControl::new()
        });
        spawn_signal_handlers(Arc::clone(&control))?;
        manager.run(sink.as_mut(), &control).await
    })
}
