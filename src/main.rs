use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sheusrb_lib::constants::{DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT, FIXED_PAYLOAD};
use sheusrb_lib::{Message, PortSettings, SerialConnector, list_ports, send_fixed_command_with};

/// Send the fixed sheusrb command to a serial device.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serial device to write to.
    #[arg(short, long, default_value = DEFAULT_PORT)]
    port: String,
    /// Line speed in baud.
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud_rate: u32,
    /// Give up on the write after this many milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_millis() as u64, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: u64,
    /// List available serial ports and exit.
    #[arg(long, conflicts_with = "dry_run")]
    list: bool,
    /// Print the payload instead of sending it.
    #[arg(long)]
    dry_run: bool,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Cli {
    fn settings(&self) -> PortSettings {
        PortSettings::default()
            .with_path(self.port.clone())
            .with_baud_rate(self.baud_rate)
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }

    /// `-qq` turns logging off entirely
    fn logging_silenced(&self) -> bool {
        self.verbose.tracing_level_filter() == LevelFilter::OFF
    }
}

fn setup_logging(log_file_path: Option<&PathBuf>, verbosity: &Verbosity<WarnLevel>) -> Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = if let Some(path) = log_file_path {
        let log_file = File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // Quiet by default so a successful send prints nothing; -v raises it, RUST_LOG overrides
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let guard = setup_logging(cli.log_file.as_ref(), &cli.verbose)?;

    if let Err(e) = run(&cli) {
        error!("Send failed: {:?}", e);
        if cli.logging_silenced() {
            eprintln!("Error: {:?}", e);
        }
        // process::exit skips destructors; flush the log file first
        drop(guard);
        process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list {
        return print_ports();
    }
    if cli.dry_run {
        return print_payload();
    }

    let settings = cli.settings();
    send_fixed_command_with(SerialConnector, settings.clone())
        .with_context(|| format!("Failed to send command to {}", settings.path))?;
    Ok(())
}

fn print_ports() -> Result<()> {
    let ports = list_ports().context("Failed to list serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found.");
    }
    for port in ports {
        println!("{}  {:?}", port.port_name, port.port_type);
    }
    Ok(())
}

fn print_payload() -> Result<()> {
    let (message, size) = Message::decode(&FIXED_PAYLOAD).context("Fixed payload does not decode")?;
    println!("Payload ({} bytes): {}", size, hex::encode(FIXED_PAYLOAD));
    println!("Message: {:?}", message);
    Ok(())
}
