use wolcast::config::{self, Config};
use wolcast::wol;
use wolcast::wol::{DelayRange, SendOptions};

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file listing the target MAC addresses.
    #[arg(long)]
    config: Option<PathBuf>,

    /// MAC addresses to wake, in any common format.
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    mac_addresses: Vec<String>,

    /// UDP port the wake packets are sent to.
    #[arg(long)]
    port: Option<u16>,

    /// Broadcast address for the wake packets.
    #[arg(long)]
    broadcast: Option<String>,

    /// Minimum seconds to pause between sends.
    #[arg(long)]
    delay_min: Option<f64>,

    /// Maximum seconds to pause between sends. Zero disables pacing.
    #[arg(long)]
    delay_max: Option<f64>,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("INFO"))
        .format_timestamp(Some(env_logger::fmt::TimestampPrecision::Millis))
        .init();

    // Flags override the config file; the file's own defaults fill the rest.
    let (targets, port, broadcast, delay_bounds) = match args.config {
        Some(path) => {
            let cfg = Config::from_file(path)?;
            (
                cfg.mac_addresses,
                args.port.unwrap_or(cfg.wol_port),
                args.broadcast.unwrap_or(cfg.broadcast_address),
                (
                    args.delay_min.unwrap_or(cfg.delay_range.0),
                    args.delay_max.unwrap_or(cfg.delay_range.1),
                ),
            )
        }
        None => (
            args.mac_addresses,
            args.port.unwrap_or(config::DEFAULT_WOL_PORT),
            args.broadcast
                .unwrap_or_else(|| config::DEFAULT_BROADCAST_ADDRESS.to_string()),
            (
                args.delay_min.unwrap_or(config::DEFAULT_DELAY_RANGE.0),
                args.delay_max.unwrap_or(config::DEFAULT_DELAY_RANGE.1),
            ),
        ),
    };
    let delay = DelayRange::from_secs(delay_bounds.0, delay_bounds.1)?;

    info!("preparing to wake {} devices", targets.len());
    let report = wol::send_batch(
        &targets,
        &SendOptions {
            broadcast,
            port,
            delay,
        },
    );
    info!(
        "done: {} succeeded, {} failed",
        report.successes.len(),
        report.failures.len()
    );
    for (raw, reason) in &report.failures {
        error!("{:?}: {}", raw, reason);
    }
    if report.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
