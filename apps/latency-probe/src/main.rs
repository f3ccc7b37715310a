//! Latency Probe Binary
//!
//! Submits one order through the trading session, cancels it after the
//! acknowledgment, and prints nanosecond timing markers around the submit
//! round-trip.
//!
//! # Usage
//!
//! ```bash
//! latency-probe                            # uses order_config.toml
//! latency-probe --no-timing                # disable timing markers
//! latency-probe --config custom.toml      # custom config file
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)
//!
//! # Exit Codes
//!
//! - 0: full lifecycle completed (submit ack and cancel ack both received)
//! - 1: configuration error, connect/login failure, submission rejection, or
//!   an acknowledgment timeout

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use latency_probe::config::{self, DEFAULT_CONFIG_PATH};
use latency_probe::lifecycle::{LifecycleError, OrderLifecycle};
use latency_probe::session::TradingSession;
use latency_probe::session::sim::SimSession;
use latency_probe::timing::TimingMarkers;

/// Command-line surface.
#[derive(Debug, Parser)]
#[command(
    name = "latency-probe",
    about = "Single-order submit/cancel latency measurement harness"
)]
struct Cli {
    /// Disable the ===START===/===END===/TOTAL_NS timing markers.
    #[arg(long)]
    no_timing: bool,

    /// Path to the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(lifecycle_err) = err.downcast_ref::<LifecycleError>() {
                tracing::error!(
                    state = %lifecycle_err.terminal_state(),
                    "lifecycle ended early"
                );
            }
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration, bring the session up, and run the lifecycle once.
fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load_config(&cli.config)?;
    // An unrecognized order token is fatal here, before anything touches the
    // session: a misconfigured order must never be submitted.
    let order = config.order.to_request()?;
    let probe = &config.probe;

    let session = SimSession::new(probe.sim_ack_delay());

    if !session.connect() {
        anyhow::bail!("failed to connect");
    }
    std::thread::sleep(probe.session_pause());
    if !session.login() {
        anyhow::bail!("failed to login");
    }
    std::thread::sleep(probe.session_pause());
    tracing::info!(symbol = %order.symbol, "connected and logged in");

    let markers = TimingMarkers::stderr(!cli.no_timing);
    let lifecycle = OrderLifecycle::new(probe.lifecycle_options(), markers);
    let report = lifecycle.run(&session, &order)?;

    if let Some(timing) = report.timing {
        tracing::info!(total_ns = timing.total_ns(), "submit round-trip measured");
    }
    if let Ok(summary) = serde_json::to_string(&report) {
        tracing::debug!(%summary, "run report");
    }
    Ok(())
}

/// Initialize the tracing subscriber with environment filter, writing to
/// stderr so the timing markers and diagnostics share one stream.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("latency_probe=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
