use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wellwork::{launch, Overrides, RunOptions, Settings};

#[derive(Parser, Debug)]
#[command(name = "wellwork")]
#[command(version, about = "Workplace well-being monitor with ThingSpeak telemetry")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ThingSpeak channel write API key
    #[arg(long)]
    api_key: Option<String>,

    /// Skip the network gate and discard telemetry
    #[arg(long)]
    offline: bool,

    /// Overwrite this file with a JSON report after every cycle
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Stop after this many cycles
    #[arg(short = 'n', long)]
    cycles: Option<u64>,

    /// Delay between cycles (e.g., "2.5s", "500ms")
    #[arg(long)]
    cycle_period: Option<String>,

    /// Minimum time between uploads (e.g., "15s", "1m")
    #[arg(long)]
    upload_interval: Option<String>,

    /// Replay sensor readings from a JSON-lines file
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Seed for the synthetic sensors
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            cycle_period: self.cycle_period.clone(),
            upload_interval: self.upload_interval.clone(),
            replay: self.replay.clone(),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply(&args.overrides())?;

    let options = RunOptions {
        cycle_period: settings.monitor.cycle_period(),
        cycles: args.cycles,
        report: args.report.clone(),
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("ctrl-c received, stopping");
                    let _ = stop_tx.send(true);
                }
                Err(e) => warn!(error = %e, "ctrl-c handler unavailable"),
            }
        });

        launch(&settings, args.offline, &options, &mut stop_rx).await?;
        Ok(())
    })
}
