//! Host runtime: startup, connection gate and the cadence loop.
//!
//! ```text
//!  startup (LEDs off) ──▶ connection gate ──▶ restart clock ──▶ cycle ◀─┐
//!                          (skipped offline)                      │     │
//!                                                                 ▼     │
//!                                                        report file    │
//!                                                                 │     │
//!                                                     sleep / stop ─────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use wellwork_adapters::network::{
    stop_requested, wait_for_network, GatePolicy, LinkState, Probe, TcpProbe,
};
use wellwork_adapters::replay::ReplayFeed;
use wellwork_adapters::simulated::SyntheticEnvironment;
use wellwork_adapters::thingspeak::ThingSpeakUplink;
use wellwork_adapters::AdapterError;
use wellwork_core::hal::{ClimateSensor, Clock, Indicators, LightSensor, MonotonicClock, Uplink};
use wellwork_core::MonitorLoop;
use wellwork_types::{CycleReport, UploadOutcome};

use crate::console::ConsoleIndicators;
use crate::report::write_report;
use crate::settings::{SensorSettings, SensorSource, Settings};

/// How long to run and where to put per-cycle output.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub cycle_period: Duration,
    /// Stop after this many cycles. `None` runs until stopped.
    pub cycles: Option<u64>,
    /// Overwrite this file with each cycle's report.
    pub report: Option<PathBuf>,
}

/// The startup connection gate and the link it guards.
#[derive(Debug)]
pub struct Gate<P> {
    pub probe: P,
    pub link: LinkState,
    pub policy: GatePolicy,
}

/// Totals over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub uploads_sent: u64,
    pub uploads_failed: u64,
    /// Windows discarded because the network was down.
    pub windows_dropped: u64,
    pub sensor_failures: u64,
    pub breaks_fired: u64,
}

impl RunSummary {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        match report.upload {
            UploadOutcome::Idle => {}
            UploadOutcome::Sent { .. } => self.uploads_sent += 1,
            UploadOutcome::Offline { .. } => self.windows_dropped += 1,
            UploadOutcome::Failed { .. } => self.uploads_failed += 1,
        }
        if report.climate.is_none() {
            self.sensor_failures += 1;
        }
        self.breaks_fired += report.fired.len() as u64;
    }
}

/// Run the monitor until `options.cycles` is reached or `stop` fires.
///
/// With a gate, nothing is sampled until the network is reachable. A stop
/// during the gate ends the run cleanly with zero cycles.
pub async fn run<C, L, I, U, P, K>(
    monitor: &mut MonitorLoop<C, L, I, U>,
    clock: &K,
    gate: Option<&Gate<P>>,
    options: &RunOptions,
    stop: &mut watch::Receiver<bool>,
) -> Result<RunSummary>
where
    C: ClimateSensor,
    L: LightSensor,
    I: Indicators,
    U: Uplink,
    P: Probe,
    K: Clock,
{
    monitor.startup();

    if let Some(gate) = gate {
        match wait_for_network(&gate.probe, &gate.link, &gate.policy, stop).await {
            Ok(_) => {}
            Err(AdapterError::Cancelled) => {
                info!("stopped while waiting for network");
                return Ok(RunSummary::default());
            }
            Err(e) => return Err(e).context("network gate failed"),
        }
    }

    monitor.restart(clock.now_ms());
    info!(
        cycle_period_ms = options.cycle_period.as_millis() as u64,
        "monitoring started"
    );

    let mut summary = RunSummary::default();
    loop {
        let report = monitor.run_cycle(clock.now_ms()).await;
        summary.record(&report);

        if let Some(path) = &options.report {
            if let Err(e) = write_report(path, &report).await {
                warn!(error = %e, "cycle report not written");
            }
        }

        if options.cycles.is_some_and(|max| summary.cycles >= max) {
            break;
        }

        tokio::select! {
            _ = pause(options.cycle_period, gate) => {}
            _ = stop_requested(stop) => {
                info!("stop requested");
                break;
            }
        }
    }

    info!(
        cycles = summary.cycles,
        sent = summary.uploads_sent,
        failed = summary.uploads_failed,
        dropped = summary.windows_dropped,
        sensor_failures = summary.sensor_failures,
        breaks = summary.breaks_fired,
        "monitoring stopped"
    );
    Ok(summary)
}

// Sleep one cadence period. A down link is re-probed during the sleep and
// the probe is cut off at the period's end.
async fn pause<P: Probe>(period: Duration, gate: Option<&Gate<P>>) {
    let restore = async {
        let Some(gate) = gate else { return };
        if gate.link.is_up() {
            return;
        }
        match timeout(period, gate.probe.probe()).await {
            Ok(true) => {
                gate.link.set(true);
                info!("network link restored");
            }
            Ok(false) => debug!("network link still down"),
            Err(_) => debug!("link probe cut off at cycle boundary"),
        }
    };
    tokio::join!(sleep(period), restore);
}

/// Build the collaborators described by `settings` and run the monitor.
///
/// `offline` skips the connection gate; without an API key the gate is
/// skipped too. In both cases averaged windows are discarded.
pub async fn launch(
    settings: &Settings,
    offline: bool,
    options: &RunOptions,
    stop: &mut watch::Receiver<bool>,
) -> Result<RunSummary> {
    settings.monitor.validate()?;
    let (climate, light) = sensors(&settings.sensors)?;

    let api_key = settings.api_key();
    let link = LinkState::new();
    let uplink = ThingSpeakUplink::builder()
        .base_url(settings.uplink.base_url.as_str())
        .api_key(api_key.unwrap_or_default())
        .fields(settings.uplink.fields)
        .timeout(settings.uplink.request_timeout())
        .link(link.clone())
        .build()?;

    let gate = if offline {
        info!("offline mode, connection gate skipped");
        None
    } else if api_key.is_none() {
        warn!("no API key configured, running offline");
        None
    } else {
        let probe = TcpProbe::for_url(&settings.uplink.base_url, settings.network.probe_timeout())?;
        Some(Gate {
            probe,
            link,
            policy: settings.network.gate_policy(),
        })
    };

    info!(
        seconds_per_virtual_hour = settings.monitor.seconds_per_virtual_hour,
        start_hour = settings.monitor.start_hour,
        upload_interval = ?settings.monitor.upload_interval(),
        "monitor configured"
    );
    let clock = MonotonicClock::new();
    let mut monitor = MonitorLoop::new(
        &settings.monitor,
        clock.now_ms(),
        climate,
        light,
        ConsoleIndicators::new(),
        uplink,
    )?;

    run(&mut monitor, &clock, gate.as_ref(), options, stop).await
}

fn sensors(settings: &SensorSettings) -> Result<(Box<dyn ClimateSensor>, Box<dyn LightSensor>)> {
    match settings.source {
        SensorSource::Synthetic => {
            info!(seed = settings.seed, dropout = settings.dropout, "using synthetic sensors");
            let (climate, light) = SyntheticEnvironment::new(settings.seed)
                .with_dropout(settings.dropout)
                .into_sensors();
            Ok((Box::new(climate), Box::new(light)))
        }
        SensorSource::Replay => {
            let path = settings
                .replay_path
                .as_deref()
                .context("sensors.replay_path is required when sensors.source is \"replay\"")?;
            let feed = ReplayFeed::load(path)
                .with_context(|| format!("failed to load replay file {}", path.display()))?;
            info!(path = %path.display(), records = feed.len(), "replaying recorded sensors");
            let (climate, light) = feed.into_sensors();
            Ok((Box::new(climate), Box::new(light)))
        }
    }
}
