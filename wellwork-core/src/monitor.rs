//! The per-cycle monitoring loop.

use tracing::{debug, info, warn};
use wellwork_types::{
    Assessment, ClimateReading, CycleReport, DayMessage, Indicator, IndicatorStates,
    SensorSample, UploadOutcome,
};

use crate::accumulator::SampleAccumulator;
use crate::breaks::BreakScheduler;
use crate::clock::VirtualClock;
use crate::config::MonitorConfig;
use crate::error::{ConfigError, SensorError};
use crate::hal::{ClimateSensor, Indicators, LightSensor, Uplink};
use crate::light::{LightLevel, LIGHT_SAMPLES};
use crate::scorer::{self, Conditions};

/// Mutable state carried from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorState {
    pub accumulator: SampleAccumulator,
    pub breaks: BreakScheduler,
    /// Monotonic time of the last telemetry emission, successful or not.
    pub last_emit_ms: u64,
    /// Last value written to each indicator.
    pub indicators: IndicatorStates,
    pub cycles: u64,
}

/// Orchestrates sensors, scoring, averaging, upload and breaks.
///
/// One call to [`MonitorLoop::run_cycle`] runs a complete cycle. The caller
/// owns the cadence.
#[derive(Debug)]
pub struct MonitorLoop<C, L, I, U> {
    clock: VirtualClock,
    upload_interval_ms: u64,
    state: MonitorState,
    climate: C,
    light: L,
    indicators: I,
    uplink: U,
}

impl<C, L, I, U> MonitorLoop<C, L, I, U>
where
    C: ClimateSensor,
    L: LightSensor,
    I: Indicators,
    U: Uplink,
{
    /// Create a loop whose virtual day and first averaging window start at
    /// `start_ms`.
    pub fn new(
        config: &MonitorConfig,
        start_ms: u64,
        climate: C,
        light: L,
        indicators: I,
        uplink: U,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = VirtualClock::from_config(config, start_ms)?;
        Ok(Self {
            clock,
            upload_interval_ms: config.upload_interval_ms,
            state: MonitorState {
                last_emit_ms: start_ms,
                ..Default::default()
            },
            climate,
            light,
            indicators,
            uplink,
        })
    }

    /// Drive every indicator to its safe off state.
    pub fn startup(&mut self) {
        for indicator in Indicator::ALL {
            self.set_indicator(indicator, false);
        }
        info!("indicators cleared");
    }

    /// Re-anchor the virtual day and the averaging window at `start_ms`.
    ///
    /// Used once the network gate has opened, so the day starts when the
    /// monitor actually begins cycling.
    pub fn restart(&mut self, start_ms: u64) {
        self.clock = self.clock.rebased(start_ms);
        self.state.last_emit_ms = start_ms;
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    pub fn uplink(&self) -> &U {
        &self.uplink
    }

    /// Run one monitoring cycle at monotonic time `now_ms`.
    pub async fn run_cycle(&mut self, now_ms: u64) -> CycleReport {
        self.state.cycles += 1;
        let time = self.clock.now(now_ms);
        let light = self.read_light();
        info!(
            cycle = self.state.cycles,
            time = %time,
            light = light.value,
            dark = light.is_dark(),
            "virtual time {time}"
        );

        let climate = match self.read_climate() {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!(error = %e, "climate reading failed, skipping scoring and upload");
                None
            }
        };

        let mut assessment = None;
        let mut upload = UploadOutcome::Idle;
        if let Some(reading) = climate {
            let conditions = Conditions::evaluate(
                reading.temperature_c,
                reading.humidity_pct,
                time.hour,
                light.is_dark(),
            );
            let evaluated = scorer::assess(&conditions);
            log_assessment(&reading, &evaluated);

            self.set_indicator(Indicator::Temperature, conditions.temperature_out_of_range());
            self.set_indicator(Indicator::Humidity, conditions.humidity_out_of_range());

            self.state
                .accumulator
                .accumulate(&SensorSample::new(reading, light.value), evaluated.score);
            debug!(
                buffered = self.state.accumulator.count(),
                "sample added to averaging window"
            );

            if self.state.accumulator.should_emit(
                now_ms,
                self.state.last_emit_ms,
                self.upload_interval_ms,
            ) {
                upload = self.emit(now_ms).await;
            }
            assessment = Some(evaluated);
        }

        self.set_indicator(Indicator::DarkAtWork, light.is_dark() && time.is_work_hours());
        self.set_indicator(Indicator::BrightAtNight, light.is_bright() && time.is_night());

        let tick = self.state.breaks.tick(time);
        for event in &tick.fired {
            self.indicators.sound_alert(event.tone);
            info!(
                kind = %event.kind,
                status = self.state.breaks.status().code(),
                total = event.total_taken,
                "{}",
                event.kind.reminder()
            );
        }
        if tick.day_reset {
            info!("new virtual day, break schedule reset");
        }

        let day_message = DayMessage::for_hour(time.hour);
        if let Some(message) = day_message {
            info!("{}", message.text());
        }

        CycleReport {
            cycle: self.state.cycles,
            time,
            light: light.value,
            dark: light.is_dark(),
            bright: light.is_bright(),
            climate,
            assessment,
            indicators: self.state.indicators,
            buffered: self.state.accumulator.count(),
            upload,
            break_status: self.state.breaks.status(),
            breaks_taken: self.state.breaks.total_taken(),
            fired: tick.fired.iter().map(|e| e.kind).collect(),
            day_reset: tick.day_reset,
            day_message,
        }
    }

    fn read_light(&mut self) -> LightLevel {
        let mut reads = [0u16; LIGHT_SAMPLES];
        for read in reads.iter_mut() {
            *read = self.light.read_raw();
        }
        LightLevel::from_reads(reads)
    }

    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        let reading = self.climate.read()?;
        if reading.is_valid() {
            Ok(reading)
        } else {
            Err(SensorError::Unavailable)
        }
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.set_indicator(indicator, on);
        self.state.indicators.set(indicator, on);
    }

    /// Drain the window and try to upload it. The window is consumed and the
    /// emission time advanced whatever the upload outcome.
    async fn emit(&mut self, now_ms: u64) -> UploadOutcome {
        let Some(point) = self.state.accumulator.drain_means() else {
            return UploadOutcome::Idle;
        };
        self.state.last_emit_ms = now_ms;

        info!(
            samples = point.samples,
            temperature_c = %format!("{:.1}", point.temperature_c),
            humidity_pct = %format!("{:.1}", point.humidity_pct),
            light = point.light,
            score = point.score,
            "window averaged"
        );

        if !self.uplink.is_connected() {
            warn!("network unavailable, window discarded");
            return UploadOutcome::Offline { point };
        }

        match self.uplink.upload(&point).await {
            Ok(()) => {
                info!("telemetry uploaded");
                UploadOutcome::Sent { point }
            }
            Err(e) => {
                warn!(error = %e, "telemetry upload failed, window discarded");
                UploadOutcome::Failed {
                    point,
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn log_assessment(reading: &ClimateReading, assessment: &Assessment) {
    info!(
        temperature_c = reading.temperature_c,
        humidity_pct = reading.humidity_pct,
        score = assessment.score,
        alerts = assessment.alerts,
        "environment {} ({}/100)",
        assessment.tier.symbol(),
        assessment.score
    );
    for item in &assessment.advice {
        info!(urgent = item.urgent, "action: {item}");
    }
}
