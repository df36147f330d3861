//! # wellwork-core
//!
//! The monitoring and decision loop of the WellWork workplace monitor.
//!
//! A free-running millisecond clock is mapped onto a compressed virtual day.
//! Every cycle the loop reads temperature, humidity and light, scores the
//! environment, drives the alert indicators, averages samples into telemetry
//! windows and reminds the user of their daily breaks.
//!
//! ```text
//!  Clock ──▶ VirtualClock ──▶ VirtualTime ─┬──▶ HealthScorer ──▶ LEDs
//!                                          │         │
//!  ClimateSensor / LightSensor ────────────┤         ▼
//!                                          │   SampleAccumulator ──▶ Uplink
//!                                          │
//!                                          └──▶ BreakScheduler ──▶ Buzzer
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wellwork_core::hal::{Clock, Disconnected, MonotonicClock};
//! use wellwork_core::{MonitorConfig, MonitorLoop};
//! # use wellwork_core::hal::{ClimateSensor, Indicators, LightSensor};
//! # use wellwork_core::SensorError;
//! # use wellwork_types::{ClimateReading, Indicator, Tone};
//! # struct Dht; impl ClimateSensor for Dht { fn read(&mut self) -> Result<ClimateReading, SensorError> { Ok(ClimateReading::new(22.0, 50.0)) } }
//! # struct Ldr; impl LightSensor for Ldr { fn read_raw(&mut self) -> u16 { 800 } }
//! # struct Leds; impl Indicators for Leds { fn set_indicator(&mut self, _: Indicator, _: bool) {} fn sound_alert(&mut self, _: Tone) {} }
//!
//! # async fn run() -> Result<(), wellwork_core::ConfigError> {
//! let clock = MonotonicClock::new();
//! let config = MonitorConfig::default();
//! let mut monitor = MonitorLoop::new(&config, clock.now_ms(), Dht, Ldr, Leds, Disconnected)?;
//! monitor.startup();
//!
//! loop {
//!     let report = monitor.run_cycle(clock.now_ms()).await;
//!     println!("{} score {:?}", report.time, report.assessment.map(|a| a.score));
//!     tokio::time::sleep(config.cycle_period()).await;
//! }
//! # }
//! ```

pub mod accumulator;
pub mod breaks;
pub mod clock;
pub mod config;
pub mod error;
pub mod hal;
pub mod light;
pub mod monitor;
pub mod scorer;

pub use accumulator::SampleAccumulator;
pub use breaks::{BreakEvent, BreakScheduler, Tick};
pub use clock::{virtual_hour, virtual_minute, VirtualClock};
pub use config::MonitorConfig;
pub use error::{ConfigError, SensorError, UploadError};
pub use light::LightLevel;
pub use monitor::{MonitorLoop, MonitorState};
pub use scorer::Conditions;

// Re-export types for convenience
pub use wellwork_types::{
    Advice, Assessment, BreakKind, BreakStatus, ClimateReading, CycleReport, Indicator,
    SensorSample, TelemetryPoint, Tier, Tone, VirtualTime,
};
