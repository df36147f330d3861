//! # wellwork
//!
//! Host runtime for the WellWork workplace monitor.
//!
//! The monitoring loop itself lives in `wellwork-core`. This crate composes
//! it with concrete collaborators from `wellwork-adapters` and runs it on a
//! single-threaded tokio runtime:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        wellwork                          │
//! │  ┌──────────┐   ┌──────────┐   ┌────────────────────┐    │
//! │  │ settings │──▶│ runtime  │──▶│ MonitorLoop (core) │    │
//! │  └──────────┘   └────┬─────┘   └─────────┬──────────┘    │
//! │                      │                   │               │
//! │                      ▼                   ▼               │
//! │              network gate      sensors / console / uplink│
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`settings`]**: defaults, TOML file, `WELLWORK_*` environment and CLI
//!   overrides layered with the `config` crate
//! - **[`runtime`]**: startup, connection gate and the cadence loop
//! - **[`console`]**: indicators rendered as log events
//! - **[`report`]**: per-cycle JSON report file
//!
//! ## Usage
//!
//! ```bash
//! # Synthetic sensors, no network
//! wellwork --offline
//!
//! # Upload to ThingSpeak, replaying a recorded day
//! wellwork --api-key XXXXXXXXXXXXXXXX --replay office.jsonl --report cycle.json
//! ```

pub mod console;
pub mod duration;
pub mod report;
pub mod runtime;
pub mod settings;

pub use console::ConsoleIndicators;
pub use runtime::{launch, run, Gate, RunOptions, RunSummary};
pub use settings::{Overrides, Settings};
