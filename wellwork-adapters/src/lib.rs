//! # wellwork-adapters
//!
//! Concrete collaborators for the WellWork monitoring loop.
//!
//! - **ThingSpeak** (`thingspeak` feature) - uploads averaged telemetry
//!   windows through the channel update HTTP API
//! - **Network gate** - TCP reachability probe and the blocking startup
//!   connection gate
//! - **Synthetic sensors** - seeded random-walk climate and light
//! - **Replay sensors** - recorded readings from a JSON-lines file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use tokio::sync::watch;
//! use wellwork_adapters::network::{wait_for_network, GatePolicy, TcpProbe};
//! use wellwork_adapters::thingspeak::{ThingSpeakUplink, DEFAULT_BASE_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let uplink = ThingSpeakUplink::builder()
//!         .api_key("XXXXXXXXXXXXXXXX")
//!         .build()?;
//!     let probe = TcpProbe::for_url(DEFAULT_BASE_URL, Duration::from_secs(2))?;
//!     let (_stop, mut stopped) = watch::channel(false);
//!
//!     let report = wait_for_network(&probe, uplink.link(), &GatePolicy::default(), &mut stopped).await?;
//!     println!("online after {} attempts", report.attempts);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod network;
pub mod replay;
pub mod simulated;

#[cfg(feature = "thingspeak")]
pub mod thingspeak;

pub use error::AdapterError;
pub use network::{
    parse_endpoint, stop_requested, wait_for_network, GatePolicy, GateReport, LinkState, Probe, TcpProbe,
};
pub use replay::ReplayFeed;
pub use simulated::SyntheticEnvironment;

// Re-export types for convenience
pub use wellwork_core::{SensorError, TelemetryPoint, UploadError};
