//! Layered host settings.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. environment variables prefixed `WELLWORK_`, with `__` between the
//!    section and the key (`WELLWORK_UPLINK__API_KEY`)
//! 4. command-line overrides
//!
//! ```toml
//! [monitor]
//! seconds_per_virtual_hour = 5
//! cycle_period_ms = 2500
//!
//! [uplink]
//! api_key = "XXXXXXXXXXXXXXXX"
//! fields = { temperature = 1, humidity = 2, light = 3, score = 4 }
//!
//! [network]
//! max_attempts = 20
//!
//! [sensors]
//! source = "replay"
//! replay_path = "office.jsonl"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use wellwork_adapters::network::GatePolicy;
use wellwork_adapters::thingspeak::{FieldMap, DEFAULT_BASE_URL};
use wellwork_core::MonitorConfig;

use crate::duration::parse_millis;

pub const ENV_PREFIX: &str = "WELLWORK";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub monitor: MonitorConfig,
    pub uplink: UplinkSettings,
    pub network: NetworkSettings,
    pub sensors: SensorSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UplinkSettings {
    pub base_url: String,
    /// Channel write key. Without one the monitor runs offline.
    pub api_key: Option<String>,
    pub fields: FieldMap,
    pub request_timeout_ms: u64,
}

impl Default for UplinkSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            fields: FieldMap::default(),
            request_timeout_ms: 10_000,
        }
    }
}

impl UplinkSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub attempt_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub backoff_ms: u64,
    /// Timeout of a single TCP probe.
    pub probe_timeout_ms: u64,
    pub max_attempts: Option<u32>,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        let policy = GatePolicy::default();
        Self {
            attempt_timeout_ms: policy.attempt_timeout.as_millis() as u64,
            poll_interval_ms: policy.poll_interval.as_millis() as u64,
            backoff_ms: policy.backoff.as_millis() as u64,
            probe_timeout_ms: 2_000,
            max_attempts: policy.max_attempts,
        }
    }
}

impl NetworkSettings {
    pub fn gate_policy(&self) -> GatePolicy {
        GatePolicy {
            attempt_timeout: Duration::from_millis(self.attempt_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            backoff: Duration::from_millis(self.backoff_ms),
            max_attempts: self.max_attempts,
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Where sensor readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorSource {
    #[default]
    Synthetic,
    Replay,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub source: SensorSource,
    pub replay_path: Option<PathBuf>,
    pub seed: u64,
    /// Probability that a synthetic climate read fails.
    pub dropout: f64,
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub cycle_period: Option<String>,
    pub upload_interval: Option<String>,
    pub replay: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Load defaults, the optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(env)
            .build()
            .context("failed to load settings")?;

        config
            .try_deserialize()
            .context("invalid settings")
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(key) = &overrides.api_key {
            self.uplink.api_key = Some(key.clone());
        }
        if let Some(period) = &overrides.cycle_period {
            self.monitor.cycle_period_ms =
                parse_millis(period).context("invalid --cycle-period")?;
        }
        if let Some(interval) = &overrides.upload_interval {
            self.monitor.upload_interval_ms =
                parse_millis(interval).context("invalid --upload-interval")?;
        }
        if let Some(path) = &overrides.replay {
            self.sensors.source = SensorSource::Replay;
            self.sensors.replay_path = Some(path.clone());
        }
        if let Some(seed) = overrides.seed {
            self.sensors.seed = seed;
        }
        Ok(())
    }

    /// The configured API key, if it is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.uplink
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_with(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.monitor.cycle_period_ms, 2_500);
        assert_eq!(settings.uplink.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.network.gate_policy(), GatePolicy::default());
        assert_eq!(settings.sensors.source, SensorSource::Synthetic);
    }

    #[test]
    fn test_file_values() {
        let file = toml_file(
            r#"
[monitor]
seconds_per_virtual_hour = 60
start_hour = 8

[uplink]
api_key = "FILEKEY"
fields = { score = 8 }

[network]
max_attempts = 3

[sensors]
source = "replay"
replay_path = "office.jsonl"
"#,
        );

        let settings = Settings::load_with(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.monitor.seconds_per_virtual_hour, 60);
        assert_eq!(settings.monitor.start_hour, 8);
        assert_eq!(settings.monitor.upload_interval_ms, 15_000);
        assert_eq!(settings.api_key(), Some("FILEKEY"));
        assert_eq!(settings.uplink.fields.score, 8);
        assert_eq!(settings.uplink.fields.temperature, 1);
        assert_eq!(settings.network.gate_policy().max_attempts, Some(3));
        assert_eq!(settings.sensors.source, SensorSource::Replay);
        assert_eq!(
            settings.sensors.replay_path.as_deref(),
            Some(Path::new("office.jsonl"))
        );
    }

    #[test]
    fn test_environment_beats_file() {
        let file = toml_file("[uplink]\napi_key = \"FILEKEY\"\n");
        let settings = Settings::load_with(
            Some(file.path()),
            env(&[
                ("WELLWORK_UPLINK__API_KEY", "ENVKEY"),
                ("WELLWORK_MONITOR__CYCLE_PERIOD_MS", "1000"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.api_key(), Some("ENVKEY"));
        assert_eq!(settings.monitor.cycle_period_ms, 1_000);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load_with(Some(Path::new("/nonexistent/wellwork.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut settings = Settings::default();
        settings
            .apply(&Overrides {
                api_key: Some("CLIKEY".to_string()),
                cycle_period: Some("500ms".to_string()),
                upload_interval: Some("1m".to_string()),
                replay: Some(PathBuf::from("day.jsonl")),
                seed: Some(9),
            })
            .unwrap();

        assert_eq!(settings.api_key(), Some("CLIKEY"));
        assert_eq!(settings.monitor.cycle_period_ms, 500);
        assert_eq!(settings.monitor.upload_interval_ms, 60_000);
        assert_eq!(settings.sensors.source, SensorSource::Replay);
        assert_eq!(settings.sensors.seed, 9);
    }

    #[test]
    fn test_bad_override_duration() {
        let mut settings = Settings::default();
        let result = settings.apply(&Overrides {
            cycle_period: Some("soon".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let mut settings = Settings::default();
        settings.uplink.api_key = Some("   ".to_string());
        assert_eq!(settings.api_key(), None);
    }
}
