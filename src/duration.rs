use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("min", 60_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse duration strings like "2.5s", "500ms", "1m", "0.5h"
///
/// The result is truncated to whole milliseconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {}", s);
            }
            return Ok(Duration::from_millis((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Parse a duration and return it in milliseconds.
pub fn parse_millis(s: &str) -> Result<u64> {
    Ok(parse_duration(s)?.as_millis() as u64)
}
