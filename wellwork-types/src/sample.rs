//! Sensor samples and averaged telemetry.

/// One temperature/humidity reading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimateReading {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent.
    pub humidity_pct: f32,
}

impl ClimateReading {
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
        }
    }

    /// Returns true when neither value is NaN.
    ///
    /// Sensors such as the DHT family report a failed read as NaN rather than
    /// an error, so callers check this before using a reading.
    pub fn is_valid(&self) -> bool {
        !self.temperature_c.is_nan() && !self.humidity_pct.is_nan()
    }
}

/// A complete per-cycle sample fed into the averaging window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Smoothed light intensity, never zero.
    pub light_raw: u16,
}

impl SensorSample {
    pub const fn new(climate: ClimateReading, light_raw: u16) -> Self {
        Self {
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            light_raw,
        }
    }
}

/// Window means, ready for upload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryPoint {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Truncating mean of the light samples.
    pub light: u32,
    /// Truncating mean of the health scores.
    pub score: u8,
    /// Number of samples the means were computed over.
    pub samples: u32,
}

impl TelemetryPoint {
    /// Light value as sent to the endpoint, which rejects a literal zero.
    pub const fn light_for_upload(&self) -> u32 {
        if self.light == 0 {
            1
        } else {
            self.light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_reading_is_invalid() {
        assert!(ClimateReading::new(22.0, 45.0).is_valid());
        assert!(!ClimateReading::new(f32::NAN, 45.0).is_valid());
        assert!(!ClimateReading::new(22.0, f32::NAN).is_valid());
    }

    #[test]
    fn zero_light_is_remapped_for_upload() {
        let point = TelemetryPoint {
            light: 0,
            ..Default::default()
        };
        assert_eq!(point.light_for_upload(), 1);

        let point = TelemetryPoint {
            light: 812,
            ..Default::default()
        };
        assert_eq!(point.light_for_upload(), 812);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn telemetry_point_serializes_field_names() {
        let point = TelemetryPoint {
            temperature_c: 24.5,
            humidity_pct: 51.0,
            light: 640,
            score: 100,
            samples: 6,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["light"], 640);
        assert_eq!(json["score"], 100);
        assert_eq!(json["samples"], 6);
    }
}
