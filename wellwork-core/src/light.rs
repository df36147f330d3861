//! Light smoothing and classification.

/// Raw reads averaged per cycle.
pub const LIGHT_SAMPLES: usize = 3;

/// Below this level the room is dark.
pub const DARK_THRESHOLD: u16 = 100;

/// Above this level the room is brightly lit.
pub const BRIGHT_THRESHOLD: u16 = 2000;

/// Integer mean of the raw reads. A zero mean is a measurement artifact and
/// becomes 1.
pub fn smooth(reads: [u16; LIGHT_SAMPLES]) -> u16 {
    let sum: u32 = reads.iter().map(|&r| u32::from(r)).sum();
    let mean = (sum / LIGHT_SAMPLES as u32) as u16;
    mean.max(1)
}

/// A smoothed light level and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightLevel {
    pub value: u16,
}

impl LightLevel {
    pub fn from_reads(reads: [u16; LIGHT_SAMPLES]) -> Self {
        Self {
            value: smooth(reads),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.value < DARK_THRESHOLD
    }

    pub fn is_bright(&self) -> bool {
        self.value > BRIGHT_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_reads_become_one() {
        assert_eq!(smooth([0, 0, 0]), 1);
        // 2 / 3 truncates to zero, which is also coerced.
        assert_eq!(smooth([0, 0, 2]), 1);
    }

    #[test]
    fn mean_truncates() {
        assert_eq!(smooth([100, 101, 101]), 100);
        assert_eq!(smooth([4095, 4095, 4095]), 4095);
    }

    #[test]
    fn classification_thresholds() {
        assert!(LightLevel::from_reads([99, 99, 99]).is_dark());
        assert!(!LightLevel::from_reads([100, 100, 100]).is_dark());
        assert!(!LightLevel::from_reads([2000, 2000, 2000]).is_bright());
        assert!(LightLevel::from_reads([2001, 2001, 2001]).is_bright());
    }

    #[test]
    fn coerced_zero_is_still_dark() {
        let level = LightLevel::from_reads([0, 0, 0]);
        assert_eq!(level.value, 1);
        assert!(level.is_dark());
    }
}
