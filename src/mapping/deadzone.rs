//! Deadzone-normalized linear mapper

use super::mapper::{Mapper, CONTROL_MAX};

/// Pressure that maps to the maximum control value
pub const DEFAULT_MAX_PRESSURE: f64 = 1700.0;

/// Pressure at or below which the output stays at zero
pub const DEFAULT_DEADZONE: f64 = 250.0;

/// Linear mapping of `deadzone..max_pressure` onto `0..=127`.
///
/// Readings at or below the deadzone (including negative and NaN ones) map to
/// 0, readings at or above `max_pressure` saturate at 127. In between the
/// value is floored, never rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadzoneMapper {
    deadzone: f64,
    max_pressure: f64,
}

impl DeadzoneMapper {
    pub fn new(deadzone: f64, max_pressure: f64) -> Self {
        Self {
            deadzone,
            max_pressure,
        }
    }

    pub fn deadzone(&self) -> f64 {
        self.deadzone
    }

    pub fn max_pressure(&self) -> f64 {
        self.max_pressure
    }
}

impl Default for DeadzoneMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE, DEFAULT_MAX_PRESSURE)
    }
}

impl Mapper for DeadzoneMapper {
    fn map(&self, pressure: f64) -> u8 {
        // Negated so NaN lands in the deadzone too
        if !(pressure > self.deadzone) {
            return 0;
        }

        let range = self.max_pressure - self.deadzone;
        if range <= 0.0 {
            return CONTROL_MAX;
        }

        let normalized = (pressure - self.deadzone) / range;
        let scaled = (normalized * f64::from(CONTROL_MAX)).floor();
        scaled.clamp(0.0, f64::from(CONTROL_MAX)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let mapper = DeadzoneMapper::default();

        assert_eq!(mapper.map(0.0), 0);
        assert_eq!(mapper.map(250.0), 0);
        assert_eq!(mapper.map(975.0), 63); // 0.5 * 127 floors to 63
        assert_eq!(mapper.map(1700.0), 127);
        assert_eq!(mapper.map(2000.0), 127);
    }

    #[test]
    fn test_deadzone_is_silent() {
        let mapper = DeadzoneMapper::default();
        for step in 0..=250 {
            assert_eq!(mapper.map(step as f64), 0);
        }
        assert_eq!(mapper.map(249.999), 0);
    }

    #[test]
    fn test_just_above_deadzone() {
        let mapper = DeadzoneMapper::default();
        // One control step is 1450 / 127 ~= 11.42 pressure units
        assert_eq!(mapper.map(250.001), 0);
        assert_eq!(mapper.map(262.0), 1);
    }

    #[test]
    fn test_saturates_above_max() {
        let mapper = DeadzoneMapper::default();
        assert_eq!(mapper.map(1699.0), 126);
        assert_eq!(mapper.map(10_000.0), 127);
        assert_eq!(mapper.map(f64::MAX), 127);
        assert_eq!(mapper.map(f64::INFINITY), 127);
    }

    #[test]
    fn test_negative_and_nan_map_to_zero() {
        let mapper = DeadzoneMapper::default();
        assert_eq!(mapper.map(-1.0), 0);
        assert_eq!(mapper.map(-5000.0), 0);
        assert_eq!(mapper.map(f64::NEG_INFINITY), 0);
        assert_eq!(mapper.map(f64::NAN), 0);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let mapper = DeadzoneMapper::default();
        let mut previous = 0u8;
        let mut pressure = -500.0;

        while pressure <= 2500.0 {
            let value = mapper.map(pressure);
            assert!(value <= CONTROL_MAX);
            assert!(value >= previous, "dropped from {previous} to {value} at {pressure}");
            previous = value;
            pressure += 0.5;
        }
        assert_eq!(previous, CONTROL_MAX);
    }

    #[test]
    fn test_custom_range() {
        let mapper = DeadzoneMapper::new(0.0, 1000.0);
        assert_eq!(mapper.map(250.0), 31);
        assert_eq!(mapper.map(500.0), 63);
        assert_eq!(mapper.map(1000.0), 127);
        assert_eq!(mapper.deadzone(), 0.0);
        assert_eq!(mapper.max_pressure(), 1000.0);
    }

    #[test]
    fn test_degenerate_range_is_a_step() {
        let mapper = DeadzoneMapper::new(500.0, 500.0);
        assert_eq!(mapper.map(500.0), 0);
        assert_eq!(mapper.map(500.5), 127);
    }
}
