//! Mapper trait

/// Largest value a MIDI control change can carry
pub const CONTROL_MAX: u8 = 127;

/// Trait for pressure-to-control mappings
pub trait Mapper: Send + Sync {
    /// Map a pressure reading to a control value in `0..=CONTROL_MAX`
    fn map(&self, pressure: f64) -> u8;
}

impl<F> Mapper for F
where
    F: Fn(f64) -> u8 + Send + Sync,
{
    fn map(&self, pressure: f64) -> u8 {
        self(pressure).min(CONTROL_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_mapper_is_bounded() {
        let wild = |_pressure: f64| 200u8;
        assert_eq!(wild.map(0.0), CONTROL_MAX);

        let half = |pressure: f64| (pressure / 2.0) as u8;
        assert_eq!(half.map(100.0), 50);
    }
}
