//! Touch records and frames as delivered by the hardware

/// 2D point in device coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Position plus velocity
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub position: Point,
    pub velocity: Point,
}

/// A single contact point.
///
/// The field order matches the `MTTouch` record of the macOS multitouch
/// framework so that frames can be borrowed straight from the driver.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchPoint {
    pub frame: i32,
    pub timestamp: f64,
    pub identifier: i32,
    pub state: i32,
    pub finger_id: i32,
    pub hand_id: i32,
    pub normalized: Vector,
    pub total: f32,
    /// Force magnitude, roughly 0..1700 on current trackpads
    pub pressure: f32,
    pub angle: f32,
    pub major_axis: f32,
    pub minor_axis: f32,
    pub absolute: Vector,
    pub reserved: [i32; 2],
    pub density: f32,
}

impl TouchPoint {
    /// Create a touch point carrying only a pressure reading
    pub fn with_pressure(pressure: f32) -> Self {
        Self {
            pressure,
            ..Self::default()
        }
    }
}

/// One notification from the touch hardware
#[derive(Debug, Clone, Copy)]
pub struct TouchFrame<'a> {
    /// Every contact currently on the surface
    pub touches: &'a [TouchPoint],
    pub timestamp: f64,
    pub frame_id: i32,
}

impl<'a> TouchFrame<'a> {
    pub fn new(touches: &'a [TouchPoint], timestamp: f64, frame_id: i32) -> Self {
        Self {
            touches,
            timestamp,
            frame_id,
        }
    }

    /// Pressure of the last contact in the frame, or 0.0 once every finger lifted
    pub fn contact_pressure(&self) -> f64 {
        self.touches
            .last()
            .map_or(0.0, |touch| f64::from(touch.pressure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_has_zero_pressure() {
        let frame = TouchFrame::new(&[], 0.0, 1);
        assert_eq!(frame.contact_pressure(), 0.0);
    }

    #[test]
    fn test_last_touch_wins() {
        let touches = [
            TouchPoint::with_pressure(900.0),
            TouchPoint::with_pressure(1500.0),
            TouchPoint::with_pressure(320.5),
        ];
        let frame = TouchFrame::new(&touches, 12.5, 7);
        assert_eq!(frame.contact_pressure(), 320.5);
    }

    #[test]
    fn test_touch_layout_matches_driver_record() {
        // MTTouch is 96 bytes with the f64 timestamp forcing 8-byte alignment
        assert_eq!(std::mem::size_of::<TouchPoint>(), 96);
        assert_eq!(std::mem::align_of::<TouchPoint>(), 8);
    }
}
