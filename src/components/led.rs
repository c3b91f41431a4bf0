//! LED: an indicator load.

use super::{AssetHandle, ConnectionPoint};
use crate::geometry::PixelPoint;

const TERMINAL_OFFSET: f64 = 5.0;

/// A two-terminal LED.
///
/// Terminal 0 is the anode, terminal 1 the cathode. `is_on` is display
/// state driven by the host from the resolved circuit.
#[derive(Debug, Clone)]
pub struct Led {
    pub position: PixelPoint,
    pub connection_points: Vec<ConnectionPoint>,
    pub is_on: bool,
    pub asset: AssetHandle,
}

impl Led {
    /// Create an LED centered at `(x, y)`.
    pub fn new(x: f64, y: f64, asset: AssetHandle) -> Self {
        let connection_points = vec![
            ConnectionPoint::labeled(PixelPoint::new(x, y - TERMINAL_OFFSET), "anode"),
            ConnectionPoint::labeled(PixelPoint::new(x, y + TERMINAL_OFFSET), "cathode"),
        ];
        Self {
            position: PixelPoint::new(x, y),
            connection_points,
            is_on: false,
            asset,
        }
    }

    /// Light the LED.
    pub fn power_on(&mut self) {
        self.is_on = true;
    }

    /// Darken the LED.
    pub fn power_off(&mut self) {
        self.is_on = false;
    }

    /// Flip the display state.
    pub fn toggle(&mut self) {
        self.is_on = !self.is_on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state() {
        let mut led = Led::new(0.0, 0.0, AssetHandle(0));
        assert!(!led.is_on);
        led.power_on();
        assert!(led.is_on);
        led.power_off();
        assert!(!led.is_on);
    }
}
