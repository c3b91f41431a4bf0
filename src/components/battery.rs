//! Battery: the circuit's power source.

use super::{AssetHandle, ConnectionPoint};
use crate::geometry::PixelPoint;

/// Vertical offset of each terminal from the battery center, in pixels.
const TERMINAL_OFFSET: f64 = 20.0;

/// A two-terminal battery.
///
/// Terminal 0 is the positive pole (above the body), terminal 1 the
/// negative pole (below). Loop resolution starts from the positive pole.
#[derive(Debug, Clone)]
pub struct Battery {
    pub position: PixelPoint,
    pub connection_points: Vec<ConnectionPoint>,
    pub voltage: f64,
    pub asset: AssetHandle,
}

impl Battery {
    /// Terminal index of the positive pole.
    pub const POSITIVE_TERMINAL: usize = 0;
    /// Terminal index of the negative pole.
    pub const NEGATIVE_TERMINAL: usize = 1;

    /// Create a battery centered at `(x, y)`.
    pub fn new(x: f64, y: f64, voltage: f64, asset: AssetHandle) -> Self {
        let connection_points = vec![
            ConnectionPoint::labeled(PixelPoint::new(x, y - TERMINAL_OFFSET), "positive"),
            ConnectionPoint::labeled(PixelPoint::new(x, y + TERMINAL_OFFSET), "negative"),
        ];
        Self {
            position: PixelPoint::new(x, y),
            connection_points,
            voltage,
            asset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_layout() {
        let battery = Battery::new(100.0, 100.0, 1.5, AssetHandle(0));

        let positive = &battery.connection_points[Battery::POSITIVE_TERMINAL];
        assert_eq!(positive.position, PixelPoint::new(100.0, 80.0));
        assert_eq!(positive.label.as_deref(), Some("positive"));

        let negative = &battery.connection_points[Battery::NEGATIVE_TERMINAL];
        assert_eq!(negative.position, PixelPoint::new(100.0, 120.0));
        assert!(negative.connected.is_none());
    }
}
