//! Coordinates and straight-line position interpolation.

use serde::Serialize;

use crate::types::DbId;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// The location-relevant subset of a station row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationPoint {
    pub id: DbId,
    pub position: Position,
}

/// Linear interpolation between two positions.
///
/// `ratio` is the elapsed fraction of the trip: 0.0 yields `from`,
/// 1.0 yields `to`. Callers are responsible for keeping it in [0, 1].
pub fn interpolate(from: Position, to: Position, ratio: f64) -> Position {
    Position {
        latitude: from.latitude + (to.latitude - from.latitude) * ratio,
        longitude: from.longitude + (to.longitude - from.longitude) * ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Position = Position {
        latitude: 45.75,
        longitude: 4.85,
    };
    const B: Position = Position {
        latitude: 45.77,
        longitude: 4.87,
    };

    #[test]
    fn ratio_zero_is_departure() {
        assert_eq!(interpolate(A, B, 0.0), A);
    }

    #[test]
    fn ratio_one_is_arrival() {
        assert_eq!(interpolate(A, B, 1.0), B);
    }

    #[test]
    fn midpoint() {
        let mid = interpolate(
            Position {
                latitude: 0.0,
                longitude: 0.0,
            },
            Position {
                latitude: 1.0,
                longitude: 1.0,
            },
            0.5,
        );
        assert!((mid.latitude - 0.5).abs() < 1e-12);
        assert!((mid.longitude - 0.5).abs() < 1e-12);
    }
}
