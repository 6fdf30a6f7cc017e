//! Bike lifecycle status.

/// Status of a bike in the fleet.
///
/// Stored in the `bikes.status` column as the snake_case code; serialized
/// into the telemetry feed as the legacy French label the IoT consumers
/// expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BikeStatus {
    Available,
    Rented,
    Maintenance,
}

impl BikeStatus {
    /// Code stored in the database.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
        }
    }

    /// Parse a database code. Returns `None` for unknown codes.
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "rented" => Some(Self::Rented),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    /// Label used in the telemetry feed (legacy wire format).
    pub fn feed_label(self) -> &'static str {
        match self {
            Self::Available => "disponible",
            Self::Rented => "en_location",
            Self::Maintenance => "maintenance",
        }
    }

    /// All statuses, in seed order.
    pub const ALL: [BikeStatus; 3] = [Self::Available, Self::Rented, Self::Maintenance];
}

impl serde::Serialize for BikeStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.feed_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_codes_round_trip() {
        for status in BikeStatus::ALL {
            assert_eq!(BikeStatus::from_db_str(status.as_db_str()), Some(status));
        }
    }

    #[test]
    fn unknown_db_code_rejected() {
        assert_eq!(BikeStatus::from_db_str("DISPO"), None);
    }

    #[test]
    fn feed_labels_are_stable() {
        assert_eq!(BikeStatus::Available.feed_label(), "disponible");
        assert_eq!(BikeStatus::Rented.feed_label(), "en_location");
        assert_eq!(BikeStatus::Maintenance.feed_label(), "maintenance");
    }

    #[test]
    fn serializes_as_feed_label() {
        let json = serde_json::to_string(&BikeStatus::Rented).unwrap();
        assert_eq!(json, "\"en_location\"");
    }
}
