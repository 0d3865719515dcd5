//! Predicted standings as decoded from the engine and as presented.

use serde::{Deserialize, Serialize};

use crate::snapshot::POSITION_UNKNOWN;

/// One decoded engine response record.
///
/// The canonical response schema carries `cust_id`; a legacy engine variant
/// omits it (and may carry `car_number` instead), so both identity fields are
/// optional here. Ranks use the [`POSITION_UNKNOWN`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedStanding {
    /// Driver identity; absent in the legacy response schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cust_id: Option<i32>,

    /// Driver display name.
    pub driver_name: String,

    /// Championship rank before this race, 1-based.
    pub current_position: i32,

    /// Championship rank the engine expects after this race, 1-based.
    pub predicted_position: i32,

    /// Championship points before this race.
    pub current_points: i32,

    /// Championship points the engine expects after this race.
    pub predicted_points: i32,

    /// Engine-authoritative position change; positive means an anticipated
    /// gain. Absent in response variants that leave derivation to the
    /// client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<i32>,

    /// Car number as reported by a legacy engine variant. The live roster is
    /// authoritative for display; this field is carried for diagnostics
    /// only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_number: Option<String>,
}

impl PredictedStanding {
    /// Whether both ranks are known, i.e. a change indicator can be derived.
    pub fn has_known_ranks(&self) -> bool {
        self.current_position > POSITION_UNKNOWN && self.predicted_position > POSITION_UNKNOWN
    }
}

/// A predicted standing enriched with locally known display metadata.
///
/// Produced by the merge engine once per tick, in engine ranking order, and
/// handed to the rendering collaborator as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationRow {
    /// Driver identity when the response schema carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_id: Option<i32>,

    /// Driver display name.
    pub driver_name: String,

    /// Championship rank before this race.
    pub current_position: i32,

    /// Predicted championship rank.
    pub predicted_position: i32,

    /// Championship points before this race.
    pub current_points: i32,

    /// Predicted championship points.
    pub predicted_points: i32,

    /// Resolved position change; positive = anticipated gain.
    pub change: i32,

    /// Display car number from the live roster; empty when the driver is not
    /// in the session.
    pub car_number: String,

    /// True iff the driver is currently present in the live session.
    pub is_present: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_round_trip_as_absent() {
        let standing = PredictedStanding {
            cust_id: None,
            driver_name: "A".to_string(),
            current_position: 1,
            predicted_position: 2,
            current_points: 50,
            predicted_points: 40,
            change: None,
            car_number: None,
        };

        let json = serde_json::to_string(&standing).unwrap();
        assert!(!json.contains("cust_id"));
        assert!(!json.contains("change"));

        let back: PredictedStanding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, standing);
    }

    #[test]
    fn known_ranks_require_both_sides() {
        let mut standing = PredictedStanding {
            cust_id: Some(1),
            driver_name: "A".to_string(),
            current_position: 1,
            predicted_position: 2,
            current_points: 0,
            predicted_points: 0,
            change: None,
            car_number: None,
        };
        assert!(standing.has_known_ranks());

        standing.current_position = POSITION_UNKNOWN;
        assert!(!standing.has_known_ranks());
    }
}
