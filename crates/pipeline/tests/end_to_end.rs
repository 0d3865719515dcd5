//! End-to-end pipeline scenario against a stub engine.

use std::collections::HashMap;

use podium_bridge::{BridgeError, StandingsEngine};
use podium_pipeline::StandingsPipeline;
use podium_schemas::{CarPosition, RaceSnapshot};

/// Stub engine asserting the request shape and returning a canned response.
struct CannedEngine {
    response: &'static str,
}

impl StandingsEngine for CannedEngine {
    fn invoke(&self, request: &str) -> Result<String, BridgeError> {
        let value: serde_json::Value =
            serde_json::from_str(request).map_err(|_| BridgeError::CallFailed { status: 1 })?;

        // The engine is schema-sensitive: a misspelled key would silently
        // default, so the stub refuses anything but the canonical schema.
        for key in [
            "series_id",
            "session_id",
            "subsession_id",
            "track",
            "count_best_of",
            "car_class_id",
            "top_n",
            "positions",
        ] {
            if value.get(key).is_none() {
                return Err(BridgeError::CallFailed { status: 2 });
            }
        }

        Ok(self.response.to_string())
    }
}

fn snapshot() -> RaceSnapshot {
    let mut snapshot = RaceSnapshot {
        series_id: 285,
        session_id: 999,
        subsession_id: 123,
        track: "Lime Rock".to_string(),
        count_best_of: 10,
        car_class_id: 84,
        top_n: 5,
        positions: Vec::new(),
    };
    snapshot.push_position(CarPosition {
        cust_id: 123,
        finish_position_in_class: 1,
        laps_complete: 10,
        car_id: 77,
    });
    snapshot.push_position(CarPosition {
        cust_id: 456,
        finish_position_in_class: 2,
        laps_complete: 10,
        car_id: 77,
    });
    snapshot
}

const RESPONSE: &str = r#"[{"driver_name":"A","current_position":1,"predicted_position":2,"current_points":50,"predicted_points":40,"change":-1,"cust_id":123}]"#;

#[test]
fn two_position_snapshot_yields_one_merged_row() {
    let mut pipeline = StandingsPipeline::new(CannedEngine { response: RESPONSE });
    let roster = HashMap::from([(123, "07".to_string())]);

    let rows = pipeline.tick(&snapshot(), &roster);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.driver_name, "A");
    assert_eq!(row.change, -1);
    assert!(row.is_present);
    assert_eq!(row.car_number, "07");
}

#[test]
fn unknown_driver_renders_not_present() {
    let mut pipeline = StandingsPipeline::new(CannedEngine { response: RESPONSE });
    let roster = HashMap::from([(456, "12".to_string())]);

    let rows = pipeline.tick(&snapshot(), &roster);

    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_present);
    assert_eq!(rows[0].car_number, "");
}

#[test]
fn legacy_wrapped_response_flows_through() {
    let mut pipeline = StandingsPipeline::new(CannedEngine {
        response: r#"{"standings":[{"driver_name":"B","current_position":2,"predicted_position":1,"current_points":40,"predicted_points":65,"cust_id":456}]}"#,
    });
    let roster = HashMap::from([(456, "12".to_string())]);

    let rows = pipeline.tick(&snapshot(), &roster);

    assert_eq!(rows.len(), 1);
    // Change omitted on the wire: derived locally, positive for a gain.
    assert_eq!(rows[0].change, 1);
    assert!(rows[0].is_present);
}
