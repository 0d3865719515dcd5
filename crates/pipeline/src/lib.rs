//! Per-tick standings pipeline.
//!
//! One pass per rendered frame: encode the snapshot, invoke the prediction
//! engine, decode its response, merge with the live roster. Every stage is
//! fallible and every failure is recoverable — a failed tick logs the
//! condition and keeps showing the previous rows (or an empty list before
//! the first success). Nothing here may crash or hang the host overlay.
//!
//! Errors are never retried within a tick; the next tick re-runs the whole
//! pipeline, which also retries engine resolution after an
//! [`BridgeError::EngineUnavailable`] tick.

use podium_bridge::{BridgeError, StandingsEngine};
use podium_merge::{CarNumberLookup, merge_standings};
use podium_schemas::{PresentationRow, RaceSnapshot};
use podium_wire::{DecodeError, EncodeError, decode_standings, encode_snapshot};
use thiserror::Error;

/// Everything that can end a tick early.
#[derive(Debug, Error)]
pub enum TickError {
    /// Snapshot could not be serialized.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The engine could not be reached or reported failure.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// The engine response did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Owns the engine handle and the last good presentation rows.
///
/// The pipeline runs on the host's single update thread; it holds no locks
/// across ticks and spawns nothing.
pub struct StandingsPipeline<E> {
    engine: E,
    rows: Vec<PresentationRow>,
}

impl<E: StandingsEngine> StandingsPipeline<E> {
    /// Pipeline with no rows yet; the first successful tick fills them.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            rows: Vec::new(),
        }
    }

    /// Run one update tick.
    ///
    /// On success the returned slice is the freshly merged rows; on any
    /// failure it is the previous tick's rows, unchanged, and the condition
    /// has been logged.
    pub fn tick(
        &mut self,
        snapshot: &RaceSnapshot,
        roster: &impl CarNumberLookup,
    ) -> &[PresentationRow] {
        if let Err(error) = self.refresh(snapshot, roster) {
            tracing::warn!(
                session_id = snapshot.session_id,
                car_class_id = snapshot.car_class_id,
                %error,
                "standings tick failed, keeping previous rows"
            );
        }
        &self.rows
    }

    /// Run one update tick, surfacing the failure instead of logging it.
    ///
    /// The cached rows are replaced only on success, exactly as with
    /// [`StandingsPipeline::tick`].
    ///
    /// # Errors
    ///
    /// The [`TickError`] that ended the tick early.
    pub fn try_tick(
        &mut self,
        snapshot: &RaceSnapshot,
        roster: &impl CarNumberLookup,
    ) -> Result<&[PresentationRow], TickError> {
        self.refresh(snapshot, roster)?;
        Ok(&self.rows)
    }

    fn refresh(
        &mut self,
        snapshot: &RaceSnapshot,
        roster: &impl CarNumberLookup,
    ) -> Result<(), TickError> {
        self.rows = self.run(snapshot, roster)?;
        Ok(())
    }

    /// Last good rows without running a tick.
    pub fn rows(&self) -> &[PresentationRow] {
        &self.rows
    }

    fn run(
        &self,
        snapshot: &RaceSnapshot,
        roster: &impl CarNumberLookup,
    ) -> Result<Vec<PresentationRow>, TickError> {
        let request = encode_snapshot(snapshot)?;
        let response = self.engine.invoke(&request)?;
        let standings = decode_standings(&response)?;

        tracing::debug!(
            standings = standings.len(),
            positions = snapshot.positions.len(),
            "standings tick decoded"
        );

        Ok(merge_standings(standings, roster))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Scripted engine: pops one canned result per invocation.
    struct ScriptedEngine {
        script: RefCell<Vec<Result<String, BridgeError>>>,
        requests: RefCell<Vec<String>>,
    }

    impl ScriptedEngine {
        fn new(script: Vec<Result<String, BridgeError>>) -> Self {
            Self {
                script: RefCell::new(script),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl StandingsEngine for ScriptedEngine {
        fn invoke(&self, request: &str) -> Result<String, BridgeError> {
            self.requests.borrow_mut().push(request.to_string());
            self.script.borrow_mut().remove(0)
        }
    }

    fn snapshot() -> RaceSnapshot {
        RaceSnapshot {
            series_id: 285,
            session_id: 999,
            subsession_id: 123,
            track: "Lime Rock".to_string(),
            count_best_of: 10,
            car_class_id: 84,
            top_n: 5,
            positions: Vec::new(),
        }
    }

    const RESPONSE: &str = r#"[
        {"driver_name": "A", "current_position": 1, "predicted_position": 2,
         "current_points": 50, "predicted_points": 40, "change": -1, "cust_id": 123}
    ]"#;

    #[test]
    fn successful_tick_produces_rows() {
        let engine = ScriptedEngine::new(vec![Ok(RESPONSE.to_string())]);
        let mut pipeline = StandingsPipeline::new(engine);
        let roster = HashMap::from([(123, "44".to_string())]);

        let rows = pipeline.tick(&snapshot(), &roster);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].driver_name, "A");
        assert_eq!(rows[0].change, -1);
        assert!(rows[0].is_present);
    }

    #[test]
    fn failed_tick_keeps_previous_rows() {
        let engine = ScriptedEngine::new(vec![
            Ok(RESPONSE.to_string()),
            Err(BridgeError::EmptyResponse),
            Ok("not json".to_string()),
        ]);
        let mut pipeline = StandingsPipeline::new(engine);
        let roster: HashMap<i32, String> = HashMap::new();

        assert_eq!(pipeline.tick(&snapshot(), &roster).len(), 1);

        // Bridge failure: rows survive.
        assert_eq!(pipeline.tick(&snapshot(), &roster).len(), 1);

        // Decode failure: rows still survive.
        let rows = pipeline.tick(&snapshot(), &roster);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].driver_name, "A");
    }

    #[test]
    fn first_tick_failure_yields_empty_rows() {
        let engine = ScriptedEngine::new(vec![Err(BridgeError::EngineUnavailable {
            reason: "library not found".to_string(),
        })]);
        let mut pipeline = StandingsPipeline::new(engine);
        let roster: HashMap<i32, String> = HashMap::new();

        assert!(pipeline.tick(&snapshot(), &roster).is_empty());
    }

    #[test]
    fn request_on_the_wire_is_the_encoded_snapshot() {
        let engine = ScriptedEngine::new(vec![Ok("[]".to_string())]);
        let mut pipeline = StandingsPipeline::new(engine);
        let roster: HashMap<i32, String> = HashMap::new();

        pipeline.tick(&snapshot(), &roster);

        let requests = pipeline.engine.requests.borrow();
        let sent: serde_json::Value = serde_json::from_str(&requests[0]).unwrap();
        assert_eq!(sent["session_id"], 999);
        assert_eq!(sent["top_n"], 5);
    }

    #[test]
    fn empty_response_array_clears_rows() {
        let engine = ScriptedEngine::new(vec![Ok(RESPONSE.to_string()), Ok("[]".to_string())]);
        let mut pipeline = StandingsPipeline::new(engine);
        let roster: HashMap<i32, String> = HashMap::new();

        assert_eq!(pipeline.tick(&snapshot(), &roster).len(), 1);

        // "No predictions yet" is a valid result, not a failure: it replaces.
        assert!(pipeline.tick(&snapshot(), &roster).is_empty());
    }
}
