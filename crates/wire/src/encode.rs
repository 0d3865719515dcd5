//! Snapshot → request text.

use podium_schemas::RaceSnapshot;

use crate::error::EncodeError;

/// Encode a race-state snapshot as the canonical JSON request.
///
/// The emitted key set is pinned by test: `series_id`, `session_id`,
/// `subsession_id`, `track`, `count_best_of`, `car_class_id`, `top_n` and
/// `positions[]` with `cust_id`, `finish_position_in_class`,
/// `laps_complete`, `car_id`.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialization fails.
pub fn encode_snapshot(snapshot: &RaceSnapshot) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(snapshot)?)
}
