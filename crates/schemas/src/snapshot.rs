//! Race-state snapshot sent to the prediction engine.

use serde::{Deserialize, Serialize};

/// Sentinel rank for a car that is unknown or not yet classified.
///
/// Running positions and championship ranks are 1-based on the wire; zero
/// (or anything below it) means the driver has no usable rank this tick.
pub const POSITION_UNKNOWN: i32 = 0;

/// Current in-class state of one car, one entry per driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarPosition {
    /// Driver identity, unique within a session.
    pub cust_id: i32,

    /// Current in-class running position; [`POSITION_UNKNOWN`] or negative
    /// when the car has not been classified yet.
    pub finish_position_in_class: i32,

    /// Completed lap count, never negative.
    pub laps_complete: i32,

    /// Vehicle identity.
    pub car_id: i32,
}

impl CarPosition {
    /// Whether this car holds a usable in-class rank this tick.
    pub fn is_classified(&self) -> bool {
        self.finish_position_in_class > POSITION_UNKNOWN
    }
}

/// Point-in-time capture of session and car state used as a prediction
/// request.
///
/// Built fresh from telemetry every update tick; session identity fields are
/// immutable once set. The `positions` order carries no meaning — the engine
/// re-sorts by its own ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceSnapshot {
    /// Series identity.
    pub series_id: i32,

    /// Session identity.
    pub session_id: i32,

    /// Subsession identity (split).
    pub subsession_id: i32,

    /// Track display name.
    pub track: String,

    /// Number of best results counted toward points; passed through to the
    /// engine opaquely.
    pub count_best_of: i32,

    /// Restricts predictions to one vehicle class.
    pub car_class_id: i32,

    /// Requested result-list size cap.
    pub top_n: i32,

    /// One entry per car currently tracked in the selected class.
    pub positions: Vec<CarPosition>,
}

impl RaceSnapshot {
    /// Add a car position, keeping at most one entry per `cust_id`.
    ///
    /// A driver can only be in one car at a time, so a later push for the
    /// same `cust_id` replaces the earlier entry.
    pub fn push_position(&mut self, position: CarPosition) {
        match self
            .positions
            .iter()
            .position(|p| p.cust_id == position.cust_id)
        {
            Some(index) => self.positions[index] = position,
            None => self.positions.push(position),
        }
    }
}
