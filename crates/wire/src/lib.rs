//! Wire codec for the Podium prediction-engine boundary.
//!
//! The prediction engine speaks UTF-8 JSON in both directions. This crate
//! owns the canonical schemas and the tolerance rules for decoding what the
//! engine sends back.
//!
//! # Request schema (canonical)
//!
//! ```json
//! {
//!   "series_id": 285,
//!   "session_id": 999,
//!   "subsession_id": 123,
//!   "track": "Lime Rock",
//!   "count_best_of": 10,
//!   "car_class_id": 84,
//!   "top_n": 5,
//!   "positions": [
//!     {"cust_id": 123, "finish_position_in_class": 1, "laps_complete": 10, "car_id": 77}
//!   ]
//! }
//! ```
//!
//! Key-name stability matters: the engine is schema-sensitive, and an
//! unrecognized or misspelled key silently defaults instead of erroring.
//! The session identity key is `session_id`; the historical `season_id`
//! spelling is legacy and never emitted.
//!
//! # Response schema
//!
//! A JSON array of standing objects, canonically carrying `cust_id`:
//!
//! ```json
//! [
//!   {"driver_name": "A", "current_position": 1, "predicted_position": 2,
//!    "current_points": 50, "predicted_points": 40, "change": -1, "cust_id": 123}
//! ]
//! ```
//!
//! Legacy engine builds wrap the array in `{"standings": [...]}` and may
//! omit `cust_id`/`change` or add `car_number`; [`decode_standings`] accepts
//! those as compat input. Decoding is tolerant of missing optional fields
//! and strict on numeric types; float wire values are truncated toward zero
//! (points and positions are integral in practice).

mod decode;
mod encode;
mod error;

pub use decode::decode_standings;
pub use encode::encode_snapshot;
pub use error::{DecodeError, EncodeError};
