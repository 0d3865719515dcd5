//! Domain models for the Podium standings-prediction core.
//!
//! This crate defines the types that cross the boundary between the live
//! telemetry collaborator, the prediction engine, and the rendering
//! collaborator:
//!
//! - [`RaceSnapshot`] / [`CarPosition`]: the per-tick request describing the
//!   session and the cars currently on track,
//! - [`PredictedStanding`]: one decoded engine response record,
//! - [`PresentationRow`]: a predicted standing enriched with locally known
//!   display metadata, ready for the overlay renderer.
//!
//! Snapshots are built fresh every update tick and never mutated after being
//! handed to the wire codec. Presentation rows are likewise rebuilt every
//! tick and discarded after rendering.

pub mod snapshot;
pub mod standing;

pub use snapshot::{CarPosition, POSITION_UNKNOWN, RaceSnapshot};
pub use standing::{PredictedStanding, PresentationRow};
