//! Merge engine: join predicted standings with live session metadata.
//!
//! The prediction engine ranks drivers; the live session knows which of them
//! are actually on track and under what car number. This crate joins the
//! two into the ordered [`PresentationRow`] list the overlay renders.
//!
//! The engine's ordering is its ranking and is therefore presentation order;
//! the merge never reorders, filters, or truncates. Drivers missing from the
//! live roster stay in the list flagged `is_present = false` — dimming them
//! is the renderer's policy, computing the signal is ours.

use std::collections::HashMap;

use podium_schemas::{PredictedStanding, PresentationRow};

/// Car-number lookup supplied by the telemetry collaborator.
///
/// A pure function of driver identity against the latest session snapshot:
/// total, synchronous, never blocking. Absent driver ⇒ `None`, nothing else.
pub trait CarNumberLookup {
    /// Display car number for a driver, if currently in the session.
    fn car_number(&self, cust_id: i32) -> Option<&str>;
}

impl CarNumberLookup for HashMap<i32, String> {
    fn car_number(&self, cust_id: i32) -> Option<&str> {
        self.get(&cust_id).map(String::as_str)
    }
}

impl<T: CarNumberLookup + ?Sized> CarNumberLookup for &T {
    fn car_number(&self, cust_id: i32) -> Option<&str> {
        (**self).car_number(cust_id)
    }
}

/// Join decoded standings with the live roster, in engine order.
///
/// Each row resolves its car number and presence via `lookup`, and its
/// change indicator via [`resolve_change`]. Output length and order match
/// the input exactly.
pub fn merge_standings(
    standings: Vec<PredictedStanding>,
    lookup: &impl CarNumberLookup,
) -> Vec<PresentationRow> {
    standings
        .into_iter()
        .map(|standing| {
            let car_number = standing
                .cust_id
                .and_then(|cust_id| lookup.car_number(cust_id));
            let is_present = car_number.is_some();
            let car_number = car_number.unwrap_or_default().to_owned();
            let change = resolve_change(&standing);

            PresentationRow {
                cust_id: standing.cust_id,
                driver_name: standing.driver_name,
                current_position: standing.current_position,
                predicted_position: standing.predicted_position,
                current_points: standing.current_points,
                predicted_points: standing.predicted_points,
                change,
                car_number,
                is_present,
            }
        })
        .collect()
}

/// Resolve the position-change indicator for one standing.
///
/// The engine-supplied value is authoritative and passed through verbatim.
/// When a response variant omits it, the change is derived as
/// `current_position - predicted_position` — positive means an anticipated
/// gain — and only when both ranks are known; an unclassified driver shows
/// as flat (`0`).
pub fn resolve_change(standing: &PredictedStanding) -> i32 {
    if let Some(change) = standing.change {
        change
    } else if standing.has_known_ranks() {
        standing.current_position - standing.predicted_position
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use podium_schemas::POSITION_UNKNOWN;

    use super::*;

    fn standing(cust_id: Option<i32>, name: &str) -> PredictedStanding {
        PredictedStanding {
            cust_id,
            driver_name: name.to_string(),
            current_position: 3,
            predicted_position: 1,
            current_points: 40,
            predicted_points: 65,
            change: Some(2),
            car_number: None,
        }
    }

    fn roster(entries: &[(i32, &str)]) -> HashMap<i32, String> {
        entries
            .iter()
            .map(|&(cust_id, number)| (cust_id, number.to_string()))
            .collect()
    }

    #[test]
    fn merge_preserves_engine_order_and_length() {
        let standings = vec![
            standing(Some(1), "P. Newman"),
            standing(Some(2), "T. Cruise"),
            standing(Some(3), "S. McQueen"),
        ];
        let names: Vec<String> = standings.iter().map(|s| s.driver_name.clone()).collect();

        let rows = merge_standings(standings, &roster(&[(2, "86")]));

        assert_eq!(rows.len(), 3);
        for (row, name) in rows.iter().zip(&names) {
            assert_eq!(&row.driver_name, name);
        }
    }

    #[test]
    fn present_driver_gets_roster_car_number() {
        let rows = merge_standings(vec![standing(Some(7), "A")], &roster(&[(7, "44")]));

        assert!(rows[0].is_present);
        assert_eq!(rows[0].car_number, "44");
    }

    #[test]
    fn absent_driver_is_kept_but_flagged() {
        let rows = merge_standings(vec![standing(Some(7), "A")], &roster(&[(8, "44")]));

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_present);
        assert_eq!(rows[0].car_number, "");
    }

    #[test]
    fn legacy_record_without_cust_id_is_never_present() {
        // No name-based fallback: the roster is keyed by cust_id only.
        let rows = merge_standings(vec![standing(None, "A")], &roster(&[(7, "44")]));

        assert!(!rows[0].is_present);
        assert_eq!(rows[0].car_number, "");
    }

    #[test]
    fn engine_change_is_passed_through_verbatim() {
        let mut s = standing(Some(1), "A");
        // Deliberately inconsistent with the ranks: the engine value wins.
        s.change = Some(-5);

        let rows = merge_standings(vec![s], &roster(&[]));
        assert_eq!(rows[0].change, -5);
    }

    #[test]
    fn missing_change_is_derived_positive_for_a_gain() {
        let mut s = standing(Some(1), "A");
        s.change = None;
        s.current_position = 3;
        s.predicted_position = 1;

        assert_eq!(resolve_change(&s), 2);
    }

    #[test]
    fn missing_change_is_derived_negative_for_a_loss() {
        let mut s = standing(Some(1), "A");
        s.change = None;
        s.current_position = 1;
        s.predicted_position = 4;

        assert_eq!(resolve_change(&s), -3);
    }

    #[test]
    fn unclassified_driver_shows_flat_change() {
        let mut s = standing(Some(1), "A");
        s.change = None;
        s.current_position = POSITION_UNKNOWN;
        s.predicted_position = 4;

        assert_eq!(resolve_change(&s), 0);
    }

    #[test]
    fn empty_input_merges_to_empty_output() {
        let rows = merge_standings(vec![], &roster(&[(1, "1")]));
        assert!(rows.is_empty());
    }
}
