//! Response text → predicted standings.

use podium_schemas::PredictedStanding;
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Wrapper key used by legacy engine builds that return an object instead of
/// a bare array.
const LEGACY_WRAPPER_KEY: &str = "standings";

/// Decode an engine response into predicted standings, in engine order.
///
/// Accepts the canonical bare array or the legacy `{"standings": [...]}`
/// wrapper. An empty array is valid ("no predictions yet") and decodes to an
/// empty vector.
///
/// # Errors
///
/// [`DecodeError::MalformedJson`] when the payload is not parseable JSON;
/// [`DecodeError::SchemaMismatch`] when the standings array is missing, an
/// element is not an object, or a required field is absent or of the wrong
/// type.
pub fn decode_standings(payload: &str) -> Result<Vec<PredictedStanding>, DecodeError> {
    let value: Value = serde_json::from_str(payload).map_err(DecodeError::MalformedJson)?;

    standings_array(&value)?
        .iter()
        .enumerate()
        .map(|(index, record)| decode_record(record, index))
        .collect()
}

fn standings_array(value: &Value) -> Result<&[Value], DecodeError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(fields) => match fields.get(LEGACY_WRAPPER_KEY) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(DecodeError::mismatch(format!(
                "`{LEGACY_WRAPPER_KEY}` is {}, expected an array",
                type_name(other)
            ))),
            None => Err(DecodeError::mismatch(format!(
                "expected an array of standings or an object with a `{LEGACY_WRAPPER_KEY}` array"
            ))),
        },
        other => Err(DecodeError::mismatch(format!(
            "expected an array of standings, got {}",
            type_name(other)
        ))),
    }
}

fn decode_record(record: &Value, index: usize) -> Result<PredictedStanding, DecodeError> {
    let Value::Object(fields) = record else {
        return Err(DecodeError::mismatch(format!(
            "standings[{index}] is {}, expected an object",
            type_name(record)
        )));
    };

    Ok(PredictedStanding {
        cust_id: optional_int(fields, "cust_id", index)?,
        driver_name: required_string(fields, "driver_name", index)?,
        current_position: required_int(fields, "current_position", index)?,
        predicted_position: required_int(fields, "predicted_position", index)?,
        current_points: required_int(fields, "current_points", index)?,
        predicted_points: required_int(fields, "predicted_points", index)?,
        change: optional_int(fields, "change", index)?,
        car_number: optional_string(fields, "car_number", index)?,
    })
}

/// Read a JSON number as `i32`, truncating float wire values toward zero.
///
/// The engine emits integral points and positions, but some builds encode
/// them as floats; `40.9` decodes as `40`. Out-of-range values saturate.
fn wire_int(value: &Value) -> Option<i32> {
    if let Some(integer) = value.as_i64() {
        Some(integer.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    } else {
        value.as_f64().map(|float| float as i32)
    }
}

fn required_int(fields: &Map<String, Value>, key: &str, index: usize) -> Result<i32, DecodeError> {
    let value = fields
        .get(key)
        .ok_or_else(|| DecodeError::mismatch(format!("standings[{index}]: missing `{key}`")))?;

    wire_int(value).ok_or_else(|| {
        DecodeError::mismatch(format!(
            "standings[{index}]: `{key}` is {}, expected a number",
            type_name(value)
        ))
    })
}

fn optional_int(
    fields: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<Option<i32>, DecodeError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => wire_int(value).map(Some).ok_or_else(|| {
            DecodeError::mismatch(format!(
                "standings[{index}]: `{key}` is {}, expected a number",
                type_name(value)
            ))
        }),
    }
}

fn required_string(
    fields: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<String, DecodeError> {
    let value = fields
        .get(key)
        .ok_or_else(|| DecodeError::mismatch(format!("standings[{index}]: missing `{key}`")))?;

    value.as_str().map(str::to_owned).ok_or_else(|| {
        DecodeError::mismatch(format!(
            "standings[{index}]: `{key}` is {}, expected a string",
            type_name(value)
        ))
    })
}

fn optional_string(
    fields: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<Option<String>, DecodeError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_str().map(|s| Some(s.to_owned())).ok_or_else(|| {
            DecodeError::mismatch(format!(
                "standings[{index}]: `{key}` is {}, expected a string",
                type_name(value)
            ))
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
