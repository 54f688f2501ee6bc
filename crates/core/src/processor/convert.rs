//! Conversion of wire data entries into data-model values.

use crate::error::ShapeError;
use a2ui_protocol::bindings::number_to_json;
use a2ui_protocol::server_messages::DataEntry;
use serde_json::{Map, Value};

/// Convert an ordered list of typed entries into a JSON object.
///
/// `valueMap` entries recurse. Entries are inserted in order, so a repeated
/// key keeps its first position and its last value. An entry with no value
/// contributes nothing and is reported in `errors`. An entry with several
/// values keeps the first in the order string, number, boolean, map.
pub fn entries_to_map(entries: Vec<DataEntry>, errors: &mut Vec<ShapeError>) -> Map<String, Value> {
    let mut map = Map::new();

    for entry in entries {
        if entry.value_count() > 1 {
            tracing::warn!(key = %entry.key, "data entry carries more than one value; keeping the first");
        }

        let DataEntry {
            key,
            value_string,
            value_number,
            value_boolean,
            value_map,
        } = entry;

        let value = if let Some(s) = value_string {
            Value::String(s)
        } else if let Some(n) = value_number {
            number_to_json(n)
        } else if let Some(b) = value_boolean {
            Value::Bool(b)
        } else if let Some(nested) = value_map {
            Value::Object(entries_to_map(nested, errors))
        } else {
            errors.push(ShapeError::EmptyDataEntry { key });
            continue;
        };

        map.insert(key, value);
    }

    map
}
