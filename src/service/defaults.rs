//! Creation-time field defaults, computed from a fixed UTC offset.

use crate::config::{EntitySchema, FieldDefault};
use crate::store::Fields;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%I:%M:%S %p";

/// Render one default for the instant `now` as seen in the zone `offset`.
pub fn default_value(default: FieldDefault, now: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = now.with_timezone(&offset);
    match default {
        FieldDefault::CurrentDate => local.format(DATE_FORMAT).to_string(),
        FieldDefault::CurrentTime => local.format(TIME_FORMAT).to_string(),
    }
}

/// Fill every absent (or null) defaulted field. Values supplied by the client are kept.
pub fn apply_defaults(
    entity: &EntitySchema,
    fields: &mut Fields,
    now: DateTime<Utc>,
    offset: FixedOffset,
) {
    for spec in entity.fields {
        let Some(default) = spec.default else { continue };
        let absent = matches!(fields.get(spec.name), None | Some(Value::Null));
        if absent {
            fields.insert(
                spec.name.to_string(),
                Value::String(default_value(default, now, offset)),
            );
        }
    }
}
