//! Metadata normalization for store-safe payloads.
//!
//! The store only accepts scalar metadata values (string, integer,
//! float, boolean, null). Collection-typed values are coerced here:
//! arrays join their stringified elements with `", "`, objects
//! serialize to compact JSON text. Every coerced key is recorded so the
//! stored record can report what was converted.

use serde_json::{Map, Value};

/// Record of a single coerced metadata key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataConversion {
    /// Original metadata key.
    pub key: String,
    /// Human-readable description of the conversion applied.
    pub applied: String,
}

/// Normalized metadata plus the list of conversions that produced it.
#[derive(Clone, Debug, Default)]
pub struct NormalizedMetadata {
    /// Fields restricted to scalar JSON values.
    pub fields: Map<String, Value>,
    /// One entry per key whose value was coerced.
    pub conversions: Vec<MetadataConversion>,
}

impl NormalizedMetadata {
    /// Store-ready field map.
    ///
    /// When any key was coerced, a `_metadata_conversions` string field
    /// is attached listing each conversion.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = self.fields;
        if !self.conversions.is_empty() {
            let summary = self
                .conversions
                .iter()
                .map(|c| format!("{}: {}", c.key, c.applied))
                .collect::<Vec<_>>()
                .join("; ");
            fields.insert("_metadata_conversions".to_string(), Value::String(summary));
        }
        fields
    }
}

/// Coerces arbitrary metadata values into store-safe scalar types.
///
/// Pure and total: any input map produces an output map. Scalars pass
/// through unchanged; everything else falls into a conversion arm.
pub fn normalize_metadata(metadata: &Map<String, Value>) -> NormalizedMetadata {
    let mut out = NormalizedMetadata::default();

    for (key, value) in metadata {
        match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                out.fields.insert(key.clone(), value.clone());
            }
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .map(display_scalar)
                    .collect::<Vec<_>>()
                    .join(", ");
                out.fields.insert(key.clone(), Value::String(joined));
                out.conversions.push(MetadataConversion {
                    key: key.clone(),
                    applied: "list joined with \", \"".into(),
                });
            }
            other => {
                let text =
                    serde_json::to_string(other).unwrap_or_else(|_| other.to_string());
                out.fields.insert(key.clone(), Value::String(text));
                out.conversions.push(MetadataConversion {
                    key: key.clone(),
                    applied: "serialized to JSON text".into(),
                });
            }
        }
    }

    out
}

/// Stringifies one array element; bare strings stay unquoted.
fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
