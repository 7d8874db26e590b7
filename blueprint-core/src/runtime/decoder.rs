//! Response decoding.

use crate::agent::AgentConfiguration;
use crate::error::BlueprintError;
use crate::schema::SchemaNode;

/// Decode raw provider text into an [`AgentConfiguration`].
///
/// The text is trimmed and parsed as strict JSON. When `schema` is given the
/// parsed value is checked against it first, so the log names the exact path
/// that broke. Typed decoding rejects missing required fields either way.
pub fn decode_configuration(
    raw: &str,
    schema: Option<&SchemaNode>,
) -> Result<AgentConfiguration, BlueprintError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())?;

    if let Some(schema) = schema {
        schema.validate(&value)?;
    }

    Ok(serde_json::from_value(value)?)
}
