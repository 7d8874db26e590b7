//! Declarative output schemas.
//!
//! A [`SchemaNode`] tree describes the JSON shape a provider must return. The
//! same tree is rendered into the provider's request payload and, when
//! enabled, re-checked against the decoded response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Output dialect used when rendering a schema into a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDialect {
    /// Gemini `responseSchema` (OpenAPI subset, upper-case type names)
    Gemini,
    /// Plain JSON Schema (lower-case type names)
    JsonSchema,
}

/// A named property of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub schema: SchemaNode,
}

/// Object schema with ordered properties and a required set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) -> Self {
        self.properties.push(Property {
            name: name.into(),
            schema: schema.into(),
        });
        self
    }

    /// Set the required property names
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up a property schema by name
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.schema)
    }
}

/// Tagged schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaNode {
    Object(ObjectSchema),
    Array {
        items: Box<SchemaNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl From<ObjectSchema> for SchemaNode {
    fn from(object: ObjectSchema) -> Self {
        SchemaNode::Object(object)
    }
}

impl SchemaNode {
    pub fn string() -> Self {
        SchemaNode::String { description: None }
    }

    pub fn integer() -> Self {
        SchemaNode::Integer { description: None }
    }

    pub fn number() -> Self {
        SchemaNode::Number { description: None }
    }

    pub fn boolean() -> Self {
        SchemaNode::Boolean { description: None }
    }

    pub fn array(items: impl Into<SchemaNode>) -> Self {
        SchemaNode::Array {
            items: Box::new(items.into()),
            description: None,
        }
    }

    /// Array of strings, the most common leaf in agent configurations
    pub fn string_array() -> Self {
        Self::array(Self::string())
    }

    /// Attach a description to any node
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            SchemaNode::Object(object) => object.description = text,
            SchemaNode::Array { description, .. }
            | SchemaNode::String { description }
            | SchemaNode::Integer { description }
            | SchemaNode::Number { description }
            | SchemaNode::Boolean { description } => *description = text,
        }
        self
    }

    /// Type name in the given dialect
    pub fn type_name(&self, dialect: SchemaDialect) -> &'static str {
        let name = match self {
            SchemaNode::Object(_) => ("OBJECT", "object"),
            SchemaNode::Array { .. } => ("ARRAY", "array"),
            SchemaNode::String { .. } => ("STRING", "string"),
            SchemaNode::Integer { .. } => ("INTEGER", "integer"),
            SchemaNode::Number { .. } => ("NUMBER", "number"),
            SchemaNode::Boolean { .. } => ("BOOLEAN", "boolean"),
        };
        match dialect {
            SchemaDialect::Gemini => name.0,
            SchemaDialect::JsonSchema => name.1,
        }
    }

    fn description(&self) -> Option<&str> {
        match self {
            SchemaNode::Object(object) => object.description.as_deref(),
            SchemaNode::Array { description, .. }
            | SchemaNode::String { description }
            | SchemaNode::Integer { description }
            | SchemaNode::Number { description }
            | SchemaNode::Boolean { description } => description.as_deref(),
        }
    }

    /// Render the schema as a request payload fragment.
    pub fn to_value(&self, dialect: SchemaDialect) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), Value::from(self.type_name(dialect)));
        if let Some(description) = self.description() {
            out.insert("description".into(), Value::from(description));
        }

        match self {
            SchemaNode::Object(object) => {
                let properties = object
                    .properties
                    .iter()
                    .map(|p| (p.name.clone(), p.schema.to_value(dialect)))
                    .collect::<Map<_, _>>();
                out.insert("properties".into(), Value::Object(properties));
                if !object.required.is_empty() {
                    out.insert("required".into(), Value::from(object.required.clone()));
                }
            }
            SchemaNode::Array { items, .. } => {
                out.insert("items".into(), items.to_value(dialect));
            }
            _ => {}
        }

        Value::Object(out)
    }

    /// Check a JSON value against this schema.
    ///
    /// Returns the first violation found, depth first in declaration order.
    /// Properties not listed in the schema are accepted, since some branches
    /// (tool `config`, task-loop `schedule`) are intentionally free-form.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), SchemaViolation> {
        let matches = match self {
            SchemaNode::Object(_) => value.is_object(),
            SchemaNode::Array { .. } => value.is_array(),
            SchemaNode::String { .. } => value.is_string(),
            SchemaNode::Integer { .. } => value.is_i64(),
            SchemaNode::Number { .. } => value.is_number(),
            SchemaNode::Boolean { .. } => value.is_boolean(),
        };
        if !matches {
            return Err(SchemaViolation::type_mismatch(path, self, value));
        }

        match (self, value) {
            (SchemaNode::Object(object), Value::Object(fields)) => {
                for name in &object.required {
                    if fields.get(name).map_or(true, Value::is_null) {
                        return Err(SchemaViolation {
                            path: format!("{}.{}", path, name),
                            kind: ViolationKind::MissingRequired,
                        });
                    }
                }
                for property in &object.properties {
                    match fields.get(&property.name) {
                        None | Some(Value::Null) => {}
                        Some(field) => property
                            .schema
                            .validate_at(field, &format!("{}.{}", path, property.name))?,
                    }
                }
                Ok(())
            }
            (SchemaNode::Array { items, .. }, Value::Array(elements)) => {
                for (i, element) in elements.iter().enumerate() {
                    items.validate_at(element, &format!("{}[{}]", path, i))?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// What went wrong at a [`SchemaViolation`] path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingRequired,
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// First point at which a value departs from its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub kind: ViolationKind,
}

impl SchemaViolation {
    fn type_mismatch(path: &str, expected: &SchemaNode, found: &Value) -> Self {
        let found = match found {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_f64() => "number",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Self {
            path: path.to_string(),
            kind: ViolationKind::TypeMismatch {
                expected: expected.type_name(SchemaDialect::JsonSchema),
                found,
            },
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired => write!(f, "missing required field {}", self.path),
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "expected {} at {}, found {}", expected, self.path, found)
            }
        }
    }
}

impl std::error::Error for SchemaViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_schema() -> SchemaNode {
        ObjectSchema::new()
            .property("condition", SchemaNode::string())
            .property("action", SchemaNode::string())
            .property("priority", SchemaNode::integer())
            .required(["condition", "action"])
            .into()
    }

    #[test]
    fn test_render_gemini_dialect() {
        let schema = SchemaNode::array(rule_schema()).describe("Alert rules");
        let rendered = schema.to_value(SchemaDialect::Gemini);

        assert_eq!(rendered["type"], "ARRAY");
        assert_eq!(rendered["description"], "Alert rules");
        assert_eq!(rendered["items"]["type"], "OBJECT");
        assert_eq!(rendered["items"]["properties"]["priority"]["type"], "INTEGER");
        assert_eq!(rendered["items"]["required"], json!(["condition", "action"]));
    }

    #[test]
    fn test_render_json_schema_dialect_omits_empty_required() {
        let schema: SchemaNode = ObjectSchema::new()
            .property("LOG_LEVEL", SchemaNode::string())
            .into();
        let rendered = schema.to_value(SchemaDialect::JsonSchema);

        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["properties"]["LOG_LEVEL"]["type"], "string");
        assert!(rendered.get("required").is_none());
    }

    #[test]
    fn test_validate_accepts_conforming_value() {
        let value = json!({"condition": "cpu > 90%", "action": "page", "priority": 1, "extra": true});
        assert!(rule_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_required() {
        let value = json!({"condition": "cpu > 90%"});
        let err = rule_schema().validate(&value).unwrap_err();
        assert_eq!(err.path, "$.action");
        assert_eq!(err.kind, ViolationKind::MissingRequired);
    }

    #[test]
    fn test_validate_null_counts_as_missing() {
        let value = json!({"condition": "cpu > 90%", "action": null});
        let err = rule_schema().validate(&value).unwrap_err();
        assert_eq!(err.kind, ViolationKind::MissingRequired);
    }

    #[test]
    fn test_validate_integer_rejects_fraction() {
        let value = json!({"condition": "a", "action": "b", "priority": 1.5});
        let err = rule_schema().validate(&value).unwrap_err();
        assert_eq!(err.path, "$.priority");
        assert_eq!(
            err.kind,
            ViolationKind::TypeMismatch {
                expected: "integer",
                found: "number"
            }
        );
    }

    #[test]
    fn test_validate_integer_range_is_i64() {
        let negative = json!({"condition": "a", "action": "b", "priority": -3});
        assert!(rule_schema().validate(&negative).is_ok());

        let too_large = json!({"condition": "a", "action": "b", "priority": u64::MAX});
        let err = rule_schema().validate(&too_large).unwrap_err();
        assert_eq!(err.path, "$.priority");
    }

    #[test]
    fn test_validate_array_path() {
        let schema = SchemaNode::array(rule_schema());
        let value = json!([
            {"condition": "a", "action": "b"},
            {"condition": "c", "action": 7}
        ]);
        let err = schema.validate(&value).unwrap_err();
        assert_eq!(err.path, "$[1].action");
        assert_eq!(err.to_string(), "expected string at $[1].action, found integer");
    }

    #[test]
    fn test_schema_node_serde_tagging() {
        let node = SchemaNode::string().describe("name");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({"type": "string", "description": "name"}));
    }
}
