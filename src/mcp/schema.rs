//! Declarative tool parameter specs and the generic validator that
//! consumes them. Each tool declares a static table of `ParamSpec`s; the
//! same table renders the JSON Schema advertised in `tools/list` and
//! drives argument validation on `tools/call`.

use serde_json::{Map, Value, json};

use crate::garoon::GaroonError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    String,
    Integer,
    StringArray,
}

impl ParamKind {
    fn json_type(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::StringArray => "array",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_u64() || value.is_i64(),
            ParamKind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

#[derive(Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Only integer defaults exist in the catalog (`limit`).
    pub default: Option<i64>,
    pub description: &'static str,
}

/// Render a spec table as the JSON Schema object for `tools/list`.
pub fn input_schema(specs: &[ParamSpec]) -> Value {
    let mut properties = Map::new();
    for spec in specs {
        let mut prop = match spec.kind {
            ParamKind::StringArray => json!({
                "type": "array",
                "items": {"type": "string"},
                "description": spec.description,
            }),
            kind => json!({
                "type": kind.json_type(),
                "description": spec.description,
            }),
        };
        if let Some(default) = spec.default {
            prop["default"] = json!(default);
        }
        properties.insert(spec.name.to_string(), prop);
    }

    let required: Vec<&str> = specs
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Validate call arguments against a spec table. Missing required fields
/// and type mismatches fail before any network call; defaults are filled
/// in for absent optional fields.
pub fn validate(specs: &[ParamSpec], args: &Value) -> Result<Map<String, Value>, GaroonError> {
    let supplied = match args {
        Value::Null => Map::new(),
        Value::Object(map) => map.clone(),
        other => {
            return Err(GaroonError::Validation(format!(
                "arguments must be an object, got {other}"
            )));
        }
    };

    let mut out = Map::new();
    for spec in specs {
        match supplied.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(GaroonError::Validation(format!(
                        "missing required parameter '{}'",
                        spec.name
                    )));
                }
                if let Some(default) = spec.default {
                    out.insert(spec.name.to_string(), json!(default));
                }
            }
            Some(value) => {
                if !spec.kind.accepts(value) {
                    return Err(GaroonError::Validation(format!(
                        "parameter '{}' must be of type {}",
                        spec.name,
                        spec.kind.json_type()
                    )));
                }
                out.insert(spec.name.to_string(), value.clone());
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[ParamSpec] = &[
        ParamSpec {
            name: "query",
            kind: ParamKind::String,
            required: true,
            default: None,
            description: "Search query",
        },
        ParamSpec {
            name: "limit",
            kind: ParamKind::Integer,
            required: false,
            default: Some(20),
            description: "Maximum number of results",
        },
    ];

    #[test]
    fn it_applies_defaults_for_absent_optionals() {
        let args = validate(SPECS, &json!({"query": "tanaka"})).unwrap();
        assert_eq!(args["query"], "tanaka");
        assert_eq!(args["limit"], 20);
    }

    #[test]
    fn it_keeps_supplied_values_over_defaults() {
        let args = validate(SPECS, &json!({"query": "tanaka", "limit": 5})).unwrap();
        assert_eq!(args["limit"], 5);
    }

    #[test]
    fn it_rejects_missing_required_fields() {
        let err = validate(SPECS, &json!({"limit": 5})).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
        assert!(err.to_string().contains("query"));
    }

    #[test]
    fn it_rejects_type_mismatches() {
        let err = validate(SPECS, &json!({"query": 42})).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");

        let err = validate(SPECS, &json!({"query": "x", "limit": "lots"})).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn it_requires_fields_even_when_arguments_are_null() {
        let err = validate(SPECS, &Value::Null).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn it_rejects_non_object_arguments() {
        let err = validate(SPECS, &json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn it_renders_a_json_schema_object() {
        let schema = input_schema(SPECS);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["properties"]["limit"]["default"], 20);
        assert_eq!(schema["required"], json!(["query"]));
    }

    #[test]
    fn it_validates_string_arrays() {
        let specs = [ParamSpec {
            name: "to",
            kind: ParamKind::StringArray,
            required: true,
            default: None,
            description: "Recipient user IDs",
        }];

        assert!(validate(&specs, &json!({"to": ["1", "2"]})).is_ok());
        assert!(validate(&specs, &json!({"to": [1, 2]})).is_err());
        assert!(validate(&specs, &json!({"to": "1"})).is_err());
    }
}
