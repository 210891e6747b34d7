//! JSON-Schema fragments for model fields, and the OpenAPI
//! `components.schemas` document assembled from them.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::model::FieldSpec;
use crate::models::ListStatus;

/// Schema of a type when it appears as a field value.
pub trait FieldSchema {
    fn field_schema() -> Value;
}

/// `$ref` pointing at a named entry of `components.schemas`.
pub fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Object schema built from a model's field list.
pub fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        let schema = (field.schema)();
        let schema = if field.required {
            required.push(Value::from(field.key));
            schema
        } else {
            nullable(schema)
        };
        properties.insert(field.key.to_string(), schema);
    }

    let mut object = Map::new();
    object.insert("type".into(), Value::from("object"));
    if !required.is_empty() {
        object.insert("required".into(), Value::Array(required));
    }
    object.insert("properties".into(), Value::Object(properties));
    Value::Object(object)
}

fn nullable(schema: Value) -> Value {
    // Siblings of `$ref` are ignored by OpenAPI 3.0 tooling.
    if schema.get("$ref").is_some() {
        return json!({ "allOf": [schema], "nullable": true });
    }
    match schema {
        Value::Object(mut object) => {
            object.insert("nullable".into(), Value::Bool(true));
            Value::Object(object)
        }
        other => other,
    }
}

/// `components.schemas` for every model in the crate, keyed by type name.
pub fn components() -> Map<String, Value> {
    let mut schemas: Map<String, Value> = crate::models::COMPONENTS
        .iter()
        .map(|(name, schema)| (name.to_string(), schema()))
        .collect();
    schemas.insert("ListStatus".into(), ListStatus::json_schema());
    schemas
}

impl FieldSchema for String {
    fn field_schema() -> Value {
        json!({ "type": "string" })
    }
}

impl FieldSchema for bool {
    fn field_schema() -> Value {
        json!({ "type": "boolean" })
    }
}

impl FieldSchema for i32 {
    fn field_schema() -> Value {
        json!({ "type": "integer", "format": "int32" })
    }
}

impl FieldSchema for i64 {
    fn field_schema() -> Value {
        json!({ "type": "integer", "format": "int64" })
    }
}

impl FieldSchema for u32 {
    fn field_schema() -> Value {
        json!({ "type": "integer", "format": "int32", "minimum": 0 })
    }
}

impl FieldSchema for u64 {
    fn field_schema() -> Value {
        json!({ "type": "integer", "format": "int64", "minimum": 0 })
    }
}

impl FieldSchema for f64 {
    fn field_schema() -> Value {
        json!({ "type": "number", "format": "double" })
    }
}

impl FieldSchema for Uuid {
    fn field_schema() -> Value {
        json!({ "type": "string", "format": "uuid" })
    }
}

/// Opaque: any JSON value.
impl FieldSchema for Value {
    fn field_schema() -> Value {
        json!({})
    }
}

impl<T: FieldSchema> FieldSchema for Option<T> {
    fn field_schema() -> Value {
        nullable(T::field_schema())
    }
}

impl<T: FieldSchema> FieldSchema for Vec<T> {
    fn field_schema() -> Value {
        json!({ "type": "array", "items": T::field_schema() })
    }
}

impl<T: FieldSchema> FieldSchema for HashMap<String, T> {
    fn field_schema() -> Value {
        json!({ "type": "object", "additionalProperties": T::field_schema() })
    }
}
