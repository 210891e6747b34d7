//! Generic JSON codec shared by every model.
//!
//! Encoding goes through [`ToJson`], decoding through [`FromJson`]. Decoders
//! compose: a model decodes each field with the decoder for its static type,
//! and `Vec<T>` / `HashMap<String, T>` decode their entries with `T`'s
//! decoder. A [`Decoder`] context travels along to track the current
//! [`JsonPath`] and to apply the [`CollectionMode`] policy to collection
//! entries that fail.
//!
//! ```
//! use kabalist_models::{decode_list, CollectionMode, Item};
//! use serde_json::json;
//!
//! let decoded = decode_list::<Item>(
//!     &json!([{"id": 1, "name": "milk"}, "garbage"]),
//!     CollectionMode::Lenient,
//! )?;
//! assert_eq!(decoded.value.len(), 1);
//! assert_eq!(decoded.dropped_count(), 1);
//! assert_eq!(decoded.dropped[0].path.to_string(), "$[1]");
//! # Ok::<(), kabalist_models::DecodeError>(())
//! ```

use std::collections::HashMap;

use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::errors::{DecodeError, DecodeErrorKind, JsonPath, PathSegment};

// ============================================================================
// Options
// ============================================================================

/// What to do with a collection entry that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CollectionMode {
    /// The first failing entry aborts the whole decode.
    Strict,
    /// Failing entries are skipped and reported in [`Decoded::dropped`].
    #[default]
    Lenient,
}

/// Per-call decode configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub collections: CollectionMode,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            collections: CollectionMode::Strict,
        }
    }

    pub fn lenient() -> Self {
        Self {
            collections: CollectionMode::Lenient,
        }
    }

    pub fn with_collections(mut self, mode: CollectionMode) -> Self {
        self.collections = mode;
        self
    }
}

// ============================================================================
// Decode result
// ============================================================================

/// A collection entry skipped in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropped {
    /// Location of the entry itself (`$.items[3]`).
    pub path: JsonPath,
    /// Why it failed; its path may point deeper into the entry.
    pub error: DecodeError,
}

/// A decoded value together with the collection entries dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    /// Skipped entries in document order. Always empty in strict mode.
    pub dropped: Vec<Dropped>,
}

impl<T> Decoded<T> {
    /// True when nothing was dropped.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Paths of the dropped entries (`$[1]`, `$.items[3]`, ...).
    pub fn dropped_paths(&self) -> impl Iterator<Item = &JsonPath> {
        self.dropped.iter().map(|entry| &entry.path)
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            dropped: self.dropped,
        }
    }
}

// ============================================================================
// Decoder context
// ============================================================================

/// Mutable state for one decode call.
#[derive(Debug)]
pub struct Decoder {
    options: DecodeOptions,
    path: JsonPath,
    dropped: Vec<Dropped>,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            path: JsonPath::root(),
            dropped: Vec::new(),
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Path of the value currently being decoded.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Builds an error located at the current path.
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.path.clone(), kind)
    }

    pub fn unexpected(&self, expected: &'static str, found: &Value) -> DecodeError {
        DecodeError::unexpected_type(self.path.clone(), expected, found)
    }

    pub fn invalid(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::invalid_value(self.path.clone(), message)
    }

    /// Runs `f` one level deeper in the document.
    pub fn scoped<R>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment);
        let out = f(self);
        self.path.pop();
        out
    }

    pub fn expect_object<'v>(
        &self,
        value: &'v Value,
    ) -> Result<&'v Map<String, Value>, DecodeError> {
        value
            .as_object()
            .ok_or_else(|| self.unexpected("object", value))
    }

    /// Decodes one collection entry under the configured [`CollectionMode`].
    ///
    /// Returns `Ok(None)` when the entry was dropped.
    fn entry<T: FromJson>(
        &mut self,
        segment: PathSegment,
        value: &Value,
    ) -> Result<Option<T>, DecodeError> {
        // Drops recorded inside an entry that is itself dropped are discarded.
        let mark = self.dropped.len();
        self.path.push(segment);
        let outcome = match T::from_json(value, self) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(error) if self.options.collections == CollectionMode::Lenient => {
                self.dropped.truncate(mark);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    entry = %self.path,
                    error = %error,
                    "dropping undecodable collection entry"
                );
                self.dropped.push(Dropped {
                    path: self.path.clone(),
                    error,
                });
                Ok(None)
            }
            Err(error) => Err(error),
        };
        self.path.pop();
        outcome
    }

    pub fn finish<T>(self, value: T) -> Decoded<T> {
        Decoded {
            value,
            dropped: self.dropped,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Conversion into a JSON value. Total: encoding never fails.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// Typed conversion out of a JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError>;
}

/// Decodes any [`FromJson`] type from `value` with fresh context.
pub fn decode_value<T: FromJson>(
    value: &Value,
    options: &DecodeOptions,
) -> Result<Decoded<T>, DecodeError> {
    let mut cx = Decoder::new(options.clone());
    let decoded = T::from_json(value, &mut cx)?;
    Ok(cx.finish(decoded))
}

/// Copy of `value` with every object's keys in sorted order.
///
/// The result does not depend on how `serde_json::Map` orders its entries,
/// so equal values always print identically.
pub fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<(&String, &Value)> = object.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), canonical(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

// ============================================================================
// Field helpers (used by `json_model!`)
// ============================================================================

/// Reads a required key: absent and `null` are both errors.
pub fn required<T: FromJson>(
    object: &Map<String, Value>,
    key: &'static str,
    cx: &mut Decoder,
) -> Result<T, DecodeError> {
    cx.scoped(PathSegment::Key(key.to_string()), |cx| match object.get(key) {
        None => Err(cx.error(DecodeErrorKind::MissingField)),
        Some(Value::Null) => Err(cx.error(DecodeErrorKind::NullField)),
        Some(value) => T::from_json(value, cx),
    })
}

/// Reads an optional key: absent and `null` both yield `None`.
pub fn optional<T: FromJson>(
    object: &Map<String, Value>,
    key: &'static str,
    cx: &mut Decoder,
) -> Result<Option<T>, DecodeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => cx.scoped(PathSegment::Key(key.to_string()), |cx| {
            T::from_json(value, cx).map(Some)
        }),
    }
}

// ============================================================================
// Collection decoding
// ============================================================================

/// Decodes a JSON array into records.
pub fn decode_list<T: FromJson>(
    value: &Value,
    mode: CollectionMode,
) -> Result<Decoded<Vec<T>>, DecodeError> {
    decode_value(value, &DecodeOptions::default().with_collections(mode))
}

/// Decodes a JSON object into a map of records keyed like the source.
pub fn decode_map<T: FromJson>(
    value: &Value,
    mode: CollectionMode,
) -> Result<Decoded<HashMap<String, T>>, DecodeError> {
    decode_value(value, &DecodeOptions::default().with_collections(mode))
}

/// Decodes a JSON object whose values are arrays of records.
pub fn decode_map_of_list<T: FromJson>(
    value: &Value,
    mode: CollectionMode,
) -> Result<Decoded<HashMap<String, Vec<T>>>, DecodeError> {
    decode_value(value, &DecodeOptions::default().with_collections(mode))
}

// ============================================================================
// Primitive impls
// ============================================================================

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromJson for String {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| cx.unexpected("string", value))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromJson for bool {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        value.as_bool().ok_or_else(|| cx.unexpected("boolean", value))
    }
}

fn integer(value: &Value, cx: &Decoder) -> Result<i128, DecodeError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .ok_or_else(|| cx.unexpected("integer", value)),
        _ => Err(cx.unexpected("integer", value)),
    }
}

macro_rules! integer_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }

            impl FromJson for $ty {
                fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
                    let n = integer(value, cx)?;
                    <$ty>::try_from(n).map_err(|_| {
                        cx.invalid(format!("{n} is out of range for {}", stringify!($ty)))
                    })
                }
            }
        )*
    };
}

integer_codec!(i32, i64, u32, u64);

impl ToJson for f64 {
    fn to_json(&self) -> Value {
        // Non-finite floats have no JSON form.
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl FromJson for f64 {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        value.as_f64().ok_or_else(|| cx.unexpected("number", value))
    }
}

impl ToJson for Uuid {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromJson for Uuid {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let text = value.as_str().ok_or_else(|| cx.unexpected("string", value))?;
        Uuid::parse_str(text).map_err(|err| cx.invalid(format!("invalid uuid: {err}")))
    }
}

/// Opaque values pass through untouched.
impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl FromJson for Value {
    fn from_json(value: &Value, _cx: &mut Decoder) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

// ============================================================================
// Composite impls
// ============================================================================

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other, cx).map(Some),
        }
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    if let Some(decoded) = cx.entry(PathSegment::Index(index), item)? {
                        out.push(decoded);
                    }
                }
                Ok(out)
            }
            other => Err(cx.unexpected("array", other)),
        }
    }
}

impl<T: ToJson> ToJson for HashMap<String, T> {
    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl<T: FromJson> FromJson for HashMap<String, T> {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(HashMap::new()),
            Value::Object(entries) => {
                let mut out = HashMap::with_capacity(entries.len());
                for (key, entry) in entries {
                    if let Some(decoded) = cx.entry(PathSegment::Key(key.clone()), entry)? {
                        out.insert(key.clone(), decoded);
                    }
                }
                Ok(out)
            }
            other => Err(cx.unexpected("object", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strict<T: FromJson>(value: Value) -> Result<T, DecodeError> {
        decode_value(&value, &DecodeOptions::strict()).map(Decoded::into_inner)
    }

    #[test]
    fn primitives_reject_wrong_types() {
        let err = strict::<String>(json!(3)).unwrap_err();
        assert_eq!(err.to_string(), "$: expected string, found integer");

        let err = strict::<bool>(json!("true")).unwrap_err();
        assert_eq!(err.to_string(), "$: expected boolean, found string");

        let err = strict::<i32>(json!(1.5)).unwrap_err();
        assert_eq!(err.to_string(), "$: expected integer, found number");
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(strict::<i32>(json!(-7)).unwrap(), -7);
        let err = strict::<i32>(json!(4_000_000_000u64)).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::InvalidValue(_)));
        let err = strict::<u64>(json!(-1)).unwrap_err();
        assert_eq!(err.to_string(), "$: -1 is out of range for u64");
    }

    #[test]
    fn uuid_parses_and_rejects_garbage() {
        let id = Uuid::parse_str("1b4e28ba-2fa1-11d2-883f-0016d3cca427").unwrap();
        assert_eq!(strict::<Uuid>(id.to_json()).unwrap(), id);
        let err = strict::<Uuid>(json!("not-a-uuid")).unwrap_err();
        assert!(err.to_string().starts_with("$: invalid uuid"));
    }

    #[test]
    fn lenient_list_skips_and_reports_bad_entries() {
        let decoded = decode_list::<i32>(&json!([1, "two", 3]), CollectionMode::Lenient).unwrap();
        assert_eq!(decoded.value, vec![1, 3]);
        let paths: Vec<String> = decoded.dropped_paths().map(ToString::to_string).collect();
        assert_eq!(paths, vec!["$[1]"]);
    }

    #[test]
    fn strict_list_fails_on_first_bad_entry() {
        let value = json!([1, "two", true]);
        let err = decode_list::<i32>(&value, CollectionMode::Strict).unwrap_err();
        assert_eq!(err.to_string(), "$[1]: expected integer, found string");
    }

    #[test]
    fn null_collection_is_empty() {
        let decoded = decode_list::<i32>(&Value::Null, CollectionMode::Strict).unwrap();
        assert!(decoded.value.is_empty());
        assert!(decoded.is_complete());

        let err = decode_list::<i32>(&json!({"a": 1}), CollectionMode::Lenient).unwrap_err();
        assert_eq!(err.to_string(), "$: expected array, found object");
    }

    #[test]
    fn map_of_list_drops_entries_and_elements() {
        let value = json!({"good": [1, 2], "bad": [1, "x"], "worse": 5});
        let decoded = decode_map_of_list::<i32>(&value, CollectionMode::Lenient).unwrap();
        assert_eq!(decoded.value.get("good"), Some(&vec![1, 2]));
        assert_eq!(decoded.value.get("bad"), Some(&vec![1]));
        assert!(!decoded.value.contains_key("worse"));

        let mut paths: Vec<String> = decoded.dropped_paths().map(ToString::to_string).collect();
        paths.sort();
        assert_eq!(paths, vec!["$.bad[1]", "$.worse"]);
    }

    #[test]
    fn optional_helper_treats_null_as_absent() {
        let object = json!({"a": null, "b": "x"});
        let object = object.as_object().unwrap();
        let mut cx = Decoder::new(DecodeOptions::strict());
        assert_eq!(optional::<String>(object, "a", &mut cx).unwrap(), None);
        assert_eq!(optional::<String>(object, "missing", &mut cx).unwrap(), None);
        assert_eq!(
            optional::<String>(object, "b", &mut cx).unwrap(),
            Some("x".to_string())
        );
    }

    #[test]
    fn required_helper_distinguishes_missing_from_null() {
        let object = json!({"a": null});
        let object = object.as_object().unwrap();
        let mut cx = Decoder::new(DecodeOptions::strict());
        let err = required::<String>(object, "a", &mut cx).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::NullField);
        assert_eq!(err.path.to_string(), "$.a");
        let err = required::<String>(object, "b", &mut cx).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingField);
        assert!(cx.path().is_root());
    }

    #[test]
    fn canonical_sorts_keys_at_every_depth() {
        let value = json!({"b": [{"z": 1, "a": 2}], "a": {"y": null, "x": true}});
        assert_eq!(
            canonical(&value).to_string(),
            r#"{"a":{"x":true,"y":null},"b":[{"a":2,"z":1}]}"#
        );
        assert_eq!(canonical(&value), value);
        assert_eq!(canonical(&json!(3)), json!(3));
    }

    #[test]
    fn non_finite_float_encodes_as_null() {
        assert_eq!(f64::NAN.to_json(), Value::Null);
        assert_eq!(2.5f64.to_json(), json!(2.5));
    }
}
