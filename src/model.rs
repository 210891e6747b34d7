//! The [`Model`] trait and the `json_model!` macro that declares records.

use serde_json::Value;

use crate::codec::{self, Decoded, DecodeOptions, Decoder, FromJson, ToJson};
use crate::errors::{DecodeError, Result};
use crate::schema::{self, FieldSchema};

/// Static description of one record field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Rust field name.
    pub name: &'static str,
    /// JSON key in the API schema.
    pub key: &'static str,
    pub required: bool,
    pub schema: fn() -> Value,
}

/// A record mirroring one API schema object.
pub trait Model: ToJson + FromJson + FieldSchema + Sized {
    /// Schema name, as used in `components.schemas`.
    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];

    /// Keys that must be present and non-null for decoding to succeed.
    fn required_keys() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|field| field.required)
            .map(|field| field.key)
            .collect()
    }

    fn json_schema() -> Value {
        schema::object_schema(Self::FIELDS)
    }

    /// Strict decode: nested collections fail on the first bad entry.
    fn from_json_value(value: &Value) -> std::result::Result<Self, DecodeError> {
        let mut cx = Decoder::new(DecodeOptions::strict());
        Self::from_json(value, &mut cx)
    }

    fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json_value(&value)?)
    }

    /// Compact JSON with object keys in sorted order.
    fn to_json_string(&self) -> String {
        codec::canonical(&self.to_json()).to_string()
    }
}

/// Encodes a record. Absent optional fields become explicit `null`s.
pub fn encode<T: Model>(record: &T) -> Value {
    record.to_json()
}

/// Decodes a record with strict collection handling.
///
/// A value that is not a JSON object yields `Ok(None)`.
pub fn decode<T: Model>(value: &Value) -> std::result::Result<Option<T>, DecodeError> {
    Ok(decode_with(value, &DecodeOptions::strict())?.map(Decoded::into_inner))
}

/// Decodes a record under `options`, reporting any dropped collection entries.
///
/// A value that is not a JSON object yields `Ok(None)`.
pub fn decode_with<T: Model>(
    value: &Value,
    options: &DecodeOptions,
) -> std::result::Result<Option<Decoded<T>>, DecodeError> {
    if !value.is_object() {
        return Ok(None);
    }
    codec::decode_value(value, options).map(Some)
}

/// Declares a record type and its codec.
///
/// Each field is `required` or `optional`, followed by its Rust name, type
/// and JSON key. Optional fields are stored as `Option<T>`.
///
/// ```
/// use kabalist_models::{decode, encode, Model};
/// use serde_json::json;
///
/// kabalist_models::json_model! {
///     /// Rename a list.
///     pub struct RenameListRequest {
///         required new_name: String = "newName",
///         optional reason: String = "reason",
///     }
/// }
///
/// let req = RenameListRequest { new_name: "Weekly".into(), reason: None };
/// assert_eq!(encode(&req), json!({"newName": "Weekly", "reason": null}));
/// assert_eq!(RenameListRequest::required_keys(), vec!["newName"]);
///
/// let back: Option<RenameListRequest> = decode(&json!({"newName": "Weekly"}))?;
/// assert_eq!(back, Some(req));
/// # Ok::<(), kabalist_models::DecodeError>(())
/// ```
#[macro_export]
macro_rules! json_model {
    (@ty required $ty:ty) => { $ty };
    (@ty optional $ty:ty) => { ::std::option::Option<$ty> };

    (@required required) => { true };
    (@required optional) => { false };

    (@decode required $ty:ty, $object:ident, $key:literal, $cx:ident) => {
        $crate::codec::required::<$ty>($object, $key, $cx)?
    };
    (@decode optional $ty:ty, $object:ident, $key:literal, $cx:ident) => {
        $crate::codec::optional::<$ty>($object, $key, $cx)?
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $kind:ident $field:ident : $ty:ty = $key:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $crate::json_model!(@ty $kind $ty),
            )+
        }

        impl $crate::Model for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [$crate::FieldSpec] = &[
                $(
                    $crate::FieldSpec {
                        name: stringify!($field),
                        key: $key,
                        required: $crate::json_model!(@required $kind),
                        schema: <$ty as $crate::schema::FieldSchema>::field_schema,
                    },
                )+
            ];
        }

        impl $crate::ToJson for $name {
            fn to_json(&self) -> $crate::__private::serde_json::Value {
                let mut object = $crate::__private::serde_json::Map::new();
                $(
                    object.insert(
                        ::std::string::String::from($key),
                        $crate::ToJson::to_json(&self.$field),
                    );
                )+
                $crate::__private::serde_json::Value::Object(object)
            }
        }

        impl $crate::FromJson for $name {
            fn from_json(
                value: &$crate::__private::serde_json::Value,
                cx: &mut $crate::Decoder,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                let object = cx.expect_object(value)?;
                ::std::result::Result::Ok(Self {
                    $( $field: $crate::json_model!(@decode $kind $ty, object, $key, cx), )+
                })
            }
        }

        impl $crate::schema::FieldSchema for $name {
            fn field_schema() -> $crate::__private::serde_json::Value {
                $crate::schema::component_ref(stringify!($name))
            }
        }

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&<Self as $crate::Model>::to_json_string(self), state);
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&<Self as $crate::Model>::to_json_string(self))
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    &$crate::ToJson::to_json(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value: $crate::__private::serde_json::Value =
                    $crate::__private::serde::Deserialize::deserialize(deserializer)?;
                <Self as $crate::Model>::from_json_value(&value)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
