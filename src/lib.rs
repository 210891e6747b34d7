//! Typed JSON models for the Kabalist shopping list API.
//!
//! Every record mirrors one schema of the API and shares the same codec:
//! [`encode`] always emits every key (absent optionals as `null`), and
//! [`decode`] validates required keys and converts each field with a typed
//! decoder. Collections can be decoded strictly or leniently; lenient drops
//! are reported back in [`Decoded`].
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
mod envelope;
mod errors;
#[cfg(any(test, feature = "mock"))]
pub mod fixtures;
mod model;
pub mod models;
pub mod schema;

pub use codec::{
    decode_list, decode_map, decode_map_of_list, decode_value, CollectionMode, Decoded,
    DecodeOptions, Decoder, Dropped, FromJson, ToJson,
};
pub use envelope::{decode_response, decode_response_with, ApiResponse};
pub use errors::{
    json_type_name, DecodeError, DecodeErrorKind, Error, JsonPath, PathSegment, Result,
};
pub use model::{decode, decode_with, encode, FieldSpec, Model};
pub use models::*;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
