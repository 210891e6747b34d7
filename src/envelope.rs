//! Typed view over the `{"ok": ...}` / `{"err": ...}` response envelope.

use serde_json::Value;

use crate::codec::{self, Decoded, DecodeOptions, Decoder, FromJson, ToJson};
use crate::errors::{DecodeError, Error, Result};
use crate::models::RspErr;

/// A decoded API response: the payload or the server's error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Ok(T),
    Err(RspErr),
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResponse::Ok(_))
    }

    pub fn into_result(self) -> std::result::Result<T, RspErr> {
        self.into()
    }
}

impl<T> From<ApiResponse<T>> for std::result::Result<T, RspErr> {
    fn from(value: ApiResponse<T>) -> Self {
        match value {
            ApiResponse::Ok(v) => Ok(v),
            ApiResponse::Err(e) => Err(e),
        }
    }
}

impl<T: ToJson> ToJson for ApiResponse<T> {
    fn to_json(&self) -> Value {
        let (key, value) = match self {
            ApiResponse::Ok(v) => ("ok", v.to_json()),
            ApiResponse::Err(e) => ("err", e.to_json()),
        };
        let mut object = serde_json::Map::new();
        object.insert(key.to_string(), value);
        Value::Object(object)
    }
}

impl<T: FromJson> FromJson for ApiResponse<T> {
    fn from_json(value: &Value, cx: &mut Decoder) -> std::result::Result<Self, DecodeError> {
        let object = cx.expect_object(value)?;
        if object.contains_key("ok") {
            codec::required(object, "ok", cx).map(ApiResponse::Ok)
        } else if object.contains_key("err") {
            codec::required(object, "err", cx).map(ApiResponse::Err)
        } else {
            Err(cx.invalid("expected an `ok` or `err` key"))
        }
    }
}

/// Parses a response body and unwraps its envelope.
///
/// An `err` envelope becomes [`Error::Api`]. Collections inside the payload
/// are decoded strictly.
pub fn decode_response<T: FromJson>(body: &str) -> Result<T> {
    Ok(decode_response_with(body, &DecodeOptions::strict())?.into_inner())
}

/// Like [`decode_response`], reporting collection entries dropped under `options`.
pub fn decode_response_with<T: FromJson>(
    body: &str,
    options: &DecodeOptions,
) -> Result<Decoded<T>> {
    let value: Value = serde_json::from_str(body)?;
    let decoded = codec::decode_value::<ApiResponse<T>>(&value, options)?;
    let Decoded { value, dropped } = decoded;
    match value {
        ApiResponse::Ok(value) => Ok(Decoded { value, dropped }),
        ApiResponse::Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                code = err.code,
                description = %err.description,
                "api returned an error envelope"
            );
            Err(Error::Api(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::DecodeErrorKind;
    use crate::fixtures;
    use crate::models::{GetPantryResponse, ReadListResponse};

    #[test]
    fn ok_envelope_yields_payload() {
        let body = json!({"ok": fixtures::get_pantry_response_json()}).to_string();
        let pantry: GetPantryResponse = decode_response(&body).unwrap();
        assert_eq!(pantry.items.len(), 2);
    }

    #[test]
    fn err_envelope_yields_api_error() {
        let body = r#"{"err": {"code": 7, "description": "list is read only"}}"#;
        match decode_response::<Value>(body) {
            Err(Error::Api(err)) => {
                assert_eq!(err.code, 7);
                assert_eq!(err.description, "list is read only");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn neither_key_is_invalid() {
        let err = decode_response::<Value>(r#"{"data": 1}"#).unwrap_err();
        match err {
            Error::Decode(err) => {
                assert!(matches!(err.kind, DecodeErrorKind::InvalidValue(_)));
                assert!(err.path.is_root());
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn lenient_response_reports_drops() {
        let mut list = fixtures::read_list_response_json();
        list["items"].as_array_mut().unwrap().push(json!(42));
        let body = json!({"ok": list}).to_string();

        let decoded =
            decode_response_with::<ReadListResponse>(&body, &DecodeOptions::lenient()).unwrap();
        assert_eq!(decoded.value.items.len(), 2);
        assert_eq!(
            decoded.dropped_paths().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["$.ok.items[2]"]
        );
        assert!(decode_response::<ReadListResponse>(&body).is_err());
    }

    #[test]
    fn envelope_encodes_single_key() {
        let ok: ApiResponse<Value> = ApiResponse::Ok(json!({}));
        assert_eq!(ok.to_json(), json!({"ok": {}}));
        let err: ApiResponse<Value> = ApiResponse::Err(RspErr {
            code: 1,
            description: "bad".into(),
        });
        assert_eq!(err.to_json(), json!({"err": {"code": 1, "description": "bad"}}));
        assert_eq!(err.into_result().unwrap_err().code, 1);
    }
}
