//! Response envelopes: every endpoint answers `{"ok": ...}` or `{"err": ...}`.
//!
//! Endpoints without a payload declare `ok` as an opaque value; servers send
//! `{}` there, but any JSON is accepted.

use serde_json::Value;

use crate::json_model;

use super::{
    AddToListResponse, CreateListResponse, GetListsResponse, GetPantryResponse, LoginResponse,
    ReadListResponse, SearchAccountResponse,
};

json_model! {
    /// Server-side failure description.
    pub struct RspErr {
        required code: u64 = "code",
        required description: String = "description",
    }
}

json_model! {
    pub struct ErrResponse {
        required err: RspErr = "err",
    }
}

impl std::error::Error for RspErr {}

impl From<ErrResponse> for RspErr {
    fn from(value: ErrResponse) -> Self {
        value.err
    }
}

/// Declares `Ok*Response` envelopes around a payload type.
macro_rules! ok_responses {
    ($($name:ident => $payload:ty),+ $(,)?) => {
        $(
            json_model! {
                pub struct $name {
                    required ok: $payload = "ok",
                }
            }
        )+
    };
}

ok_responses! {
    OkCreateListResponse => CreateListResponse,
    OkGetListsResponse => GetListsResponse,
    OkReadListResponse => ReadListResponse,
    OkAddToListResponse => AddToListResponse,
    OkGetPantryResponse => GetPantryResponse,
    OkLoginResponse => LoginResponse,
    OkSearchAccountResponse => SearchAccountResponse,

    OkUpdateItemResponse => Value,
    OkDeleteItemResponse => Value,
    OkDeleteListResponse => Value,
    OkSetPublicResponse => Value,
    OkRemovePublicResponse => Value,
    OkAddToPantryResponse => Value,
    OkEditPantryItemResponse => Value,
    OkDeletePantryItemResponse => Value,
    OkRefillPantryResponse => Value,
    OkShareListResponse => Value,
    OkDeleteShareResponse => Value,
    OkRegisterResponse => Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::codec::ToJson;
    use crate::model::decode;

    #[test]
    fn delete_pantry_item_accepts_any_ok_value() {
        let resp: OkDeletePantryItemResponse = decode(&json!({"ok": {}})).unwrap().unwrap();
        assert_eq!(resp.ok, json!({}));
        let resp: OkDeletePantryItemResponse = decode(&json!({"ok": true})).unwrap().unwrap();
        assert_eq!(resp.ok, json!(true));
    }

    #[test]
    fn typed_ok_payload_errors_point_inside_ok() {
        let err = decode::<OkCreateListResponse>(&json!({"ok": {"id": 5}})).unwrap_err();
        assert_eq!(err.to_string(), "$.ok.id: expected string, found integer");
    }

    #[test]
    fn err_response_converts_to_rsp_err() {
        let resp: ErrResponse = decode(&json!({"err": {"code": 3, "description": "unauthorized"}}))
            .unwrap()
            .unwrap();
        let err = RspErr::from(resp.clone());
        assert_eq!(err.code, 3);
        assert_eq!(
            crate::Error::Api(err).to_string(),
            "api error 3: unauthorized"
        );
        assert_eq!(resp.to_json(), json!({"err": {"code": 3, "description": "unauthorized"}}));
    }
}
