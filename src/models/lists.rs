//! Shopping list schemas (`/api/list`).

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::codec::{Decoder, FromJson, ToJson};
use crate::errors::DecodeError;
use crate::json_model;
use crate::schema::{component_ref, FieldSchema};

/// How the caller relates to a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListStatus {
    Owned,
    SharedWrite,
    SharedRead,
    /// Status added server-side after this crate was built.
    Other(String),
}

impl ListStatus {
    pub const KNOWN: [&'static str; 3] = ["owned", "shared_write", "shared_read"];

    pub fn as_str(&self) -> &str {
        match self {
            ListStatus::Owned => "owned",
            ListStatus::SharedWrite => "shared_write",
            ListStatus::SharedRead => "shared_read",
            ListStatus::Other(other) => other.as_str(),
        }
    }

    /// True for statuses that allow adding and editing items.
    pub fn can_write(&self) -> bool {
        matches!(self, ListStatus::Owned | ListStatus::SharedWrite)
    }

    pub fn json_schema() -> Value {
        json!({ "type": "string", "enum": Self::KNOWN })
    }
}

impl From<&str> for ListStatus {
    fn from(value: &str) -> Self {
        match value {
            "owned" => ListStatus::Owned,
            "shared_write" => ListStatus::SharedWrite,
            "shared_read" => ListStatus::SharedRead,
            other => ListStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ListStatus {
    fn from(value: String) -> Self {
        ListStatus::from(value.as_str())
    }
}

impl From<ListStatus> for String {
    fn from(value: ListStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToJson for ListStatus {
    fn to_json(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl FromJson for ListStatus {
    fn from_json(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(ListStatus::from)
            .ok_or_else(|| cx.unexpected("string", value))
    }
}

impl FieldSchema for ListStatus {
    fn field_schema() -> Value {
        component_ref("ListStatus")
    }
}

json_model! {
    /// Summary of a list visible to the caller.
    pub struct ListInfo {
        required name: String = "name",
        required status: ListStatus = "status",
        required public: bool = "public",
        required owner: Uuid = "owner",
    }
}

json_model! {
    /// One entry of a shopping list.
    pub struct Item {
        required id: i32 = "id",
        required name: String = "name",
        /// Free-form quantity ("2", "500g").
        optional amount: String = "amount",
    }
}

json_model! {
    pub struct CreateListRequest {
        required name: String = "name",
    }
}

json_model! {
    pub struct CreateListResponse {
        required id: Uuid = "id",
    }
}

json_model! {
    /// Lists owned by or shared with the caller, keyed by list id.
    pub struct GetListsResponse {
        required results: HashMap<String, ListInfo> = "results",
    }
}

json_model! {
    pub struct ReadListResponse {
        required items: Vec<Item> = "items",
        required readonly: bool = "readonly",
    }
}

json_model! {
    pub struct AddToListRequest {
        required name: String = "name",
        optional amount: String = "amount",
    }
}

json_model! {
    pub struct AddToListResponse {
        required id: i32 = "id",
    }
}

json_model! {
    /// Partial update; absent fields are left unchanged.
    pub struct UpdateItemRequest {
        optional name: String = "name",
        optional amount: String = "amount",
    }
}

impl GetListsResponse {
    /// Lists the caller may edit.
    pub fn writable(&self) -> impl Iterator<Item = (&String, &ListInfo)> {
        self.results.iter().filter(|(_, info)| info.status.can_write())
    }
}

impl UpdateItemRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_value, CollectionMode, DecodeOptions};
    use crate::fixtures;
    use crate::model::{decode, decode_with};

    #[test]
    fn list_status_round_trips_known_and_unknown() {
        assert_eq!(ListStatus::from("shared_read"), ListStatus::SharedRead);
        let other = ListStatus::from("archived");
        assert_eq!(other, ListStatus::Other("archived".into()));
        assert_eq!(other.to_json(), json!("archived"));
        assert!(!ListStatus::SharedRead.can_write());
        assert!(ListStatus::SharedWrite.can_write());
    }

    #[test]
    fn list_status_rejects_non_strings() {
        let err = decode_value::<ListStatus>(&json!(1), &DecodeOptions::strict()).unwrap_err();
        assert_eq!(err.to_string(), "$: expected string, found integer");
    }

    #[test]
    fn get_lists_response_decodes_map_of_records() {
        let resp: GetListsResponse = decode(&fixtures::get_lists_response_json())
            .unwrap()
            .unwrap();
        assert_eq!(resp.results.len(), 2);
        let info = &resp.results[fixtures::GROCERIES_ID];
        assert_eq!(info.name, "Groceries");
        assert_eq!(info.status, ListStatus::Owned);
        assert_eq!(resp.writable().count(), 1);
    }

    #[test]
    fn lenient_read_list_drops_broken_items() {
        let mut body = fixtures::read_list_response_json();
        body["items"]
            .as_array_mut()
            .unwrap()
            .insert(1, json!({"id": "seven", "name": "bad"}));

        let decoded = decode_with::<ReadListResponse>(&body, &DecodeOptions::lenient())
            .unwrap()
            .unwrap();
        assert_eq!(decoded.value.items.len(), 2);
        assert_eq!(decoded.dropped_count(), 1);
        assert_eq!(decoded.dropped[0].path.to_string(), "$.items[1]");
        assert_eq!(
            decoded.dropped[0].error.to_string(),
            "$.items[1].id: expected integer, found string"
        );

        let err = decode::<ReadListResponse>(&body).unwrap_err();
        assert_eq!(err.path.to_string(), "$.items[1].id");
    }

    #[test]
    fn dropped_record_discards_its_own_nested_drops() {
        // The second response drops an item, then fails on `readonly`.
        let body = json!([
            {"items": [], "readonly": false},
            {"items": [{"id": 1, "name": "ok"}, "junk"]},
        ]);
        let decoded =
            crate::codec::decode_list::<ReadListResponse>(&body, CollectionMode::Lenient).unwrap();
        assert_eq!(decoded.value.len(), 1);
        let paths: Vec<String> = decoded.dropped_paths().map(ToString::to_string).collect();
        assert_eq!(paths, vec!["$[1]"]);
        assert_eq!(decoded.dropped[0].error.path.to_string(), "$[1].readonly");
    }

    #[test]
    fn update_item_request_encodes_nulls() {
        let req = UpdateItemRequest {
            name: Some("oat milk".into()),
            amount: None,
        };
        assert_eq!(req.to_json(), json!({"name": "oat milk", "amount": null}));
        assert!(!req.is_empty());
        let empty: UpdateItemRequest = decode(&json!({})).unwrap().unwrap();
        assert!(empty.is_empty());
    }
}
