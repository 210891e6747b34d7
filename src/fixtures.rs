//! Canned API payloads for tests.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{Item, ListInfo, ListStatus, PantryItem};

pub const GROCERIES_ID: &str = "0b7d4c52-3f0e-4a8b-9d61-2e5c7a9f1b30";
pub const HARDWARE_ID: &str = "5e2a9c1d-7b4f-4e3a-8c6d-1f0b2a3c4d5e";
pub const OWNER_ID: &str = "a3c1e5f7-9b2d-4f6a-8e0c-b1d3f5a7c9e2";

pub fn item_json() -> Value {
    json!({"id": 1, "name": "Milk", "amount": "2"})
}

pub fn item() -> Item {
    Item {
        id: 1,
        name: "Milk".into(),
        amount: Some("2".into()),
    }
}

pub fn read_list_response_json() -> Value {
    json!({
        "items": [
            item_json(),
            {"id": 2, "name": "Bread", "amount": null}
        ],
        "readonly": false
    })
}

pub fn get_lists_response_json() -> Value {
    json!({
        "results": {
            GROCERIES_ID: {
                "name": "Groceries",
                "status": "owned",
                "public": false,
                "owner": OWNER_ID
            },
            HARDWARE_ID: {
                "name": "Hardware",
                "status": "shared_read",
                "public": true,
                "owner": OWNER_ID
            }
        }
    })
}

pub fn list_info() -> ListInfo {
    ListInfo {
        name: "Groceries".into(),
        status: ListStatus::Owned,
        public: false,
        owner: Uuid::parse_str(OWNER_ID).expect("OWNER_ID is a valid uuid"),
    }
}

pub fn get_pantry_response_json() -> Value {
    json!({
        "items": [
            {"id": 10, "name": "Flour", "amount": 1, "target": 3},
            {"id": 11, "name": "Salt", "amount": 2, "target": 1}
        ]
    })
}

pub fn pantry_item() -> PantryItem {
    PantryItem {
        id: 10,
        name: "Flour".into(),
        amount: 1,
        target: 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::decode;
    use crate::models::{GetListsResponse, GetPantryResponse, ReadListResponse};

    #[test]
    fn records_match_their_payloads() {
        assert_eq!(decode::<Item>(&item_json()).unwrap(), Some(item()));

        let list: ReadListResponse = decode(&read_list_response_json()).unwrap().unwrap();
        assert_eq!(list.items[0], item());

        let lists: GetListsResponse = decode(&get_lists_response_json()).unwrap().unwrap();
        assert_eq!(lists.results[GROCERIES_ID], list_info());

        let pantry: GetPantryResponse = decode(&get_pantry_response_json()).unwrap().unwrap();
        assert_eq!(pantry.items[0], pantry_item());
    }
}
