//! Pantry schemas (`/api/pantry`).

use crate::json_model;

json_model! {
    /// A tracked pantry stock level.
    pub struct PantryItem {
        required id: i32 = "id",
        required name: String = "name",
        required amount: i32 = "amount",
        required target: i32 = "target",
    }
}

json_model! {
    pub struct AddToPantryRequest {
        required name: String = "name",
        required target: i32 = "target",
    }
}

json_model! {
    /// Partial update; absent fields are left unchanged.
    pub struct EditPantryItemRequest {
        optional amount: i32 = "amount",
        optional target: i32 = "target",
    }
}

json_model! {
    pub struct GetPantryResponse {
        required items: Vec<PantryItem> = "items",
    }
}

impl PantryItem {
    /// How many units a refill would add to the shopping list.
    pub fn shortfall(&self) -> i32 {
        self.target.saturating_sub(self.amount).max(0)
    }
}

impl GetPantryResponse {
    /// Items below their target, i.e. what a refill would put on the list.
    pub fn needing_refill(&self) -> impl Iterator<Item = &PantryItem> {
        self.items.iter().filter(|item| item.shortfall() > 0)
    }
}
