//! Records mirroring the Kabalist API's OpenAPI schemas.

use serde_json::Value;

use crate::model::Model;

mod account;
mod envelopes;
mod lists;
mod pantry;
mod sharing;

pub use account::{LoginRequest, LoginResponse, RegisterRequest, SearchAccountResponse};
pub use envelopes::{
    ErrResponse, OkAddToListResponse, OkAddToPantryResponse, OkCreateListResponse,
    OkDeleteItemResponse, OkDeleteListResponse, OkDeletePantryItemResponse, OkDeleteShareResponse,
    OkEditPantryItemResponse, OkGetListsResponse, OkGetPantryResponse, OkLoginResponse,
    OkReadListResponse, OkRefillPantryResponse, OkRegisterResponse, OkRemovePublicResponse,
    OkSearchAccountResponse, OkSetPublicResponse, OkShareListResponse, OkUpdateItemResponse,
    RspErr,
};
pub use lists::{
    AddToListRequest, AddToListResponse, CreateListRequest, CreateListResponse, GetListsResponse,
    Item, ListInfo, ListStatus, ReadListResponse, UpdateItemRequest,
};
pub use pantry::{AddToPantryRequest, EditPantryItemRequest, GetPantryResponse, PantryItem};
pub use sharing::ShareListRequest;

macro_rules! components {
    ($($model:ty),+ $(,)?) => {
        &[$((<$model as Model>::NAME, <$model as Model>::json_schema as fn() -> Value)),+]
    };
}

/// Schema builders for `components.schemas`, in declaration order.
pub(crate) const COMPONENTS: &[(&str, fn() -> Value)] = components![
    Item,
    ListInfo,
    CreateListRequest,
    CreateListResponse,
    GetListsResponse,
    ReadListResponse,
    AddToListRequest,
    AddToListResponse,
    UpdateItemRequest,
    PantryItem,
    AddToPantryRequest,
    EditPantryItemRequest,
    GetPantryResponse,
    LoginRequest,
    LoginResponse,
    RegisterRequest,
    SearchAccountResponse,
    ShareListRequest,
    RspErr,
    ErrResponse,
    OkCreateListResponse,
    OkGetListsResponse,
    OkReadListResponse,
    OkAddToListResponse,
    OkGetPantryResponse,
    OkLoginResponse,
    OkSearchAccountResponse,
    OkUpdateItemResponse,
    OkDeleteItemResponse,
    OkDeleteListResponse,
    OkSetPublicResponse,
    OkRemovePublicResponse,
    OkAddToPantryResponse,
    OkEditPantryItemResponse,
    OkDeletePantryItemResponse,
    OkRefillPantryResponse,
    OkShareListResponse,
    OkDeleteShareResponse,
    OkRegisterResponse,
];
