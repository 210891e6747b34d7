//! List sharing schemas (`/api/share`).

use uuid::Uuid;

use crate::json_model;

json_model! {
    /// Grant another account access to a list.
    pub struct ShareListRequest {
        /// Account id, as returned by account search.
        required share_with: Uuid = "share_with",
        required readonly: bool = "readonly",
    }
}

impl ShareListRequest {
    pub fn read_only(share_with: Uuid) -> Self {
        Self {
            share_with,
            readonly: true,
        }
    }

    pub fn read_write(share_with: Uuid) -> Self {
        Self {
            share_with,
            readonly: false,
        }
    }
}
