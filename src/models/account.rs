//! Account schemas (`/api/account`).

use uuid::Uuid;

use crate::json_model;

json_model! {
    pub struct LoginRequest {
        required username: String = "username",
        required password: String = "password",
    }
}

json_model! {
    /// Bearer token for subsequent requests.
    pub struct LoginResponse {
        required token: String = "token",
    }
}

json_model! {
    pub struct RegisterRequest {
        required username: String = "username",
        required password: String = "password",
    }
}

json_model! {
    pub struct SearchAccountResponse {
        required id: Uuid = "id",
    }
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
