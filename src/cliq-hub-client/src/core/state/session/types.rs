// src/core/state/session/types.rs
use serde::{Deserialize, Serialize};

use crate::core::types::UserID;

pub const TOKEN_STORAGE_KEY: &str = "token";
pub const USER_STORAGE_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub id: UserID,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Empty when nobody is signed in.
    pub token: String,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub id: UserID,
}

impl LoginResponse {
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            user: Some(SessionUser {
                username: self.username,
                id: self.id,
            }),
        }
    }
}
