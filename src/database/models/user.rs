//! User model.

use serde::{Deserialize, Serialize};

/// A registered user. Credentials live with the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub fullname: String,
}
