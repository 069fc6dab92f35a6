use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

pub type UserId = i64;

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}
