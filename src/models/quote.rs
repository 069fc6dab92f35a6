use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

pub type QuoteId = i64;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuoteModel {
    pub id: QuoteId,
    pub content: String,
}
