use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use super::{quote::QuoteId, user::UserId};

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct LikedQuoteModel {
    pub id: i64,
    pub user_id: UserId,
    pub quote_id: QuoteId,
}

/// A like joined with the text of the liked quote.
#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct LikedQuoteView {
    pub id: i64,
    pub quote_id: QuoteId,
    pub content: String,
}

/// Where a (user, quote) pair ends up after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    Unliked,
}

impl LikeState {
    pub fn message(&self) -> &'static str {
        match self {
            LikeState::Liked => "Zitat erfolgreich geliked.",
            LikeState::Unliked => "Zitat erfolgreich entfernt.",
        }
    }
}
