use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{
    liked_quote::{LikeState, LikedQuoteModel, LikedQuoteView},
    quote::QuoteId,
    user::UserId,
};

#[derive(Clone, Debug)]
pub struct LikedQuoteRepository {
    pool: SqlitePool,
}

impl LikedQuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Flip the like state of `(user_id, quote_id)` in one transaction.
    /// Returns `None` if the quote does not exist; nothing is written then.
    #[instrument(name = "Toggling liked quote", skip(self))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        quote_id: QuoteId,
    ) -> anyhow::Result<Option<LikeState>> {
        let mut tx = self.pool.begin().await?;

        let quote_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM quotes WHERE id = $1")
            .bind(quote_id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !quote_exists {
            tx.rollback().await?;
            return Ok(None);
        }

        let existing = sqlx::query_as::<_, LikedQuoteModel>(
            "SELECT id, user_id, quote_id FROM liked_quotes WHERE user_id = $1 AND quote_id = $2",
        )
        .bind(user_id)
        .bind(quote_id)
        .fetch_optional(&mut *tx)
        .await?;

        let state = match existing {
            Some(liked) => {
                sqlx::query("DELETE FROM liked_quotes WHERE id = $1")
                    .bind(liked.id)
                    .execute(&mut *tx)
                    .await?;
                LikeState::Unliked
            }
            None => {
                // a concurrent toggle that inserted first trips the unique index here
                sqlx::query("INSERT INTO liked_quotes (user_id, quote_id) VALUES ($1, $2)")
                    .bind(user_id)
                    .bind(quote_id)
                    .execute(&mut *tx)
                    .await?;
                LikeState::Liked
            }
        };

        tx.commit().await?;
        Ok(Some(state))
    }

    pub async fn is_liked(&self, user_id: UserId, quote_id: QuoteId) -> anyhow::Result<bool> {
        let liked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM liked_quotes WHERE user_id = $1 AND quote_id = $2",
        )
        .bind(user_id)
        .bind(quote_id)
        .fetch_optional(&self.pool)
        .await?
        .is_some();
        Ok(liked)
    }

    /// All likes of a user with the quote text, newest first.
    #[instrument(name = "Listing liked quotes", skip(self))]
    pub async fn list_by_user(&self, user_id: UserId) -> anyhow::Result<Vec<LikedQuoteView>> {
        let rows = sqlx::query_as::<_, LikedQuoteView>(
            r#"SELECT liked_quotes.id, liked_quotes.quote_id, quotes.content
            FROM liked_quotes
            JOIN quotes ON quotes.id = liked_quotes.quote_id
            WHERE liked_quotes.user_id = $1
            ORDER BY liked_quotes.id DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
