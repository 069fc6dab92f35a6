use rand::Rng;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::quote::{QuoteId, QuoteModel};

#[derive(Clone, Debug)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Pick a quote at a uniformly random offset. `None` when the table is empty.
    #[instrument(name = "Fetching random quote", skip(self))]
    pub async fn fetch_random(&self) -> anyhow::Result<Option<QuoteModel>> {
        let count = self.count().await?;
        if count == 0 {
            return Ok(None);
        }

        let offset = rand::thread_rng().gen_range(0..count);
        let quote = sqlx::query_as::<_, QuoteModel>(
            "SELECT id, content FROM quotes ORDER BY id LIMIT 1 OFFSET $1",
        )
        .bind(offset)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quote)
    }

    pub async fn insert(&self, content: &str) -> anyhow::Result<QuoteId> {
        let id = sqlx::query_scalar::<_, QuoteId>(
            "INSERT INTO quotes (content) VALUES ($1) RETURNING id",
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
