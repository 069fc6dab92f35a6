use std::path::Path;

use tracing::instrument;

use crate::{
    errors::QuoteError,
    models::{
        liked_quote::{LikeState, LikedQuoteView},
        quote::{QuoteId, QuoteModel},
        user::UserId,
    },
    store::{LikedQuoteRepository, QuoteRepository},
};

#[derive(Clone, Debug)]
pub struct QuoteService {
    quotes: QuoteRepository,
    likes: LikedQuoteRepository,
}

impl QuoteService {
    pub fn new(quotes: QuoteRepository, likes: LikedQuoteRepository) -> Self {
        Self { quotes, likes }
    }

    pub async fn random_quote(&self) -> anyhow::Result<Option<QuoteModel>> {
        self.quotes.fetch_random().await
    }

    #[instrument(name = "Service: Toggle like", skip(self))]
    pub async fn toggle_like(
        &self,
        user_id: UserId,
        quote_id: QuoteId,
    ) -> Result<LikeState, QuoteError> {
        match self.likes.toggle(user_id, quote_id).await {
            Ok(Some(state)) => {
                tracing::info!(?state, "Like toggled");
                Ok(state)
            }
            Ok(None) => {
                tracing::warn!("Quote not found");
                Err(QuoteError::NotFound)
            }
            Err(e) => {
                tracing::error!("Failed to toggle like: {:?}", e);
                Err(QuoteError::Internal(e))
            }
        }
    }

    pub async fn is_liked(&self, user_id: UserId, quote_id: QuoteId) -> anyhow::Result<bool> {
        self.likes.is_liked(user_id, quote_id).await
    }

    pub async fn liked_quotes(&self, user_id: UserId) -> anyhow::Result<Vec<LikedQuoteView>> {
        self.likes.list_by_user(user_id).await
    }

    /// Load one quote per non-blank line of `path`, but only into an empty
    /// table. Returns the number of quotes inserted.
    #[instrument(name = "Service: Seed quotes", skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn seed_from_file(&self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        if self.quotes.count().await? > 0 {
            tracing::info!("Quotes already present, skipping seed");
            return Ok(0);
        }

        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let mut inserted = 0;
        for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.quotes.insert(line).await?;
            inserted += 1;
        }

        tracing::info!(inserted, "Seeded quotes");
        Ok(inserted)
    }
}
