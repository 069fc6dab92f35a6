use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    errors::{AppError, QuoteError},
    flash,
    models::{
        liked_quote::LikedQuoteView,
        quote::{QuoteId, QuoteModel},
    },
    routes::{auth::Session, render},
    startup::AppState,
};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    messages: Vec<String>,
    logged_in: bool,
    quote: Option<QuoteModel>,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    messages: Vec<String>,
    logged_in: bool,
    quote: QuoteModel,
    liked: bool,
}

#[derive(Template)]
#[template(path = "liked.html")]
struct LikedTemplate {
    messages: Vec<String>,
    logged_in: bool,
    liked_quotes: Vec<LikedQuoteView>,
}

#[derive(Debug, Deserialize)]
pub struct LikeForm {
    content_id: String,
}

#[instrument(name = "Web: Index", skip_all)]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let quote = state.quote_service.random_quote().await?;

    let (jar, messages) = flash::take(jar);
    let page = IndexTemplate {
        messages,
        logged_in: session.is_authenticated(),
        quote,
    };
    Ok((jar, render(&page)?))
}

#[instrument(name = "Web: Home", skip_all, fields(user_id = ?session.user_id()))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(quote) = state.quote_service.random_quote().await? else {
        tracing::warn!("No quotes in the database");
        return Ok(flash::redirect(jar, "No quotes found.", "/index").into_response());
    };

    let liked = match session.user_id() {
        Some(user_id) => state.quote_service.is_liked(user_id, quote.id).await?,
        None => false,
    };

    let (jar, messages) = flash::take(jar);
    let page = HomeTemplate {
        messages,
        logged_in: session.is_authenticated(),
        quote,
        liked,
    };
    Ok((jar, render(&page)?).into_response())
}

#[instrument(
    name = "Web: Toggle like",
    skip_all,
    fields(user_id = ?session.user_id(), content_id = %form.content_id)
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LikeForm>,
) -> impl IntoResponse {
    let Some(user_id) = session.user_id() else {
        tracing::warn!("Like attempt without a session");
        return flash::redirect(jar, "Bitte melde dich an, um ein Zitat zu liken.", "/login");
    };

    let outcome = match form.content_id.trim().parse::<QuoteId>() {
        Ok(quote_id) => state.quote_service.toggle_like(user_id, quote_id).await,
        Err(_) => Err(QuoteError::NotFound),
    };

    let message = match outcome {
        Ok(like_state) => like_state.message().to_string(),
        Err(e) => e.to_string(),
    };
    flash::redirect(jar, message, "/home")
}

pub async fn redirect_home() -> Redirect {
    Redirect::to("/home")
}

#[instrument(name = "Web: Liked quotes", skip_all, fields(user_id = ?session.user_id()))]
pub async fn liked(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(
            flash::redirect(jar, "Please log in to view liked quotes.", "/login").into_response(),
        );
    };

    let liked_quotes = state.quote_service.liked_quotes(user_id).await?;

    let (jar, messages) = flash::take(jar);
    let page = LikedTemplate {
        messages,
        logged_in: true,
        liked_quotes,
    };
    Ok((jar, render(&page)?).into_response())
}
