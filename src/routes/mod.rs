use askama::Template;
use axum::response::Html;

use crate::errors::AppError;

pub mod auth;
pub mod pages;
pub mod quotes;

pub(crate) fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
