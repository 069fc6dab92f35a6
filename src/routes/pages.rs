use askama::Template;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;

use crate::{errors::AppError, flash, routes::auth::Session, routes::render};

#[derive(Template)]
#[template(path = "aboutus.html")]
struct AboutUsTemplate {
    messages: Vec<String>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "agb.html")]
struct AgbTemplate {
    messages: Vec<String>,
    logged_in: bool,
}

pub async fn about_us(session: Session, jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, messages) = flash::take(jar);
    let page = AboutUsTemplate {
        messages,
        logged_in: session.is_authenticated(),
    };
    Ok((jar, render(&page)?))
}

pub async fn agb(session: Session, jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, messages) = flash::take(jar);
    let page = AgbTemplate {
        messages,
        logged_in: session.is_authenticated(),
    };
    Ok((jar, render(&page)?))
}
