use std::convert::Infallible;
use std::fmt;

use askama::Template;
use axum::Form;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::{AppError, AuthError};
use crate::flash;
use crate::models::user::UserId;
use crate::routes::render;
use crate::startup::AppState;

pub const SESSION_COOKIE: &str = "session";

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    messages: Vec<String>,
    logged_in: bool,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    messages: Vec<String>,
    logged_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    email: String,
    password: String,
    password_repeat: String,
}

pub async fn register_page(
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, messages) = flash::take(jar);
    let page = RegisterTemplate {
        messages,
        logged_in: session.is_authenticated(),
    };
    Ok((jar, render(&page)?))
}

pub async fn login_page(session: Session, jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, messages) = flash::take(jar);
    let page = LoginTemplate {
        messages,
        logged_in: session.is_authenticated(),
    };
    Ok((jar, render(&page)?))
}

#[instrument(name = "Web: Register POST", skip_all, fields(user_email = %form.email))]
pub async fn register_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let registered = state
        .auth_service
        .register(&form.email, &form.password, &form.password_repeat)
        .await
        .and_then(|user_id| start_session(&state.session_keys, jar.clone(), user_id));

    match registered {
        Ok(jar) => (jar, Redirect::to("/login")).into_response(),
        Err(e) => flash::redirect(jar, e.to_string(), "/register").into_response(),
    }
}

#[instrument(name = "Web: Login POST", skip_all, fields(user_email = %form.email))]
pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    tracing::info!("Request to login user received!");
    let logged_in = state
        .auth_service
        .login(&form.email, &form.password)
        .await
        .and_then(|user_id| start_session(&state.session_keys, jar.clone(), user_id));

    match logged_in {
        Ok(jar) => flash::redirect(jar, "Login successful.", "/home").into_response(),
        Err(e) => flash::redirect(jar, e.to_string(), "/login").into_response(),
    }
}

#[instrument(name = "Web: Logout", skip(jar))]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/index"))
}

fn start_session(
    keys: &SessionKeys,
    jar: CookieJar,
    user_id: UserId,
) -> Result<CookieJar, AuthError> {
    let cookie = keys.issue(user_id).map_err(|e| {
        tracing::error!("JWT encoding failed: {:?}", e);
        AuthError::Internal
    })?;
    Ok(jar.add(cookie))
}

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl: chrono::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Build the session cookie for `user_id`.
    pub fn issue(&self, user_id: UserId) -> Result<Cookie<'static>, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now() + self.ttl).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;

        Ok(Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build())
    }

    /// The user id of a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Option<UserId> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| {
                tracing::warn!("Session token rejected: {:?}", e);
                e
            })
            .ok()?;
        token_data.claims.sub.parse().ok()
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The logged-in user, if any. Never rejects: a missing, forged or expired
/// cookie just means an anonymous request.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    user_id: Option<UserId>,
}

impl Session {
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

impl<S> FromRequestParts<S> for Session
where
    SessionKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let user_id = jar
            .get(SESSION_COOKIE)
            .filter(|c| !c.value().is_empty())
            .and_then(|c| keys.verify(c.value()));

        Ok(Session { user_id })
    }
}
