//! One-shot user notifications carried across a redirect in a cookie.

use axum::response::Redirect;
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

const FLASH_COOKIE: &str = "flash";
/// Older messages are dropped once more than this many are queued.
const MAX_MESSAGES: usize = 5;

/// Queue `message` for the next rendered page.
pub fn push(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let mut messages = pending(&jar);
    messages.push(message.into());
    if messages.len() > MAX_MESSAGES {
        messages.drain(..messages.len() - MAX_MESSAGES);
    }

    let value = serde_json::to_string(&messages).unwrap_or_else(|_| "[]".into());
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(&value).into_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    jar.add(cookie)
}

/// Drain every queued message.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<String>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }

    let messages = pending(&jar);
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

/// Queue `message` and redirect to `to`.
pub fn redirect(jar: CookieJar, message: impl Into<String>, to: &str) -> (CookieJar, Redirect) {
    (push(jar, message), Redirect::to(to))
}

fn pending(jar: &CookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| urlencoding::decode(c.value()).ok())
        .and_then(|value| serde_json::from_str(&value).ok())
        .unwrap_or_default()
}
