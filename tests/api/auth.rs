use axum::http::StatusCode;

use crate::helpers::spawn_app;

fn registration<'a>(email: &'a str, password: &'a str, repeat: &'a str) -> [(&'static str, &'a str); 3] {
    [("email", email), ("password", password), ("password_repeat", repeat)]
}

#[tokio::test]
async fn registration_sets_a_session_and_redirects_to_login() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/register")
        .form(&registration("a@example.com", "geheim", "geheim"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
    assert!(response.cookies().get("session").is_some());
    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn mismatched_passwords_create_no_user() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/register")
        .form(&registration("a@example.com", "geheim", "anders"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/register");
    assert!(response.cookies().get("session").is_none());
    assert_eq!(app.user_count().await, 0);

    let page = app.server.get("/register").await;
    assert!(page.text().contains("Passwords do not match. Please try again."));
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_session() {
    let app = spawn_app().await;
    app.server
        .post("/register")
        .form(&registration("a@example.com", "geheim", "geheim"))
        .await;
    app.server.get("/logout").await;

    let response = app
        .server
        .post("/register")
        .form(&registration("a@example.com", "anders", "anders"))
        .await;

    assert_eq!(response.header("location"), "/register");
    assert!(response.cookies().get("session").is_none());
    assert_eq!(app.user_count().await, 1);

    let page = app.server.get("/register").await;
    assert!(page.text().contains("Email already exists"));
}

#[tokio::test]
async fn registered_user_can_log_in() {
    let app = spawn_app().await;
    app.add_quote("Der Weg ist das Ziel.").await;
    app.server
        .post("/register")
        .form(&registration("a@example.com", "geheim", "geheim"))
        .await;
    app.server.get("/logout").await;

    let response = app
        .server
        .post("/login")
        .form(&[("email", "a@example.com"), ("password", "geheim")])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/home");
    assert!(response.cookies().get("session").is_some());

    let page = app.server.get("/home").await;
    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(page.text().contains("Login successful."));
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = spawn_app().await;
    app.server
        .post("/register")
        .form(&registration("a@example.com", "geheim", "geheim"))
        .await;
    app.server.get("/logout").await;

    let response = app
        .server
        .post("/login")
        .form(&[("email", "a@example.com"), ("password", "falsch")])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
    assert!(response.cookies().get("session").is_none());

    let page = app.server.get("/login").await;
    assert!(page.text().contains("Invalid username or password."));
}

#[tokio::test]
async fn login_page_has_no_error_before_an_attempt() {
    let app = spawn_app().await;

    let page = app.server.get("/login").await;

    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(!page.text().contains("Invalid username or password."));
}

#[tokio::test]
async fn logged_in_user_can_like_and_then_logout_ends_the_session() {
    let app = spawn_app().await;
    app.add_quote("Der Weg ist das Ziel.").await;
    app.server
        .post("/register")
        .form(&registration("a@example.com", "geheim", "geheim"))
        .await;

    let response = app.server.post("/home").form(&[("content_id", "1")]).await;
    assert_eq!(response.header("location"), "/home");
    assert_eq!(app.total_likes().await, 1);

    let response = app.server.post("/logout").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/index");

    let response = app.server.post("/home").form(&[("content_id", "1")]).await;
    assert_eq!(response.header("location"), "/login");
    assert_eq!(app.total_likes().await, 1);
}
