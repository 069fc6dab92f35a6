use axum::http::StatusCode;

use crate::helpers::spawn_app;

#[tokio::test]
async fn liking_twice_creates_then_removes_the_like() {
    let app = spawn_app().await;
    app.add_user(7, "seven@example.com").await;
    let quote_id = app.add_quote("Der Weg ist das Ziel.").await;
    assert_eq!(quote_id, 1);

    let response = app
        .server
        .post("/home")
        .add_cookie(app.session_for(7))
        .form(&[("content_id", "1")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/home");
    assert_eq!(app.like_count(7, 1).await, 1);

    let page = app.server.get("/home").add_cookie(app.session_for(7)).await;
    assert!(page.text().contains("Zitat erfolgreich geliked."));

    let response = app
        .server
        .post("/home")
        .add_cookie(app.session_for(7))
        .form(&[("content_id", "1")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/home");
    assert_eq!(app.like_count(7, 1).await, 0);

    let page = app.server.get("/home").add_cookie(app.session_for(7)).await;
    assert!(page.text().contains("Zitat erfolgreich entfernt."));
}

#[tokio::test]
async fn anonymous_like_redirects_to_login_without_writing() {
    let app = spawn_app().await;
    app.add_quote("Der Weg ist das Ziel.").await;

    let response = app.server.post("/home").form(&[("content_id", "1")]).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
    assert_eq!(app.total_likes().await, 0);

    let page = app.server.get("/login").await;
    assert!(page.text().contains("Bitte melde dich an, um ein Zitat zu liken."));
}

#[tokio::test]
async fn forged_session_is_treated_as_anonymous() {
    let app = spawn_app().await;
    app.add_user(7, "seven@example.com").await;
    app.add_quote("Der Weg ist das Ziel.").await;

    let response = app
        .server
        .post("/home")
        .add_cookie(axum_extra::extract::cookie::Cookie::new("session", "7"))
        .form(&[("content_id", "1")])
        .await;

    assert_eq!(response.header("location"), "/login");
    assert_eq!(app.total_likes().await, 0);
}

#[tokio::test]
async fn liking_a_missing_quote_redirects_home_with_a_message() {
    let app = spawn_app().await;
    app.add_user(7, "seven@example.com").await;
    app.add_quote("Der Weg ist das Ziel.").await;

    for content_id in ["99", "abc"] {
        let response = app
            .server
            .post("/home")
            .add_cookie(app.session_for(7))
            .form(&[("content_id", content_id)])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/home");
        assert_eq!(app.total_likes().await, 0);

        let page = app.server.get("/home").add_cookie(app.session_for(7)).await;
        assert!(page.text().contains("Zitat nicht gefunden."));
    }
}

#[tokio::test]
async fn failed_toggle_rolls_back_and_shows_a_generic_error() {
    let app = spawn_app().await;
    app.add_quote("Der Weg ist das Ziel.").await;

    // the session names a user that has no row, so the insert violates the foreign key
    let response = app
        .server
        .post("/home")
        .add_cookie(app.session_for(99))
        .form(&[("content_id", "1")])
        .await;

    assert_eq!(response.header("location"), "/home");
    assert_eq!(app.total_likes().await, 0);

    let page = app.server.get("/home").add_cookie(app.session_for(99)).await;
    assert!(page.text().contains("Beim Liken des Zitats ist ein Fehler aufgetreten."));
}

#[tokio::test]
async fn home_with_no_quotes_redirects_to_index() {
    let app = spawn_app().await;

    let response = app.server.get("/home").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/index");

    let page = app.server.get("/index").await;
    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(page.text().contains("No quotes found."));
}

#[tokio::test]
async fn index_shows_a_stored_quote() {
    let app = spawn_app().await;
    app.add_quote("Wer nicht wagt, der nicht gewinnt.").await;

    let page = app.server.get("/index").await;

    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(page.text().contains("Wer nicht wagt, der nicht gewinnt."));
}

#[tokio::test]
async fn home_shows_the_like_state_of_the_quote() {
    let app = spawn_app().await;
    app.add_user(7, "seven@example.com").await;
    app.add_quote("Ohne Fleiß kein Preis.").await;

    let page = app.server.get("/home").add_cookie(app.session_for(7)).await;
    assert!(page.text().contains("Liken"));

    app.server
        .post("/home")
        .add_cookie(app.session_for(7))
        .form(&[("content_id", "1")])
        .await;

    let page = app.server.get("/home").add_cookie(app.session_for(7)).await;
    assert!(page.text().contains("Entfernen"));
}

#[tokio::test]
async fn liked_requires_a_session() {
    let app = spawn_app().await;

    let response = app.server.get("/liked").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");

    let page = app.server.get("/login").await;
    assert!(page.text().contains("Please log in to view liked quotes."));
}

#[tokio::test]
async fn liked_lists_only_the_users_quotes() {
    let app = spawn_app().await;
    app.add_user(1, "one@example.com").await;
    app.add_user(2, "two@example.com").await;
    app.add_quote("Der Weg ist das Ziel.").await;
    app.add_quote("Ohne Fleiß kein Preis.").await;

    for (user_id, content_id) in [(1, "1"), (2, "2")] {
        app.server
            .post("/home")
            .add_cookie(app.session_for(user_id))
            .form(&[("content_id", content_id)])
            .await;
    }

    let page = app.server.get("/liked").add_cookie(app.session_for(1)).await;

    assert_eq!(page.status_code(), StatusCode::OK);
    let text = page.text();
    assert!(text.contains("Der Weg ist das Ziel."));
    assert!(!text.contains("Ohne Fleiß kein Preis."));
}

#[tokio::test]
async fn redirect_home_points_to_home() {
    let app = spawn_app().await;

    let response = app.server.get("/redirect_home").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/home");
}
