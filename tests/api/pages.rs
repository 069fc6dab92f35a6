use axum::http::StatusCode;

use crate::helpers::spawn_app;

#[tokio::test]
async fn static_pages_render() {
    let app = spawn_app().await;

    for path in ["/aboutus", "/agb"] {
        let page = app.server.get(path).await;
        assert_eq!(page.status_code(), StatusCode::OK, "GET {path}");
    }

    let page = app.server.post("/agb").await;
    assert_eq!(page.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn responses_disable_caching() {
    let app = spawn_app().await;

    for path in ["/index", "/redirect_home", "/static/style.css"] {
        let response = app.server.get(path).await;
        assert_eq!(
            response.header("cache-control"),
            "no-cache, no-store, must-revalidate",
            "GET {path}"
        );
        assert_eq!(response.header("pragma"), "no-cache");
        assert_eq!(response.header("expires"), "0");
    }
}

#[tokio::test]
async fn root_redirects_to_index() {
    let app = spawn_app().await;

    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/index");
}
