use std::path::Path;

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, header},
    response::Redirect,
    routing::get,
};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::configuration::Settings;
use crate::routes::auth::{
    SessionKeys, login_page, login_post, logout, register_page, register_post,
};
use crate::routes::pages::{about_us, agb};
use crate::routes::quotes::{home, index, liked, redirect_home, toggle_like};
use crate::services::auth::AuthService;
use crate::services::quote::QuoteService;
use crate::store::{self, LikedQuoteRepository, QuoteRepository, UserRepository};

#[derive(Clone, Debug)]
pub struct AppState {
    pub quote_service: QuoteService,
    pub auth_service: AuthService,
    pub session_keys: SessionKeys,
}

impl AppState {
    pub fn new(pool: SqlitePool, session_keys: SessionKeys) -> Self {
        let quote_service = QuoteService::new(
            QuoteRepository::new(pool.clone()),
            LikedQuoteRepository::new(pool.clone()),
        );
        let auth_service = AuthService::new(UserRepository::new(pool));

        Self {
            quote_service,
            auth_service,
            session_keys,
        }
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.session_keys.clone()
    }
}

pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/index") }))
        .route("/index", get(index))
        .route("/home", get(home).post(toggle_like))
        .route("/redirect_home", get(redirect_home))
        .route("/register", get(register_page).post(register_post))
        .route("/login", get(login_page).post(login_post))
        .route("/logout", get(logout).post(logout))
        .route("/liked", get(liked))
        .route("/aboutus", get(about_us))
        .route("/agb", get(agb).post(agb))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let pool = store::init_database(&settings.database).await?;

    let session_keys = SessionKeys::new(
        settings.application.session_secret.expose_secret().as_bytes(),
        chrono::Duration::hours(settings.application.session_ttl_hours),
    );
    let app_state = AppState::new(pool, session_keys);

    if let Some(seed_file) = &settings.application.seed_file {
        if let Err(e) = app_state.quote_service.seed_from_file(seed_file).await {
            tracing::warn!(err = ?e, seed_file = %seed_file, "could not seed quotes");
        }
    }

    let app = router(app_state, &settings.application.static_dir);

    let address = settings.application.address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(err = ?e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(err = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
