//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

use std::sync::Arc;

use auth::{AuthState, PgUserRepository};
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::{get, post};
use platform::upload::ImageStore;
use publications::{PgPublicationRepository, PubState};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod reset;
mod uploads;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,publications=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let session = Arc::new(config.session_config());
    let images = Arc::new(ImageStore::new(config.uploads_dir.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let publication_repo = Arc::new(PgPublicationRepository::new(pool.clone()));

    // CORS configuration. Credentialed requests: the cookie travels with
    // fetch, and the anti-forgery header must be both accepted and
    // readable by the frontend.
    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let csrf_header = HeaderName::from_static(auth::CSRF_HEADER);
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            csrf_header.clone(),
        ]))
        .expose_headers([csrf_header])
        .allow_credentials(true);

    // Build router
    let mut app = Router::new()
        .merge(auth::router(AuthState {
            user_repo: Arc::clone(&user_repo),
            config: Arc::clone(&session),
            images: Arc::clone(&images),
        }))
        .merge(publications::router(PubState {
            repo: Arc::clone(&publication_repo),
            config: Arc::clone(&session),
            images: Arc::clone(&images),
        }))
        .merge(
            Router::new()
                .route("/uploads/{tipo}/{archivo}", get(uploads::serve_upload))
                .with_state(Arc::clone(&images)),
        );

    if !config.is_production() {
        tracing::warn!("test reset endpoint mounted");
        app = app.merge(
            Router::new()
                .route("/test/reset", post(reset::reset))
                .with_state(reset::ResetState {
                    users: Arc::clone(&user_repo),
                    publications: Arc::clone(&publication_repo),
                }),
        );
    }

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.listen_addr);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
