//! Review Roster Server - HTTP API for review-roster
//!
//! Exposes team management, pull request assignment and statistics as a
//! JSON API on top of [`roster_core`].

pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use roster_core::{AssignmentEngine, Config, RosterService, StatsService};
use roster_db::Database;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AssignmentEngine>,
    pub roster: Arc<RosterService>,
    pub stats: Arc<StatsService>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self::with_engine(db.clone(), AssignmentEngine::new(db))
    }

    /// Build state around a preconfigured engine, e.g. one with a seeded RNG
    pub fn with_engine(db: Database, engine: AssignmentEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            roster: Arc::new(RosterService::new(db.clone())),
            stats: Arc::new(StatsService::new(db)),
        }
    }
}

/// Build the application router
///
/// Requests running longer than `request_timeout` are cut off; their open
/// transaction is rolled back when the handler future is dropped. A panicking
/// handler becomes a 500 response instead of tearing down the connection.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .route("/team/add", post(handlers::teams::add_team))
        .route("/team/get", get(handlers::teams::get_team))
        .route("/team/deactivateUsers", post(handlers::teams::deactivate_users))
        .route("/users/setIsActive", post(handlers::users::set_is_active))
        .route("/users/getReview", get(handlers::users::get_review))
        .route("/pullRequest/create", post(handlers::pull_requests::create))
        .route("/pullRequest/merge", post(handlers::pull_requests::merge))
        .route("/pullRequest/reassign", post(handlers::pull_requests::reassign))
        .route("/pullRequest/userReviews", get(handlers::users::get_review))
        .route("/stats", get(handlers::stats::get_stats))
        .route("/ping", get(handlers::stats::health))
        .route("/health", get(handlers::stats::health));

    with_middleware(routes, request_timeout).with_state(state)
}

fn with_middleware<S>(routes: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Open the database, apply migrations and serve until Ctrl-C
pub async fn serve(config: Config) -> roster_core::Result<()> {
    let db = Database::connect(config.database.clone()).await?;
    db.migrate().await?;

    let app = router(AppState::new(db.clone()), config.server.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.server.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
