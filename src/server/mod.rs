pub mod error;
pub mod handlers;

pub use error::{ApiError, ServerError};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::store::PlannerStore;

/// Build the planner router. One route per store operation, plus the
/// embedded single-page UI at the root.
pub fn build_router(store: Arc<PlannerStore>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/get_data", get(handlers::get_data))
        .route("/add_task", post(handlers::add_task))
        .route("/update_task", post(handlers::update_task))
        .route("/delete_task", post(handlers::delete_task))
        .route("/add_subject", post(handlers::add_subject))
        .route("/delete_subject", post(handlers::delete_subject))
        .route("/add_chapter", post(handlers::add_chapter))
        .route("/delete_chapter", post(handlers::delete_chapter))
        .route("/increment_pomodoro", post(handlers::increment_pomodoro))
        .route("/save_journal", post(handlers::save_journal))
        .route("/journal/{date}", get(handlers::journal_entry))
        .with_state(store)
}

/// Bind and serve until the process is stopped.
pub async fn serve(store: PlannerStore, host: &str, port: u16) -> Result<(), ServerError> {
    let app = build_router(Arc::new(store));

    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "planner listening");

    axum::serve(listener, app).await?;
    Ok(())
}
