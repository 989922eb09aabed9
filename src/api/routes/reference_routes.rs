//! Reference routes (e.g., /api/v1/references/*)

use axum::{routing::{get, post}, Router};
use crate::api::controller::reference::ReferenceController;
use crate::app_state::AppState;

pub fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ReferenceController::list_summaries))
        .route("/load", post(ReferenceController::load_all))
        .route("/reset", post(ReferenceController::reset))

        .route("/{reference_type}", get(ReferenceController::get_items))
        .route("/{reference_type}/load", post(ReferenceController::load))
        .route("/{reference_type}/resolve", get(ReferenceController::resolve))
        .route("/{reference_type}/items/{id}", get(ReferenceController::get_item))
}
