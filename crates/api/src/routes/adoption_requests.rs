//! Route definitions for the `/adoption-requests` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::adoption_requests;
use crate::state::AppState;

/// Routes mounted at `/adoption-requests`.
///
/// ```text
/// GET    /                                -> list (admin)
/// POST   /                                -> create
/// GET    /my-adoption-requests            -> my_requests
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update (admin)
/// DELETE /{id}                            -> delete
/// PUT    /{id}/admin/adoption-requests    -> set_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(adoption_requests::list).post(adoption_requests::create),
        )
        .route(
            "/my-adoption-requests",
            get(adoption_requests::my_requests),
        )
        .route(
            "/{id}",
            get(adoption_requests::get_by_id)
                .put(adoption_requests::update)
                .delete(adoption_requests::delete),
        )
        .route(
            "/{id}/admin/adoption-requests",
            put(adoption_requests::set_status),
        )
}
