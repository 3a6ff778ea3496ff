//! Route definitions for the `/pets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// Routes mounted at `/pets`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /my-pets   -> my_pets
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// PATCH  /{id}      -> patch
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pets::list).post(pets::create))
        .route("/my-pets", get(pets::my_pets))
        .route(
            "/{id}",
            get(pets::get_by_id)
                .put(pets::update)
                .patch(pets::patch)
                .delete(pets::delete),
        )
}
