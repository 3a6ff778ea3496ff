pub mod adoption_requests;
pub mod auth;
pub mod gallery;
pub mod health;
pub mod pets;

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                                        register (public)
/// /login, /token                                   login (public)
/// /token/refresh                                   refresh (public)
/// /logout                                          logout
/// /profile                                         get, update (own account)
///
/// /pets                                            list, create
///   /my-pets                                       requester's pets
///   /{id}                                          get, put, patch, delete
///
/// /gallery                                         list, create
///   /{id}                                          get, put, delete
///
/// /adoption-requests                               list (admin), create
///   /my-adoption-requests                          requester's requests
///   /{id}                                          get, put (admin), delete
///   /{id}/admin/adoption-requests                  status transition (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .nest("/pets", pets::router())
        .nest("/gallery", gallery::router())
        .nest("/adoption-requests", adoption_requests::router())
}
