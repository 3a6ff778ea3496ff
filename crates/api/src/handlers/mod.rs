//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers resolve the requester, load the target record, consult the
//! access-control policy, validate input, then delegate to the matching
//! repository in `pawhaven_db`. Errors map to responses via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod adoption_requests;
pub mod auth;
pub mod gallery;
pub mod pets;
pub mod profile;
