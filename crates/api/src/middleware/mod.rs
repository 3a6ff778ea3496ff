//! Request-level middleware and identity extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Resolves a token if present, anonymous otherwise.
//! - [`allowed_hosts::enforce_allowed_hosts`] -- Rejects unknown `Host` headers.

pub mod allowed_hosts;
pub mod auth;
