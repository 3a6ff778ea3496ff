//! Domain logic for the pawhaven adoption backend.
//!
//! Everything in this crate is pure: field validation, the adoption status
//! state machine, and the access-control policy table. Persistence lives in
//! `pawhaven-db` and HTTP concerns in `pawhaven-api`.

pub mod account;
pub mod adoption;
pub mod error;
pub mod gallery;
pub mod pagination;
pub mod pet;
pub mod policy;
pub mod types;
pub mod validation;
