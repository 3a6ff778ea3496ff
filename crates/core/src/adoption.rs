//! Adoption request status values and the admin transition rules.
//!
//! A request is always created `pending`. An admin may then move it to
//! `approved` or `rejected`; both are terminal. Re-applying the current
//! status is accepted as a no-op so repeated admin calls are idempotent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdoptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AdoptionStatus::Pending => STATUS_PENDING,
            AdoptionStatus::Approved => STATUS_APPROVED,
            AdoptionStatus::Rejected => STATUS_REJECTED,
        }
    }

    /// `approved` and `rejected` never change again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, AdoptionStatus::Pending)
    }

    /// Check whether an admin may move a request from `self` to `next`.
    /// Only `pending` moves, and only forward.
    pub fn transition_to(self, next: AdoptionStatus) -> Result<AdoptionStatus, CoreError> {
        if self == next {
            return Ok(next);
        }
        if self.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Adoption request is already '{self}' and cannot move to '{next}'"
            )));
        }
        Ok(next)
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdoptionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(AdoptionStatus::Pending),
            STATUS_APPROVED => Ok(AdoptionStatus::Approved),
            STATUS_REJECTED => Ok(AdoptionStatus::Rejected),
            other => Err(CoreError::validation(
                "status",
                format!(
                    "'{other}' is not a valid choice. Must be one of: {}",
                    VALID_STATUSES.join(", ")
                ),
            )),
        }
    }
}
