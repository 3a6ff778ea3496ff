//! Access-control policy: one table mapping (entity, action) to the rule a
//! requester must satisfy, evaluated in one place.
//!
//! Unauthenticated requests that need an identity fail with
//! [`CoreError::Unauthorized`]; authenticated requests that lack the role or
//! ownership fail with [`CoreError::Forbidden`]. The two are never merged,
//! and ownership failures are never reported as "not found".

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Pet,
    AdoptionRequest,
    GalleryImage,
}

impl Entity {
    pub fn name(self) -> &'static str {
        match self {
            Entity::Pet => "Pet",
            Entity::AdoptionRequest => "AdoptionRequest",
            Entity::GalleryImage => "GalleryImage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
    /// Personalized listing (`my-pets`, `my-adoption-requests`).
    ListOwn,
    /// Admin status transition on an adoption request.
    SetStatus,
}

/// What a requester must be for an action to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Anyone,
    Authenticated,
    /// The requester must own the record; admins are not exempt.
    Owner,
    OwnerOrAdmin,
    Admin,
    /// The action does not exist for this entity.
    Deny,
}

/// Identity resolved for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    Anonymous,
    User { id: DbId, is_staff: bool },
}

impl Requester {
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Requester::Anonymous => None,
            Requester::User { id, .. } => Some(*id),
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Requester::User { is_staff: true, .. })
    }
}

/// The policy table.
pub fn rule_for(entity: Entity, action: Action) -> Rule {
    use Action::*;

    match entity {
        Entity::Pet => match action {
            List | Retrieve => Rule::Anyone,
            Create | ListOwn => Rule::Authenticated,
            Update => Rule::OwnerOrAdmin,
            Delete => Rule::Owner,
            SetStatus => Rule::Deny,
        },
        Entity::AdoptionRequest => match action {
            List | Update | SetStatus => Rule::Admin,
            Create | ListOwn => Rule::Authenticated,
            Retrieve | Delete => Rule::OwnerOrAdmin,
        },
        Entity::GalleryImage => match action {
            List => Rule::Anyone,
            Retrieve | Create | Update | Delete => Rule::Authenticated,
            ListOwn | SetStatus => Rule::Deny,
        },
    }
}

/// Evaluate the policy for `requester` performing `action` on `entity`.
///
/// `owner` is the owning user of the target record for ownership rules; pass
/// `None` for collection-level actions. An ownership rule with no known owner
/// (e.g. a gallery image whose uploader was deleted) is forbidden to
/// everyone except, for [`Rule::OwnerOrAdmin`], admins.
pub fn authorize(
    entity: Entity,
    action: Action,
    requester: &Requester,
    owner: Option<DbId>,
) -> Result<(), CoreError> {
    let rule = rule_for(entity, action);

    if rule == Rule::Anyone {
        return Ok(());
    }
    if rule == Rule::Deny {
        return Err(CoreError::Forbidden(format!(
            "{action:?} is not permitted on {}",
            entity.name()
        )));
    }

    let Requester::User { id, is_staff } = *requester else {
        return Err(CoreError::Unauthorized(
            "Authentication credentials were not provided".into(),
        ));
    };
    let is_owner = owner == Some(id);

    let allowed = match rule {
        Rule::Authenticated => true,
        Rule::Owner => is_owner,
        Rule::OwnerOrAdmin => is_owner || is_staff,
        Rule::Admin => is_staff,
        Rule::Anyone | Rule::Deny => unreachable!("handled above"),
    };

    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You do not have permission to perform this action".into(),
        ))
    }
}
