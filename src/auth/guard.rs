//! Ownership checks for mutating posts and comments.
//!
//! The model is flat: a resource may be changed only by the user recorded as
//! its author. There are no roles and no override.

use std::fmt;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Edit => f.write_str("edit"),
            Action::Delete => f.write_str("delete"),
        }
    }
}

/// A resource carrying an immutable author reference.
pub trait Ownable {
    /// Human name used in error messages ("post", "comment").
    const KIND: &'static str;

    fn author_id(&self) -> Uuid;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unauthorized access - only the author can {action} this {kind}")]
pub struct Forbidden {
    pub kind: &'static str,
    pub action: Action,
}

pub fn authorize(subject_id: Uuid, author_id: Uuid) -> Access {
    if subject_id == author_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

pub fn ensure_owner<R: Ownable>(
    subject_id: Uuid,
    resource: &R,
    action: Action,
) -> Result<(), Forbidden> {
    match authorize(subject_id, resource.author_id()) {
        Access::Allow => Ok(()),
        Access::Deny => {
            warn!(
                user_id = %subject_id,
                author_id = %resource.author_id(),
                kind = R::KIND,
                %action,
                "ownership check denied"
            );
            Err(Forbidden {
                kind: R::KIND,
                action,
            })
        }
    }
}
