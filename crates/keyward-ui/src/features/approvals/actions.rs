//! Approval policy row actions.
//!
//! # Design
//! - Capture user intent separate from rendering.
//! - Actions are UI-only and never perform side effects.

use uuid::Uuid;

/// Row-level action triggers forwarded to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyRowAction {
    /// Edit the policy with this id.
    Edit(Uuid),
    /// Delete the policy with this id.
    Delete(Uuid),
}

impl PolicyRowAction {
    /// Policy targeted by the action.
    #[must_use]
    pub const fn policy_id(self) -> Uuid {
        match self {
            Self::Edit(id) | Self::Delete(id) => id,
        }
    }
}
