//! Permission checks used to gate row interactivity.
//!
//! # Design
//! - Answers are computed from the current rule set on every call; nothing is memoised.
//! - Deny rules win over grants; `Manage` and `All` act as wildcards.
//! - Gates only decide interactivity. The server re-checks every mutation.

use crate::models::{PermissionAction, PermissionRule, PermissionSubject};

/// Synchronous permission lookup for the current actor.
pub trait PermissionOracle {
    /// Whether `action` on `subject` is allowed.
    fn can(&self, action: PermissionAction, subject: PermissionSubject) -> bool;

    /// Inverse of [`PermissionOracle::can`].
    fn cannot(&self, action: PermissionAction, subject: PermissionSubject) -> bool {
        !self.can(action, subject)
    }
}

/// Workspace permission rules for the signed-in actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPermissionSet {
    rules: Vec<PermissionRule>,
}

impl ProjectPermissionSet {
    /// Build a set from server rules.
    #[must_use]
    pub const fn new(rules: Vec<PermissionRule>) -> Self {
        Self { rules }
    }

    /// Rules backing this set.
    #[must_use]
    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }
}

fn rule_matches(rule: &PermissionRule, action: PermissionAction, subject: PermissionSubject) -> bool {
    let action_matches = rule.action == action || rule.action == PermissionAction::Manage;
    let subject_matches = rule.subject == subject || rule.subject == PermissionSubject::All;
    action_matches && subject_matches
}

impl PermissionOracle for ProjectPermissionSet {
    fn can(&self, action: PermissionAction, subject: PermissionSubject) -> bool {
        let mut granted = false;
        for rule in self
            .rules
            .iter()
            .filter(|rule| rule_matches(rule, action, subject))
        {
            if rule.inverted {
                return false;
            }
            granted = true;
        }
        granted
    }
}

/// Interaction gate for a single row trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionGate {
    allowed: bool,
    tooltip: String,
}

impl ActionGate {
    /// Evaluate a gate against the oracle's current answer.
    #[must_use]
    pub fn evaluate<O: PermissionOracle + ?Sized>(
        oracle: &O,
        action: PermissionAction,
        subject: PermissionSubject,
        allowed_label: impl Into<String>,
        denied_label: impl Into<String>,
    ) -> Self {
        let allowed = oracle.can(action, subject);
        let tooltip = if allowed {
            allowed_label.into()
        } else {
            denied_label.into()
        };
        Self { allowed, tooltip }
    }

    /// Whether the trigger is interactive.
    #[must_use]
    pub const fn allowed(&self) -> bool {
        self.allowed
    }

    /// Tooltip text; names the denial when the trigger is inert.
    #[must_use]
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Run `callback` when the gate allows it. Returns whether it ran.
    pub fn trigger<F: FnOnce()>(&self, callback: F) -> bool {
        if self.allowed {
            callback();
        }
        self.allowed
    }
}
