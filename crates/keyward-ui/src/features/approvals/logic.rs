//! Display helpers for approval policy rows.
//!
//! # Design
//! - The closed field summarises the server baseline, never the working buffer.
//! - Copy is resolved through the translation bundle with English defaults.

use crate::core::gateway::{CommitError, CommitOutcome};
use crate::i18n::TranslationBundle;
use crate::models::{Notice, SecretApprovalPolicy};

/// Closed-state summary of a policy's approvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproverSummary {
    /// No approvers configured.
    None,
    /// Number of configured approvers.
    Selected(usize),
}

impl ApproverSummary {
    /// Summarise the baseline approver set of `policy`.
    #[must_use]
    pub fn of(policy: &SecretApprovalPolicy) -> Self {
        match policy.user_approvers.len() {
            0 => Self::None,
            count => Self::Selected(count),
        }
    }

    /// Localised label, e.g. `None` or `3 selected`.
    #[must_use]
    pub fn label(self, bundle: &TranslationBundle) -> String {
        match self {
            Self::None => bundle.text("approvals.none", "None"),
            Self::Selected(count) => bundle.format(
                "approvals.selected_count",
                "{count} selected",
                &[("count", &count.to_string())],
            ),
        }
    }
}

/// Notice for a settled approver commit; failures carry the server detail separately.
#[must_use]
pub fn commit_notice(outcome: &CommitOutcome, policy_name: &str, bundle: &TranslationBundle) -> Notice {
    let args = [("name", policy_name)];
    match outcome {
        Ok(()) => Notice::success(bundle.format(
            "approvals.commit_success",
            "Updated approvers for {name}",
            &args,
        )),
        Err(err) => Notice::error(
            bundle.format(
                "approvals.commit_failed",
                "Failed to update approvers for {name}",
                &args,
            ),
            Some(err.user_message()),
        ),
    }
}

/// Notice for a commit that succeeded but whose record could not be re-read.
#[must_use]
pub fn refresh_failed_notice(
    err: &CommitError,
    policy_name: &str,
    bundle: &TranslationBundle,
) -> Notice {
    Notice::error(
        bundle.format(
            "approvals.refresh_failed",
            "Approvers for {name} were saved, but the table could not be refreshed",
            &[("name", policy_name)],
        ),
        Some(err.user_message()),
    )
}
