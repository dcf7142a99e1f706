//! Commit gateway seam for approver updates.
//!
//! # Design
//! - The edit session only builds requests; transport lives behind [`ApproverCommitGateway`].
//! - Gateways settle with success or a typed [`CommitError`]; no retries are attempted here.
//! - A successful update is followed by a re-read so cached records track the server.

use crate::models::{ProblemDetails, SecretApprovalPolicy, UpdateSecretApprovalPolicyRequest};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Snapshot of an approver edit, built once when the selector closes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRequest {
    /// Workspace owning the policy.
    pub workspace_id: String,
    /// Policy being updated.
    pub policy_id: Uuid,
    /// Environment the policy is scoped to.
    pub environment_id: Uuid,
    /// Complete approver set, in selection order.
    pub approver_ids: Vec<Uuid>,
}

impl CommitRequest {
    /// Wire body for the update call.
    #[must_use]
    pub fn to_body(&self) -> UpdateSecretApprovalPolicyRequest {
        UpdateSecretApprovalPolicyRequest {
            approver_user_ids: self.approver_ids.clone(),
            environment_id: Some(self.environment_id),
        }
    }
}

/// Failure reported when an approver update settles unsuccessfully.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    /// The request never produced a response.
    #[error("approver update could not reach the server: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("approver update was rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Problem document, when the server sent one.
        problem: Option<ProblemDetails>,
    },
    /// The request body could not be encoded.
    #[error("approver update request could not be encoded: {0}")]
    Encode(String),
}

impl CommitError {
    /// Short message suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                problem: Some(problem),
                ..
            } => problem
                .detail
                .clone()
                .unwrap_or_else(|| problem.title.clone()),
            other => other.to_string(),
        }
    }
}

/// Result delivered when a commit settles.
pub type CommitOutcome = Result<(), CommitError>;

/// Performs the network mutation for a closed edit session.
#[async_trait(?Send)]
pub trait ApproverCommitGateway {
    /// Persist the approver set carried by `request`.
    async fn update(&self, request: &CommitRequest) -> CommitOutcome;

    /// Re-read the policy targeted by `request`.
    async fn refresh(&self, request: &CommitRequest) -> Result<SecretApprovalPolicy, CommitError>;
}
