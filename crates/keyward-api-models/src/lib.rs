#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Keyward secret approval API.
//!
//! The web UI decodes these payloads directly, so field names here are the wire
//! contract. Helpers that derive display or request data from a payload live next
//! to the type they read.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Secret path filter applied when a policy does not narrow its scope.
pub const MATCH_ALL_SECRET_PATH: &str = "*";

/// RFC9457-compatible problem document surfaced on validation/runtime errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    /// URI reference identifying the problem type.
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Parameters that failed validation, if applicable.
    pub invalid_params: Option<Vec<ProblemInvalidParam>>,
}

/// Invalid parameter pointer surfaced alongside a [`ProblemDetails`] payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemInvalidParam {
    /// JSON Pointer to the offending field.
    pub pointer: String,
    /// Human-readable description of the validation failure.
    pub message: String,
}

/// Environment a policy is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentRef {
    /// Environment identifier.
    pub id: Uuid,
    /// Display name of the environment.
    #[serde(default)]
    pub name: String,
    /// Short slug shown in policy tables.
    pub slug: String,
}

/// A single approver reference attached to a policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserApprover {
    /// Identifier of the approving user.
    pub user_id: Uuid,
}

/// Secret approval policy as persisted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretApprovalPolicy {
    /// Policy identifier.
    pub id: Uuid,
    /// Human-readable policy name.
    pub name: String,
    /// Environment the policy applies to.
    pub environment: EnvironmentRef,
    /// Optional secret path filter; absent means every path matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_path: Option<String>,
    /// Number of approvals required before a change is applied.
    pub approvals: u32,
    /// Users currently allowed to approve changes.
    #[serde(default)]
    pub user_approvers: Vec<UserApprover>,
    /// Last modification timestamp, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SecretApprovalPolicy {
    /// Approver user ids in server order.
    #[must_use]
    pub fn approver_ids(&self) -> Vec<Uuid> {
        self.user_approvers
            .iter()
            .map(|approver| approver.user_id)
            .collect()
    }

    /// Secret path filter, falling back to [`MATCH_ALL_SECRET_PATH`] when missing or empty.
    /// Whitespace is shown as stored.
    #[must_use]
    pub fn secret_path_filter(&self) -> &str {
        self.secret_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(MATCH_ALL_SECRET_PATH)
    }
}

/// Envelope returned when listing policies for a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SecretApprovalPolicyList {
    /// Policies in server order.
    #[serde(default)]
    pub policies: Vec<SecretApprovalPolicy>,
}

/// Envelope returned for single-policy reads and updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretApprovalPolicyEnvelope {
    /// The policy payload.
    pub policy: SecretApprovalPolicy,
}

/// Request body for replacing the approver set of a policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateSecretApprovalPolicyRequest {
    /// Complete approver set to persist.
    pub approver_user_ids: Vec<Uuid>,
    /// Environment the policy is scoped to, echoed for server-side validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<Uuid>,
}

/// User profile embedded in a workspace membership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberUser {
    /// User identifier; approvers reference this id.
    pub id: Uuid,
    /// Login name displayed in member pickers.
    pub username: String,
    /// Contact email when the caller may see it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Workspace membership record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceMember {
    /// Membership identifier.
    pub id: Uuid,
    /// Member's user profile.
    pub user: MemberUser,
}

/// Envelope returned when listing workspace members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WorkspaceMemberList {
    /// Members in directory order.
    #[serde(default)]
    pub members: Vec<WorkspaceMember>,
}

/// Actions a permission rule can grant or deny.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Read access.
    Read,
    /// Create access.
    Create,
    /// Modify existing resources.
    Edit,
    /// Remove resources.
    Delete,
    /// Wildcard covering every action.
    Manage,
}

/// Resource families a permission rule applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSubject {
    /// Secret approval policies.
    SecretApproval,
    /// Secrets themselves.
    Secrets,
    /// Workspace members.
    Member,
    /// Workspace settings.
    Settings,
    /// Wildcard covering every subject.
    All,
}

/// One permission rule for the current actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PermissionRule {
    /// Action covered by the rule.
    pub action: PermissionAction,
    /// Subject covered by the rule.
    pub subject: PermissionSubject,
    /// When true the rule denies instead of grants.
    #[serde(default)]
    pub inverted: bool,
}

/// Envelope returned when fetching the actor's workspace permissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PermissionRuleList {
    /// Rules in server order.
    #[serde(default)]
    pub rules: Vec<PermissionRule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy_json() -> serde_json::Value {
        json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "prod-guard",
            "environment": {
                "id": "00000000-0000-0000-0000-0000000000e1",
                "slug": "prod"
            },
            "approvals": 2,
            "user_approvers": [
                { "user_id": "00000000-0000-0000-0000-00000000000a" },
                { "user_id": "00000000-0000-0000-0000-00000000000b" }
            ]
        })
    }

    #[test]
    fn policy_decodes_with_optional_fields_missing() {
        let policy: SecretApprovalPolicy =
            serde_json::from_value(policy_json()).expect("policy should decode");
        assert_eq!(policy.name, "prod-guard");
        assert_eq!(policy.environment.slug, "prod");
        assert!(policy.environment.name.is_empty());
        assert!(policy.secret_path.is_none());
        assert!(policy.updated_at.is_none());
        assert_eq!(
            policy.approver_ids(),
            vec![Uuid::from_u128(0xa), Uuid::from_u128(0xb)]
        );
    }

    #[test]
    fn secret_path_filter_defaults_to_match_all() {
        let mut policy: SecretApprovalPolicy =
            serde_json::from_value(policy_json()).expect("policy should decode");
        assert_eq!(policy.secret_path_filter(), MATCH_ALL_SECRET_PATH);
        policy.secret_path = Some(String::new());
        assert_eq!(policy.secret_path_filter(), MATCH_ALL_SECRET_PATH);
        policy.secret_path = Some("/app/db".to_string());
        assert_eq!(policy.secret_path_filter(), "/app/db");
    }

    #[test]
    fn whitespace_secret_path_is_not_treated_as_missing() {
        let mut policy: SecretApprovalPolicy =
            serde_json::from_value(policy_json()).expect("policy should decode");
        policy.secret_path = Some("  ".to_string());
        assert_eq!(policy.secret_path_filter(), "  ");
    }

    #[test]
    fn update_request_omits_missing_environment() {
        let request = UpdateSecretApprovalPolicyRequest {
            approver_user_ids: vec![Uuid::from_u128(0xc)],
            environment_id: None,
        };
        let value = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(
            value,
            json!({ "approver_user_ids": ["00000000-0000-0000-0000-00000000000c"] })
        );
    }

    #[test]
    fn permission_rules_default_to_granting() {
        let list: PermissionRuleList = serde_json::from_value(json!({
            "rules": [
                { "action": "edit", "subject": "secret_approval" },
                { "action": "delete", "subject": "secret_approval", "inverted": true }
            ]
        }))
        .expect("rules should decode");
        assert_eq!(list.rules.len(), 2);
        assert!(!list.rules[0].inverted);
        assert_eq!(list.rules[1].action, PermissionAction::Delete);
        assert!(list.rules[1].inverted);
    }

    #[test]
    fn problem_details_uses_type_key() {
        let problem: ProblemDetails = serde_json::from_value(json!({
            "type": "https://keyward.dev/problems/forbidden",
            "title": "forbidden",
            "status": 403
        }))
        .expect("problem should decode");
        assert_eq!(problem.kind, "https://keyward.dev/problems/forbidden");
        assert_eq!(problem.status, 403);
        assert!(problem.invalid_params.is_none());
    }
}
