//! Pure UI helpers extracted from components for non-wasm testing.

use uuid::Uuid;

fn workspace_root(workspace_id: &str) -> String {
    let encoded = urlencoding::encode(workspace_id.trim());
    format!("/v1/workspaces/{encoded}")
}

/// Path listing secret approval policies for a workspace.
#[must_use]
pub fn build_policies_path(workspace_id: &str) -> String {
    format!("{}/secret-approvals", workspace_root(workspace_id))
}

/// Path addressing a single secret approval policy.
#[must_use]
pub fn build_policy_path(workspace_id: &str, policy_id: Uuid) -> String {
    format!("{}/secret-approvals/{policy_id}", workspace_root(workspace_id))
}

/// Path listing workspace members eligible as approvers.
#[must_use]
pub fn build_members_path(workspace_id: &str) -> String {
    format!("{}/members", workspace_root(workspace_id))
}

/// Path returning the current actor's permission rules.
#[must_use]
pub fn build_permissions_path(workspace_id: &str) -> String {
    format!("{}/permissions", workspace_root(workspace_id))
}

/// Join a base URL and an absolute API path without doubling slashes.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
