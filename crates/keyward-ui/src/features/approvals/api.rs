//! API helpers for approval policies.
//!
//! # Design
//! - Keep HTTP calls localized to the feature layer.
//! - Post-commit refreshes go through the commit gateway, not these helpers.

use crate::core::store::WorkspaceSnapshot;
use crate::services::api::ApiClient;

/// Fetch permissions, policies, and members for a workspace page.
pub(crate) async fn load_workspace(
    client: &ApiClient,
    workspace_id: &str,
) -> anyhow::Result<WorkspaceSnapshot> {
    let rules = client.fetch_permissions(workspace_id).await?;
    let policies = client.fetch_policies(workspace_id).await?;
    let members = client.fetch_members(workspace_id).await?;
    Ok(WorkspaceSnapshot {
        rules,
        policies,
        members,
    })
}
