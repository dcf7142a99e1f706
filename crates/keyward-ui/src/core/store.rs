//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.

use crate::core::permissions::ProjectPermissionSet;
use crate::features::approvals::state::{PoliciesState, set_policies};
use crate::models::{PermissionRule, SecretApprovalPolicy, WorkspaceMember};
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use yewdux::dispatch::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Workspace currently loaded into the store.
    pub workspace_id: Option<String>,
    /// Load status for the workspace data.
    pub load: LoadState,
    /// Permission rules for the signed-in actor.
    pub permissions: ProjectPermissionSet,
    /// Approval policies for the active workspace.
    pub policies: PoliciesState,
    /// Workspace member directory, in server order.
    pub members: Rc<Vec<WorkspaceMember>>,
}

/// Load status for workspace-scoped data.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in progress.
    Loading,
    /// Data is present.
    Ready,
    /// The last fetch failed.
    Failed(String),
}

/// Everything fetched when a workspace page mounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    /// Permission rules for the actor.
    pub rules: Vec<PermissionRule>,
    /// Policies in server order.
    pub policies: Vec<SecretApprovalPolicy>,
    /// Member directory.
    pub members: Vec<WorkspaceMember>,
}

/// Mark `workspace_id` as loading, dropping data cached for another workspace.
pub fn begin_workspace_load(store: &mut AppStore, workspace_id: &str) {
    if store.workspace_id.as_deref() != Some(workspace_id) {
        *store = AppStore {
            workspace_id: Some(workspace_id.to_string()),
            ..AppStore::default()
        };
    }
    store.load = LoadState::Loading;
}

/// Apply a fetched workspace snapshot.
pub fn apply_workspace_snapshot(store: &mut AppStore, snapshot: WorkspaceSnapshot) {
    store.permissions = ProjectPermissionSet::new(snapshot.rules);
    set_policies(&mut store.policies, snapshot.policies);
    store.members = Rc::new(snapshot.members);
    store.load = LoadState::Ready;
}

/// Record a failed workspace fetch, keeping any previously loaded data.
pub fn fail_workspace_load(store: &mut AppStore, message: String) {
    store.load = LoadState::Failed(message);
}

/// Shared dispatch handle for the app store.
#[cfg(target_arch = "wasm32")]
pub(crate) fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}
