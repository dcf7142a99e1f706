//! Approval policy feature state.
//!
//! # Design
//! - Cache server records by id and keep table order separately.
//! - Store records behind `Rc` so rows re-render only when their record changes.
//! - Selector entries are derived per render, never stored.

use crate::features::approvals::session::ApproverEditSession;
use crate::models::{SecretApprovalPolicy, WorkspaceMember};
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;

/// Cached approval policies for the active workspace.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PoliciesState {
    /// Policies keyed by id.
    pub by_id: HashMap<Uuid, Rc<SecretApprovalPolicy>>,
    /// Table order as returned by the server.
    pub ordered_ids: Vec<Uuid>,
}

/// Replace the cache with a fresh server listing.
pub fn set_policies(state: &mut PoliciesState, policies: Vec<SecretApprovalPolicy>) {
    state.ordered_ids = policies.iter().map(|policy| policy.id).collect();
    state.by_id = policies
        .into_iter()
        .map(|policy| (policy.id, Rc::new(policy)))
        .collect();
}

/// Insert or refresh one policy, appending unknown ids to the end of the table.
pub fn upsert_policy(state: &mut PoliciesState, policy: SecretApprovalPolicy) {
    if !state.by_id.contains_key(&policy.id) {
        state.ordered_ids.push(policy.id);
    }
    state.by_id.insert(policy.id, Rc::new(policy));
}

/// Drop a policy from the cache.
pub fn remove_policy(state: &mut PoliciesState, id: Uuid) {
    state.by_id.remove(&id);
    state.ordered_ids.retain(|existing| *existing != id);
}

/// Policies in table order.
#[must_use]
pub fn select_policies(state: &PoliciesState) -> Vec<Rc<SecretApprovalPolicy>> {
    state
        .ordered_ids
        .iter()
        .filter_map(|id| state.by_id.get(id).cloned())
        .collect()
}

/// One selectable entry in the approver selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApproverOption {
    /// User id toggled by the entry.
    pub user_id: Uuid,
    /// Display name.
    pub username: String,
    /// Whether the entry shows a check mark.
    pub checked: bool,
}

/// Selector entries in directory order, checked against the open session.
#[must_use]
pub fn approver_options(
    members: &[WorkspaceMember],
    session: &ApproverEditSession,
) -> Vec<ApproverOption> {
    members
        .iter()
        .map(|member| ApproverOption {
            user_id: member.user.id,
            username: member.user.username.clone(),
            checked: session.is_selected(member.user.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnvironmentRef, MemberUser, UserApprover};

    fn policy(id: u128, name: &str, approvers: &[u128]) -> SecretApprovalPolicy {
        SecretApprovalPolicy {
            id: Uuid::from_u128(id),
            name: name.to_string(),
            environment: EnvironmentRef {
                id: Uuid::from_u128(0xe1),
                name: "Development".to_string(),
                slug: "dev".to_string(),
            },
            secret_path: Some("/api".to_string()),
            approvals: 1,
            user_approvers: approvers
                .iter()
                .map(|id| UserApprover {
                    user_id: Uuid::from_u128(*id),
                })
                .collect(),
            updated_at: None,
        }
    }

    fn member(id: u128, username: &str) -> WorkspaceMember {
        WorkspaceMember {
            id: Uuid::from_u128(id + 0x100),
            user: MemberUser {
                id: Uuid::from_u128(id),
                username: username.to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn set_policies_preserves_server_order() {
        let mut state = PoliciesState::default();
        set_policies(
            &mut state,
            vec![policy(2, "second", &[]), policy(1, "first", &[])],
        );
        let names: Vec<_> = select_policies(&state)
            .iter()
            .map(|policy| policy.name.clone())
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn upsert_refreshes_in_place_and_appends_new() {
        let mut state = PoliciesState::default();
        set_policies(&mut state, vec![policy(1, "a", &[]), policy(2, "b", &[])]);
        upsert_policy(&mut state, policy(1, "a", &[0xa, 0xb]));
        upsert_policy(&mut state, policy(3, "c", &[]));
        assert_eq!(
            state.ordered_ids,
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
        let refreshed = state.by_id.get(&Uuid::from_u128(1)).expect("policy 1");
        assert_eq!(refreshed.user_approvers.len(), 2);
    }

    #[test]
    fn remove_policy_drops_order_and_record() {
        let mut state = PoliciesState::default();
        set_policies(&mut state, vec![policy(1, "a", &[]), policy(2, "b", &[])]);
        remove_policy(&mut state, Uuid::from_u128(1));
        assert_eq!(state.ordered_ids, vec![Uuid::from_u128(2)]);
        assert!(!state.by_id.contains_key(&Uuid::from_u128(1)));
    }

    #[test]
    fn options_follow_directory_and_open_selection() {
        let members = vec![member(0xb, "bea"), member(0xa, "ari"), member(0xc, "cal")];
        let mut session = ApproverEditSession::new("ws");
        let closed = approver_options(&members, &session);
        assert!(closed.iter().all(|option| !option.checked));

        session
            .open(&policy(1, "p", &[0xa]), true)
            .expect("open");
        session.toggle(Uuid::from_u128(0xc));
        let open = approver_options(&members, &session);
        let rendered: Vec<_> = open
            .iter()
            .map(|option| (option.username.as_str(), option.checked))
            .collect();
        assert_eq!(
            rendered,
            vec![("bea", false), ("ari", true), ("cal", true)]
        );
    }

    #[test]
    fn options_empty_directory_renders_nothing() {
        let session = ApproverEditSession::new("ws");
        assert!(approver_options(&[], &session).is_empty());
    }
}
