//! Approver edit session for a single policy row.
//!
//! # Design
//! - Seed the working set from the freshest policy record each time the selector opens.
//! - Toggles stay local; only the open-to-closed transition yields a [`CommitRequest`].
//! - Keep the submitted snapshot until the commit settles, then clear it on any outcome.
//! - Refuse to reopen while a commit is pending so commits for a row never overlap.

use crate::core::gateway::{ApproverCommitGateway, CommitError, CommitOutcome, CommitRequest};
use crate::models::SecretApprovalPolicy;
use std::cell::RefCell;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Ordered approver ids being edited. Never holds duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionBuffer {
    ids: Vec<Uuid>,
}

impl SelectionBuffer {
    /// Build a buffer from ids, keeping the first occurrence of each.
    #[must_use]
    pub fn seeded(ids: impl IntoIterator<Item = Uuid>) -> Self {
        let mut buffer = Self::default();
        for id in ids {
            if !buffer.contains(id) {
                buffer.ids.push(id);
            }
        }
        buffer
    }

    /// Remove `id` when present, append it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if let Some(index) = self.ids.iter().position(|current| *current == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Visible state of the approver selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Selector closed; the field shows the baseline summary.
    Closed,
    /// Selector open; toggles mutate the buffer.
    Open,
}

/// Reasons the selector refuses to open.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum OpenRefused {
    /// A previous commit for this row has not settled.
    #[error("an approver update for this policy is still in flight")]
    CommitInFlight,
    /// The actor may not edit approval policies.
    #[error("editing approval policies is not permitted")]
    PermissionDenied,
    /// The selector is already open.
    #[error("approver selector is already open")]
    AlreadyOpen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SessionTarget {
    policy_id: Uuid,
    environment_id: Uuid,
}

/// Client-side editing session for one policy's approver set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApproverEditSession {
    workspace_id: String,
    phase: SessionPhase,
    buffer: SelectionBuffer,
    target: Option<SessionTarget>,
    pending: Option<Uuid>,
}

impl ApproverEditSession {
    /// Fresh, closed session for a row in `workspace_id`.
    #[must_use]
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            phase: SessionPhase::Closed,
            buffer: SelectionBuffer::default(),
            target: None,
            pending: None,
        }
    }

    /// Current selector phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the selector is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.phase, SessionPhase::Open)
    }

    /// Whether a commit has been issued and not yet settled.
    #[must_use]
    pub const fn commit_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Working selection. Empty once closed and settled.
    #[must_use]
    pub const fn selection(&self) -> &SelectionBuffer {
        &self.buffer
    }

    /// Whether `member_id` shows as checked in the open selector.
    #[must_use]
    pub fn is_selected(&self, member_id: Uuid) -> bool {
        self.is_open() && self.buffer.contains(member_id)
    }

    /// Check whether the open trigger is interactive.
    ///
    /// # Errors
    /// Returns the first reason the selector may not open.
    pub const fn can_open(&self, edit_allowed: bool) -> Result<(), OpenRefused> {
        if self.is_open() {
            return Err(OpenRefused::AlreadyOpen);
        }
        if self.commit_in_flight() {
            return Err(OpenRefused::CommitInFlight);
        }
        if !edit_allowed {
            return Err(OpenRefused::PermissionDenied);
        }
        Ok(())
    }

    /// Open the selector, seeding the buffer from `policy`'s current approvers.
    ///
    /// # Errors
    /// Returns [`OpenRefused`] when a commit is pending, editing is denied, or the
    /// selector is already open. The session is left untouched in that case.
    pub fn open(
        &mut self,
        policy: &SecretApprovalPolicy,
        edit_allowed: bool,
    ) -> Result<(), OpenRefused> {
        if let Err(reason) = self.can_open(edit_allowed) {
            warn!(policy_id = %policy.id, %reason, "approver selector open refused");
            return Err(reason);
        }
        self.buffer = SelectionBuffer::seeded(policy.approver_ids());
        self.target = Some(SessionTarget {
            policy_id: policy.id,
            environment_id: policy.environment.id,
        });
        self.phase = SessionPhase::Open;
        debug!(
            policy_id = %policy.id,
            approver_count = self.buffer.len(),
            "approver selector opened"
        );
        Ok(())
    }

    /// Toggle a member while open. Ignored while closed; returns whether it applied.
    pub fn toggle(&mut self, member_id: Uuid) -> bool {
        if !self.is_open() {
            debug!(%member_id, "approver toggle ignored while selector is closed");
            return false;
        }
        let selected = self.buffer.toggle(member_id);
        debug!(%member_id, selected, "approver toggled");
        true
    }

    /// Close the selector and build the single commit for this session.
    ///
    /// Returns `None` when the selector was not open. The buffer keeps the submitted
    /// snapshot until [`ApproverEditSession::settle`] runs.
    pub fn close(&mut self) -> Option<CommitRequest> {
        if !self.is_open() {
            return None;
        }
        self.phase = SessionPhase::Closed;
        let target = self.target.take()?;
        let request = CommitRequest {
            workspace_id: self.workspace_id.clone(),
            policy_id: target.policy_id,
            environment_id: target.environment_id,
            approver_ids: self.buffer.ids().to_vec(),
        };
        self.pending = Some(target.policy_id);
        debug!(
            policy_id = %request.policy_id,
            approver_count = request.approver_ids.len(),
            "approver selector closed; commit issued"
        );
        Some(request)
    }

    /// Record the settlement of the pending commit and clear the buffer.
    pub fn settle(&mut self, outcome: &CommitOutcome) {
        let Some(policy_id) = self.pending.take() else {
            debug!("commit settlement ignored; nothing pending");
            return;
        };
        match outcome {
            Ok(()) => debug!(%policy_id, "approver commit settled"),
            Err(err) => warn!(%policy_id, error = %err, "approver commit failed"),
        }
        self.buffer.clear();
    }
}

/// Send a closed session's request through `gateway` and settle the session.
///
/// The session is only borrowed before and after the await, never across it.
pub async fn submit_commit<G>(
    session: &RefCell<ApproverEditSession>,
    gateway: &G,
    request: CommitRequest,
) -> CommitOutcome
where
    G: ApproverCommitGateway + ?Sized,
{
    let outcome = gateway.update(&request).await;
    session.borrow_mut().settle(&outcome);
    outcome
}

/// Commit stages, reported in the order they happen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitProgress {
    /// The update settled and the session buffer is already cleared.
    Settled(CommitOutcome),
    /// The record was re-read after a successful update.
    Refreshed(SecretApprovalPolicy),
    /// The update succeeded but the record could not be re-read.
    RefreshFailed(CommitError),
}

/// Submit `request`, report its settlement, then re-read the record when it succeeded.
///
/// Settlement is reported before the re-read starts, so a slow or failing refresh never
/// delays the outcome notice.
pub async fn commit_and_refresh<G, F>(
    session: &RefCell<ApproverEditSession>,
    gateway: &G,
    request: CommitRequest,
    mut report: F,
) where
    G: ApproverCommitGateway + ?Sized,
    F: FnMut(CommitProgress),
{
    let outcome = submit_commit(session, gateway, request.clone()).await;
    let succeeded = outcome.is_ok();
    report(CommitProgress::Settled(outcome));
    if !succeeded {
        return;
    }
    match gateway.refresh(&request).await {
        Ok(policy) => report(CommitProgress::Refreshed(policy)),
        Err(err) => {
            warn!(policy_id = %request.policy_id, error = %err, "policy refresh after commit failed");
            report(CommitProgress::RefreshFailed(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnvironmentRef, UserApprover};
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    const A: Uuid = Uuid::from_u128(0xa);
    const B: Uuid = Uuid::from_u128(0xb);
    const C: Uuid = Uuid::from_u128(0xc);

    fn policy(approvers: &[Uuid]) -> SecretApprovalPolicy {
        SecretApprovalPolicy {
            id: Uuid::from_u128(1),
            name: "prod-guard".to_string(),
            environment: EnvironmentRef {
                id: Uuid::from_u128(0xe1),
                name: "Production".to_string(),
                slug: "prod".to_string(),
            },
            secret_path: None,
            approvals: 1,
            user_approvers: approvers
                .iter()
                .map(|user_id| UserApprover { user_id: *user_id })
                .collect(),
            updated_at: None,
        }
    }

    fn set(ids: &[Uuid]) -> BTreeSet<Uuid> {
        ids.iter().copied().collect()
    }

    fn opened(approvers: &[Uuid]) -> ApproverEditSession {
        let mut session = ApproverEditSession::new("ws-1");
        session
            .open(&policy(approvers), true)
            .expect("session should open");
        session
    }

    #[test]
    fn open_seeds_buffer_from_baseline() {
        let session = opened(&[A, B]);
        assert!(session.is_open());
        assert_eq!(set(session.selection().ids()), set(&[A, B]));
    }

    #[test]
    fn open_drops_duplicate_baseline_ids() {
        let session = opened(&[A, B, A]);
        assert_eq!(session.selection().ids(), &[A, B]);
    }

    #[test]
    fn double_toggle_restores_selection() {
        let mut session = opened(&[A, B]);
        let before = session.selection().clone();
        assert!(session.toggle(C));
        assert!(session.is_selected(C));
        assert!(session.toggle(C));
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn disjoint_toggles_commute() {
        let mut left = opened(&[A]);
        left.toggle(B);
        left.toggle(C);
        let mut right = opened(&[A]);
        right.toggle(C);
        right.toggle(B);
        assert_eq!(set(left.selection().ids()), set(right.selection().ids()));
    }

    #[test]
    fn close_issues_single_request_with_edited_set() {
        let mut session = opened(&[A, B]);
        session.toggle(A);
        session.toggle(C);
        let request = session.close().expect("close should issue a commit");
        assert_eq!(request.workspace_id, "ws-1");
        assert_eq!(request.policy_id, Uuid::from_u128(1));
        assert_eq!(request.environment_id, Uuid::from_u128(0xe1));
        assert_eq!(request.approver_ids, vec![B, C]);
        assert!(session.close().is_none());
    }

    #[test]
    fn toggles_never_issue_commits() {
        let mut session = opened(&[]);
        session.toggle(A);
        session.toggle(B);
        assert!(!session.commit_in_flight());
    }

    #[test]
    fn buffer_survives_close_until_settled() {
        let mut session = opened(&[A]);
        session.toggle(B);
        session.close().expect("commit");
        assert_eq!(session.phase(), SessionPhase::Closed);
        assert!(session.commit_in_flight());
        assert_eq!(session.selection().ids(), &[A, B]);
        assert!(!session.is_selected(A));
    }

    #[test]
    fn settle_clears_buffer_on_success_and_error() {
        let outcomes: [CommitOutcome; 2] = [
            Ok(()),
            Err(CommitError::Transport("connection reset".to_string())),
        ];
        for outcome in outcomes {
            let mut session = opened(&[A, B]);
            session.close().expect("commit");
            session.settle(&outcome);
            assert!(session.selection().is_empty());
            assert!(!session.commit_in_flight());
            assert_eq!(session.phase(), SessionPhase::Closed);
        }
    }

    #[test]
    fn reopen_is_refused_while_commit_in_flight() {
        let mut session = opened(&[A]);
        session.close().expect("first commit");
        assert_eq!(
            session.open(&policy(&[A]), true),
            Err(OpenRefused::CommitInFlight)
        );
        assert!(!session.toggle(B));
        assert!(session.close().is_none());
        session.settle(&Ok(()));
        session
            .open(&policy(&[A, C]), true)
            .expect("reopen after settle");
        assert_eq!(session.selection().ids(), &[A, C]);
    }

    #[test]
    fn open_is_refused_without_edit_permission() {
        let mut session = ApproverEditSession::new("ws-1");
        assert_eq!(
            session.open(&policy(&[A]), false),
            Err(OpenRefused::PermissionDenied)
        );
        assert!(!session.is_open());
        assert!(session.selection().is_empty());
    }

    #[test]
    fn open_while_open_keeps_working_set() {
        let mut session = opened(&[A]);
        session.toggle(B);
        assert_eq!(
            session.open(&policy(&[C]), true),
            Err(OpenRefused::AlreadyOpen)
        );
        assert_eq!(session.selection().ids(), &[A, B]);
    }

    #[test]
    fn reopen_uses_freshest_record() {
        let mut session = opened(&[A]);
        session.toggle(B);
        session.close().expect("commit");
        session.settle(&Err(CommitError::Rejected {
            status: 500,
            problem: None,
        }));
        session
            .open(&policy(&[C]), true)
            .expect("reopen after failure");
        assert_eq!(session.selection().ids(), &[C]);
    }

    #[test]
    fn toggle_while_closed_is_ignored() {
        let mut session = ApproverEditSession::new("ws-1");
        assert!(!session.toggle(A));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn settle_without_pending_commit_is_ignored() {
        let mut session = opened(&[A]);
        session.settle(&Ok(()));
        assert!(session.is_open());
        assert_eq!(session.selection().ids(), &[A]);
    }

    struct RecordingGateway {
        session: Rc<RefCell<ApproverEditSession>>,
        requests: RefCell<Vec<CommitRequest>>,
        buffer_during_update: RefCell<Vec<Uuid>>,
        outcome: CommitOutcome,
        refreshed: Result<SecretApprovalPolicy, CommitError>,
        events: Rc<RefCell<Vec<&'static str>>>,
    }

    impl RecordingGateway {
        fn new(
            session: &Rc<RefCell<ApproverEditSession>>,
            outcome: CommitOutcome,
            refreshed: Result<SecretApprovalPolicy, CommitError>,
        ) -> Self {
            Self {
                session: Rc::clone(session),
                requests: RefCell::new(Vec::new()),
                buffer_during_update: RefCell::new(Vec::new()),
                outcome,
                refreshed,
                events: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    #[async_trait(?Send)]
    impl ApproverCommitGateway for RecordingGateway {
        async fn update(&self, request: &CommitRequest) -> CommitOutcome {
            self.events.borrow_mut().push("update");
            self.requests.borrow_mut().push(request.clone());
            *self.buffer_during_update.borrow_mut() =
                self.session.borrow().selection().ids().to_vec();
            self.outcome.clone()
        }

        async fn refresh(
            &self,
            _request: &CommitRequest,
        ) -> Result<SecretApprovalPolicy, CommitError> {
            self.events.borrow_mut().push("refresh");
            self.refreshed.clone()
        }
    }

    fn closed_session() -> (Rc<RefCell<ApproverEditSession>>, CommitRequest) {
        let session = Rc::new(RefCell::new(opened(&[A, B])));
        session.borrow_mut().toggle(A);
        session.borrow_mut().toggle(C);
        let request = session.borrow_mut().close().expect("commit");
        (session, request)
    }

    async fn run_with(outcome: CommitOutcome) -> (RecordingGateway, CommitOutcome) {
        let (session, request) = closed_session();
        let gateway = RecordingGateway::new(&session, outcome, Ok(policy(&[B, C])));
        let settled = submit_commit(&session, &gateway, request).await;
        assert!(session.borrow().selection().is_empty());
        assert!(!session.borrow().commit_in_flight());
        (gateway, settled)
    }

    #[tokio::test]
    async fn submit_settles_after_successful_update() {
        let (gateway, settled) = run_with(Ok(())).await;
        assert!(settled.is_ok());
        let requests = gateway.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].approver_ids, vec![B, C]);
        assert_eq!(*gateway.buffer_during_update.borrow(), vec![B, C]);
    }

    #[tokio::test]
    async fn submit_settles_after_failed_update() {
        let (gateway, settled) =
            run_with(Err(CommitError::Transport("timeout".to_string()))).await;
        assert_eq!(
            settled,
            Err(CommitError::Transport("timeout".to_string()))
        );
        assert_eq!(gateway.requests.borrow().len(), 1);
        assert_eq!(*gateway.buffer_during_update.borrow(), vec![B, C]);
    }

    async fn run_follow_up(
        outcome: CommitOutcome,
        refreshed: Result<SecretApprovalPolicy, CommitError>,
    ) -> (RecordingGateway, Vec<CommitProgress>) {
        let (session, request) = closed_session();
        let gateway = RecordingGateway::new(&session, outcome, refreshed);
        let events = Rc::clone(&gateway.events);
        let observed = Rc::clone(&session);
        let mut progress = Vec::new();
        commit_and_refresh(&session, &gateway, request, |stage| {
            if matches!(stage, CommitProgress::Settled(_)) {
                assert!(observed.borrow().selection().is_empty());
            }
            events.borrow_mut().push("report");
            progress.push(stage);
        })
        .await;
        (gateway, progress)
    }

    #[tokio::test]
    async fn settlement_is_reported_before_the_refresh_runs() {
        let fresh = policy(&[B, C]);
        let (gateway, progress) = run_follow_up(Ok(()), Ok(fresh.clone())).await;
        assert_eq!(
            progress,
            vec![CommitProgress::Settled(Ok(())), CommitProgress::Refreshed(fresh)]
        );
        assert_eq!(
            *gateway.events.borrow(),
            vec!["update", "report", "refresh", "report"]
        );
    }

    #[tokio::test]
    async fn failed_refresh_is_reported_after_successful_settlement() {
        let refresh_err = CommitError::Transport("refresh offline".to_string());
        let (_, progress) = run_follow_up(Ok(()), Err(refresh_err.clone())).await;
        assert_eq!(
            progress,
            vec![
                CommitProgress::Settled(Ok(())),
                CommitProgress::RefreshFailed(refresh_err),
            ]
        );
    }

    #[tokio::test]
    async fn failed_commit_skips_the_refresh() {
        let failure = CommitError::Rejected {
            status: 403,
            problem: None,
        };
        let (gateway, progress) =
            run_follow_up(Err(failure.clone()), Ok(policy(&[B, C]))).await;
        assert_eq!(progress, vec![CommitProgress::Settled(Err(failure))]);
        assert_eq!(*gateway.events.borrow(), vec!["update", "report"]);
    }
}
