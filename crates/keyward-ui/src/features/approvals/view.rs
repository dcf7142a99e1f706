//! Approval policy table views.
//!
//! # Design
//! - Keep API calls in the page controller and the approver selector.
//! - Each row owns an independent edit session; toggles only redraw the selector.
//! - Permission gates are evaluated from the store on every render.
//! - The commit outcome is announced as soon as it settles; the follow-up refresh reports separately.

use crate::components::atoms::icons::{IconPencil, IconTrash};
use crate::components::atoms::{EmptyState, IconButton, Tooltip};
use crate::components::dropdown::{Dropdown, DropdownItem};
use crate::core::gateway::CommitError;
use crate::core::permissions::{ActionGate, PermissionOracle};
use crate::core::store::{
    AppStore, LoadState, app_dispatch, apply_workspace_snapshot, begin_workspace_load,
    fail_workspace_load,
};
use crate::features::approvals::actions::PolicyRowAction;
use crate::features::approvals::api::load_workspace;
use crate::features::approvals::logic::{ApproverSummary, commit_notice, refresh_failed_notice};
use crate::features::approvals::session::{ApproverEditSession, CommitProgress, commit_and_refresh};
use crate::features::approvals::state::{
    approver_options, remove_policy, select_policies, upsert_policy,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::{
    Notice, PermissionAction, PermissionSubject, SecretApprovalPolicy, WorkspaceMember,
};
use crate::services::api::ApiClient;
use gloo::console;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ApprovalPoliciesPageProps {
    pub workspace_id: AttrValue,
    pub on_notice: Callback<Notice>,
}

#[function_component(ApprovalPoliciesPage)]
pub(crate) fn approval_policies_page(props: &ApprovalPoliciesPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let client = use_context::<Rc<ApiClient>>();
    let dispatch = app_dispatch();
    let policies = use_selector(|store: &AppStore| select_policies(&store.policies));
    let members = use_selector(|store: &AppStore| Rc::clone(&store.members));
    let load = use_selector(|store: &AppStore| store.load.clone());
    let reload = use_state(|| 0u32);

    {
        let client = client.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |(workspace_id, _): &(AttrValue, u32)| {
                if let Some(client) = client {
                    let workspace_id = workspace_id.to_string();
                    dispatch.reduce_mut(|store| begin_workspace_load(store, &workspace_id));
                    yew::platform::spawn_local(async move {
                        match load_workspace(&client, &workspace_id).await {
                            Ok(snapshot) => dispatch
                                .reduce_mut(|store| apply_workspace_snapshot(store, snapshot)),
                            Err(err) => {
                                console::error!("approval policy load failed", err.to_string());
                                dispatch
                                    .reduce_mut(|store| fail_workspace_load(store, err.to_string()));
                            }
                        }
                    });
                }
                || ()
            },
            (props.workspace_id.clone(), *reload),
        );
    }

    let Some(client) = client else {
        return html! {
            <EmptyState title={AttrValue::from(t("errors.missing_api"))} error={true} />
        };
    };

    let on_action = {
        let policies = policies.clone();
        let on_notice = props.on_notice.clone();
        let workspace_id = props.workspace_id.to_string();
        let bundle = bundle.clone();
        Callback::from(move |action: PolicyRowAction| {
            let Some(policy) = policies
                .iter()
                .find(|policy| policy.id == action.policy_id())
                .cloned()
            else {
                return;
            };
            let args = [("name", policy.name.as_str())];
            match action {
                PolicyRowAction::Edit(_) => on_notice.emit(Notice::info(bundle.format(
                    "approvals.edit_requested",
                    "Opening editor for {name}",
                    &args,
                ))),
                PolicyRowAction::Delete(id) => {
                    let prompt = bundle.format(
                        "approvals.delete_confirm",
                        "Delete approval policy {name}?",
                        &args,
                    );
                    if !gloo::dialogs::confirm(&prompt) {
                        return;
                    }
                    let client = Rc::clone(&client);
                    let dispatch = dispatch.clone();
                    let on_notice = on_notice.clone();
                    let workspace_id = workspace_id.clone();
                    let bundle = bundle.clone();
                    yew::platform::spawn_local(async move {
                        let args = [("name", policy.name.as_str())];
                        match client.delete_policy(&workspace_id, id).await {
                            Ok(()) => {
                                dispatch.reduce_mut(|store| remove_policy(&mut store.policies, id));
                                on_notice.emit(Notice::success(bundle.format(
                                    "approvals.delete_success",
                                    "Deleted {name}",
                                    &args,
                                )));
                            }
                            Err(err) => {
                                console::error!("approval policy delete failed", err.to_string());
                                on_notice.emit(Notice::error(
                                    bundle.format(
                                        "approvals.delete_failed",
                                        "Failed to delete {name}",
                                        &args,
                                    ),
                                    Some(err.to_string()),
                                ));
                            }
                        }
                    });
                }
            }
        })
    };

    let on_retry = {
        let reload = reload.clone();
        Callback::from(move |()| reload.set((*reload).wrapping_add(1)))
    };

    let body = match &*load {
        LoadState::Idle | LoadState::Loading if policies.is_empty() => html! {
            <p class="muted">{t("approvals.loading")}</p>
        },
        LoadState::Failed(message) if policies.is_empty() => html! {
            <EmptyState
                title={AttrValue::from(t("approvals.load_failed"))}
                description={Some(AttrValue::from(message.clone()))}
                error={true}
                on_retry={Some(on_retry)}
            />
        },
        _ if policies.is_empty() => html! {
            <EmptyState
                title={AttrValue::from(t("approvals.empty"))}
                description={Some(AttrValue::from(t("approvals.empty_hint")))}
            />
        },
        _ => html! {
            <table class="table policy-table">
                <thead>
                    <tr>
                        <th>{t("approvals.col_name")}</th>
                        <th>{t("approvals.col_environment")}</th>
                        <th>{t("approvals.col_secret_path")}</th>
                        <th>{t("approvals.col_approvers")}</th>
                        <th>{t("approvals.col_approvals")}</th>
                        <th class="text-right">{t("approvals.col_actions")}</th>
                    </tr>
                </thead>
                <tbody>
                    {for policies.iter().map(|policy| html! {
                        <ApprovalPolicyRow
                            key={policy.id.to_string()}
                            workspace_id={props.workspace_id.clone()}
                            policy={Rc::clone(policy)}
                            members={Rc::clone(&*members)}
                            on_action={on_action.clone()}
                            on_notice={props.on_notice.clone()}
                        />
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <section class="approvals-page">
            <div class="panel">
                <div class="panel-head">
                    <div>
                        <h3>{t("approvals.title")}</h3>
                        <p class="muted">{t("approvals.body")}</p>
                    </div>
                </div>
                {body}
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ApprovalPolicyRowProps {
    pub workspace_id: AttrValue,
    pub policy: Rc<SecretApprovalPolicy>,
    pub members: Rc<Vec<WorkspaceMember>>,
    pub on_action: Callback<PolicyRowAction>,
    pub on_notice: Callback<Notice>,
}

#[function_component(ApprovalPolicyRow)]
pub(crate) fn approval_policy_row(props: &ApprovalPolicyRowProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let permissions = use_selector(|store: &AppStore| store.permissions.clone());
    let denied = bundle.text(
        "permissions.denied",
        "You do not have permission to perform this action",
    );
    let edit_label = bundle.text("approvals.edit", "Edit");
    let delete_label = bundle.text("approvals.delete", "Delete");
    let edit_gate = ActionGate::evaluate(
        &*permissions,
        PermissionAction::Edit,
        PermissionSubject::SecretApproval,
        edit_label.clone(),
        denied.clone(),
    );
    let delete_gate = ActionGate::evaluate(
        &*permissions,
        PermissionAction::Delete,
        PermissionSubject::SecretApproval,
        delete_label.clone(),
        denied,
    );
    let policy_id = props.policy.id;

    let on_edit = {
        let gate = edit_gate.clone();
        let on_action = props.on_action.clone();
        Callback::from(move |_: MouseEvent| {
            gate.trigger(|| on_action.emit(PolicyRowAction::Edit(policy_id)));
        })
    };
    let on_delete = {
        let gate = delete_gate.clone();
        let on_action = props.on_action.clone();
        Callback::from(move |_: MouseEvent| {
            gate.trigger(|| on_action.emit(PolicyRowAction::Delete(policy_id)));
        })
    };

    let policy = &props.policy;
    html! {
        <tr>
            <td>{policy.name.clone()}</td>
            <td>{policy.environment.slug.clone()}</td>
            <td>{policy.secret_path_filter().to_string()}</td>
            <td>
                <ApproverSelector
                    workspace_id={props.workspace_id.clone()}
                    policy={Rc::clone(policy)}
                    members={Rc::clone(&props.members)}
                    edit_allowed={permissions.can(PermissionAction::Edit, PermissionSubject::SecretApproval)}
                    on_notice={props.on_notice.clone()}
                />
            </td>
            <td>{policy.approvals.to_string()}</td>
            <td>
                <div class="flex items-center justify-end space-x-4">
                    <Tooltip tip={AttrValue::from(edit_gate.tooltip().to_string())}>
                        <IconButton
                            aria_label={AttrValue::from(edit_label)}
                            disabled={!edit_gate.allowed()}
                            onclick={on_edit}
                        >
                            <IconPencil size="5" />
                        </IconButton>
                    </Tooltip>
                    <Tooltip tip={AttrValue::from(delete_gate.tooltip().to_string())}>
                        <IconButton
                            aria_label={AttrValue::from(delete_label)}
                            danger={true}
                            disabled={!delete_gate.allowed()}
                            onclick={on_delete}
                        >
                            <IconTrash size="5" />
                        </IconButton>
                    </Tooltip>
                </div>
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ApproverSelectorProps {
    pub workspace_id: AttrValue,
    pub policy: Rc<SecretApprovalPolicy>,
    pub members: Rc<Vec<WorkspaceMember>>,
    pub edit_allowed: bool,
    pub on_notice: Callback<Notice>,
}

#[function_component(ApproverSelector)]
pub(crate) fn approver_selector(props: &ApproverSelectorProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let client = use_context::<Rc<ApiClient>>();
    let workspace_id = props.workspace_id.to_string();
    let session = use_mut_ref(move || ApproverEditSession::new(workspace_id));
    let redraw = use_force_update();

    let on_open_change = {
        let session = Rc::clone(&session);
        let redraw = redraw.clone();
        let policy = Rc::clone(&props.policy);
        let edit_allowed = props.edit_allowed;
        let on_notice = props.on_notice.clone();
        let bundle = bundle.clone();
        Callback::from(move |open: bool| {
            if open {
                if session.borrow_mut().open(&policy, edit_allowed).is_ok() {
                    redraw.force_update();
                }
                return;
            }
            let Some(request) = session.borrow_mut().close() else {
                return;
            };
            redraw.force_update();
            let Some(client) = client.clone() else {
                let outcome = Err(CommitError::Transport("missing API client".to_string()));
                session.borrow_mut().settle(&outcome);
                on_notice.emit(commit_notice(&outcome, &policy.name, &bundle));
                return;
            };
            let session = Rc::clone(&session);
            let redraw = redraw.clone();
            let policy = Rc::clone(&policy);
            let on_notice = on_notice.clone();
            let bundle = bundle.clone();
            let dispatch = app_dispatch();
            yew::platform::spawn_local(async move {
                commit_and_refresh(&session, client.as_ref(), request, |progress| match progress {
                    CommitProgress::Settled(outcome) => {
                        if let Err(err) = &outcome {
                            console::error!("approver update failed", err.to_string());
                        }
                        on_notice.emit(commit_notice(&outcome, &policy.name, &bundle));
                        redraw.force_update();
                    }
                    CommitProgress::Refreshed(fresh) => {
                        dispatch.reduce_mut(|store| upsert_policy(&mut store.policies, fresh));
                    }
                    CommitProgress::RefreshFailed(err) => {
                        console::error!("approval policy refresh failed", err.to_string());
                        on_notice.emit(refresh_failed_notice(&err, &policy.name, &bundle));
                    }
                })
                .await;
            });
        })
    };

    let current = session.borrow();
    let disabled = !current.is_open() && current.can_open(props.edit_allowed).is_err();
    let options = approver_options(&props.members, &current);
    let summary = ApproverSummary::of(&props.policy).label(&bundle);

    html! {
        <Dropdown
            open={current.is_open()}
            trigger_label={AttrValue::from(summary)}
            disabled={disabled}
            heading={Some(AttrValue::from(bundle.text(
                "approvals.selector_heading",
                "Select members that are allowed to approve changes",
            )))}
            on_open_change={on_open_change}
        >
            {if options.is_empty() {
                html! {
                    <li class="muted">{bundle.text("approvals.no_members", "No workspace members available")}</li>
                }
            } else {
                html! {
                    {for options.into_iter().map(|option| {
                        let on_select = {
                            let session = Rc::clone(&session);
                            let redraw = redraw.clone();
                            let user_id = option.user_id;
                            Callback::from(move |()| {
                                if session.borrow_mut().toggle(user_id) {
                                    redraw.force_update();
                                }
                            })
                        };
                        html! {
                            <DropdownItem
                                key={option.user_id.to_string()}
                                checked={option.checked}
                                on_select={on_select}
                            >
                                {option.username}
                            </DropdownItem>
                        }
                    })}
                }
            }}
        </Dropdown>
    }
}
