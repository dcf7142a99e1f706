//! Application shell: contexts, routing, and toasts.
//!
//! # Design
//! - Build the API client and translation bundle once and share them through contexts.
//! - Pages report notifications upward; the shell owns the toast queue.
//! - Logging is installed before the first render so core events reach the console.

use crate::components::atoms::EmptyState;
use crate::components::toast::ToastHost;
use crate::core::telemetry::init_logging;
use crate::features::approvals::view::ApprovalPoliciesPage;
use crate::i18n::TranslationBundle;
use crate::models::{Notice, Toast};
use crate::services::api::ApiClient;
use gloo::console;
use preferences::{api_base_url, load_api_key, load_locale, load_log_level};
pub(crate) use routes::Route;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

mod preferences;
mod routes;

#[function_component(KeywardApp)]
pub(crate) fn keyward_app() -> Html {
    let locale = use_state(load_locale);
    let client = use_memo(|_| ApiClient::new(api_base_url(), load_api_key()), ());
    let toasts = use_reducer(ToastQueue::default);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    let push_toast = {
        let toasts = toasts.dispatcher();
        Callback::from(move |notice: Notice| toasts.dispatch(ToastAction::Push(notice)))
    };
    let dismiss_toast = {
        let toasts = toasts.dispatcher();
        Callback::from(move |id: u64| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    let render = {
        let bundle = (*bundle).clone();
        move |route: Route| match route {
            Route::Policies { workspace_id } => html! {
                <ApprovalPoliciesPage
                    workspace_id={AttrValue::from(workspace_id)}
                    on_notice={push_toast.clone()}
                />
            },
            Route::NotFound => html! {
                <EmptyState title={AttrValue::from(bundle.text("errors.not_found", "Page not found"))} />
            },
        }
    };

    let dir = if bundle.rtl() { "rtl" } else { "ltr" };
    html! {
        <ContextProvider<Rc<ApiClient>> context={Rc::clone(&client)}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <BrowserRouter>
                    <main class="app-shell" dir={dir}>
                        <Switch<Route> render={render} />
                    </main>
                    <ToastHost toasts={toasts.items.clone()} on_dismiss={dismiss_toast} />
                </BrowserRouter>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<Rc<ApiClient>>>
    }
}

/// Toast queue owned by the shell. Reducer-backed so async callbacks never push onto a stale list.
#[derive(Clone, Debug, Default, PartialEq)]
struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

enum ToastAction {
    Push(Notice),
    Dismiss(u64),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notice) => {
                next.next_id += 1;
                next.items.push(Toast {
                    id: next.next_id,
                    notice,
                });
            }
            ToastAction::Dismiss(id) => next.items.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

/// Entrypoint for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&load_log_level()) {
        console::warn!("logging unavailable", err.to_string());
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<KeywardApp>::with_root(root).render();
    } else {
        yew::Renderer::<KeywardApp>::new().render();
    }
}
