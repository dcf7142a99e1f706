//! Toast stack for commit and delete notices.
//!
//! # Design
//! - Each toast owns its dismissal timer, so a new toast never restarts older ones.
//! - Lifetime comes from [`ToastKind::ttl_ms`]; errors stay up longer and announce as alerts.
//! - The detail line (usually the server's problem detail) renders under the headline.

use crate::components::atoms::icons::IconX;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::{Toast, ToastKind};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    html! {
        <div class="toast-host" aria-live="polite">
            {for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id}
                    toast={toast.clone()}
                    on_dismiss={props.on_dismiss.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let id = props.toast.id;
    let kind = props.toast.notice.kind;
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timer = Timeout::new(kind.ttl_ms(), move || on_dismiss.emit(id));
                move || drop(timer)
            },
            id,
        );
    }
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };
    let notice = &props.toast.notice;
    let role = if kind == ToastKind::Error { "alert" } else { "status" };

    html! {
        <div class={classes!("toast", kind.class())} role={role}>
            <div class="toast-body">
                <strong>{notice.message.clone()}</strong>
                {notice.detail.clone().map(|detail| html! {
                    <p class="toast-detail">{detail}</p>
                }).unwrap_or_default()}
            </div>
            <button
                type="button"
                class="ghost"
                aria-label={bundle.text("toast.dismiss", "Dismiss")}
                onclick={on_close}
            >
                <IconX size="4" />
            </button>
        </div>
    }
}
