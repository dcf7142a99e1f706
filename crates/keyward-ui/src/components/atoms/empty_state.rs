//! Placeholder panel shown when the policy table has nothing to render.
//!
//! # Design
//! - Errors render with `role="alert"` so load failures are announced.
//! - A retry button appears only when the caller can actually retry.

use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct EmptyStateProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Render as a failure instead of a neutral placeholder.
    #[prop_or_default]
    pub error: bool,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(EmptyState)]
pub(crate) fn empty_state(props: &EmptyStateProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let retry = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_: MouseEvent| on_retry.emit(()));
        html! {
            <button type="button" class="btn btn-sm" onclick={onclick}>
                {bundle.text("approvals.retry", "Retry")}
            </button>
        }
    });
    html! {
        <div
            class={classes!("empty-state", props.error.then_some("empty-state-error"))}
            role={props.error.then_some(AttrValue::Static("alert"))}
        >
            <h4>{props.title.clone()}</h4>
            {props.description.clone().map(|text| html! { <p class="muted">{text}</p> }).unwrap_or_default()}
            {retry.unwrap_or_default()}
        </div>
    }
}
