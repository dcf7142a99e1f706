//! Controlled dropdown surface with checkable entries.
//!
//! # Design
//! - The caller owns the open flag; the dropdown only requests changes through `on_open_change`.
//! - Outside clicks, Escape, and re-clicking the trigger all request a close.
//! - Entries never close the surface, so several members can be toggled per session.

use crate::components::atoms::icons::{IconCheckCircle2, IconChevronDown};
use gloo::events::EventListener;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, Node};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DropdownProps {
    pub open: bool,
    pub trigger_label: AttrValue,
    pub on_open_change: Callback<bool>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub heading: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Dropdown)]
pub(crate) fn dropdown(props: &DropdownProps) -> Html {
    let root = use_node_ref();
    {
        let root = root.clone();
        let on_open_change = props.on_open_change.clone();
        use_effect_with_deps(
            move |open: &bool| {
                let listeners = open.then(|| {
                    let doc = document();
                    let outside_click = {
                        let on_open_change = on_open_change.clone();
                        EventListener::new(&doc, "mousedown", move |event| {
                            let target = event
                                .target()
                                .and_then(|target| target.dyn_into::<Node>().ok());
                            let inside = root
                                .get()
                                .zip(target)
                                .is_some_and(|(root, target)| root.contains(Some(&target)));
                            if !inside {
                                on_open_change.emit(false);
                            }
                        })
                    };
                    let escape = EventListener::new(&doc, "keydown", move |event| {
                        let is_escape = event
                            .dyn_ref::<KeyboardEvent>()
                            .is_some_and(|key| key.key() == "Escape");
                        if is_escape {
                            on_open_change.emit(false);
                        }
                    });
                    (outside_click, escape)
                });
                move || drop(listeners)
            },
            props.open,
        );
    }

    let on_trigger = {
        let on_open_change = props.on_open_change.clone();
        let open = props.open;
        let disabled = props.disabled;
        Callback::from(move |_: MouseEvent| {
            if !disabled || open {
                on_open_change.emit(!open);
            }
        })
    };

    html! {
        <div
            ref={root}
            class={classes!("dropdown", props.open.then_some("dropdown-open"), props.class.clone())}
        >
            <button
                type="button"
                class="input dropdown-trigger text-left"
                aria-haspopup="menu"
                aria-expanded={props.open.to_string()}
                disabled={props.disabled && !props.open}
                onclick={on_trigger}
            >
                <span>{props.trigger_label.clone()}</span>
                <IconChevronDown size="4" />
            </button>
            {if props.open {
                html! {
                    <ul class="dropdown-content menu p-2 shadow bg-base-200 rounded-box" role="menu">
                        {props.heading.clone().map(|heading| html! {
                            <li class="menu-title">{heading}</li>
                        }).unwrap_or_default()}
                        { for props.children.iter() }
                    </ul>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DropdownItemProps {
    pub checked: bool,
    pub on_select: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(DropdownItem)]
pub(crate) fn dropdown_item(props: &DropdownItemProps) -> Html {
    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_select.emit(());
        })
    };
    html! {
        <li role="menuitemcheckbox" aria-checked={props.checked.to_string()}>
            <button type="button" class="dropdown-item" onclick={onclick}>
                <span>{ for props.children.iter() }</span>
                {if props.checked {
                    html! { <IconCheckCircle2 size="4" class="text-primary" /> }
                } else {
                    html! {}
                }}
            </button>
        </li>
    }
}
