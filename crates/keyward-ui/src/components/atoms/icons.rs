//! Inline SVG icons used by policy rows and the shell.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct IconProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub size: Option<AttrValue>,
}

fn size_class(size: Option<&AttrValue>) -> Option<String> {
    size.map(|value| {
        let raw = value.as_ref();
        if raw.starts_with("size-") {
            raw.to_string()
        } else {
            format!("size-{raw}")
        }
    })
}

fn icon_svg(props: &IconProps, body: Html) -> Html {
    let mut classes = Classes::new();
    if let Some(size) = size_class(props.size.as_ref()) {
        classes.push(size);
    }
    classes.extend(props.class.clone());
    let title = props.title.clone();
    let aria_hidden = title.is_none().then_some(AttrValue::from("true"));
    html! {
        <svg
            class={classes}
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-linecap="round"
            stroke-linejoin="round"
            stroke-width="2"
            role="img"
            aria-hidden={aria_hidden}
            aria-label={title.clone()}
        >
            {title.map(|text| html! { <title>{text}</title> }).unwrap_or_default()}
            {body}
        </svg>
    }
}

#[function_component(IconCheckCircle2)]
pub(crate) fn icon_check_circle_2(props: &IconProps) -> Html {
    icon_svg(
        props,
        html! { <>
            <circle cx="12" cy="12" r="10" />
            <path d="m9 12l2 2l4-4" />
        </> },
    )
}

#[function_component(IconChevronDown)]
pub(crate) fn icon_chevron_down(props: &IconProps) -> Html {
    icon_svg(props, html! { <path d="m6 9l6 6l6-6" /> })
}

#[function_component(IconPencil)]
pub(crate) fn icon_pencil(props: &IconProps) -> Html {
    icon_svg(
        props,
        html! { <path d="M21.174 6.812a1 1 0 0 0-3.986-3.987L3.842 16.174a2 2 0 0 0-.5.83l-1.321 4.352a.5.5 0 0 0 .623.622l4.353-1.32a2 2 0 0 0 .83-.497zM15 5l4 4" /> },
    )
}

#[function_component(IconTrash)]
pub(crate) fn icon_trash(props: &IconProps) -> Html {
    icon_svg(
        props,
        html! { <path d="M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6M3 6h18M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2" /> },
    )
}

#[function_component(IconX)]
pub(crate) fn icon_x(props: &IconProps) -> Html {
    icon_svg(props, html! { <path d="M18 6L6 18M6 6l12 12" /> })
}
