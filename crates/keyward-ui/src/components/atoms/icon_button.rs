use yew::prelude::*;

/// Props for icon-only buttons in table rows.
#[derive(Properties, PartialEq)]
pub(crate) struct IconButtonProps {
    /// Accessible label for the button.
    pub aria_label: AttrValue,
    /// Additional CSS classes.
    #[prop_or_default]
    pub class: Classes,
    /// Render with the destructive color scheme.
    #[prop_or_default]
    pub danger: bool,
    /// Whether the button is disabled.
    #[prop_or_default]
    pub disabled: bool,
    /// Click handler; never fires while disabled.
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    /// Icon content.
    #[prop_or_default]
    pub children: Children,
}

#[function_component(IconButton)]
pub(crate) fn icon_button(props: &IconButtonProps) -> Html {
    let classes = classes!(
        "icon-btn",
        "ghost",
        props.danger.then_some("danger"),
        props.class.clone()
    );
    let onclick = {
        let onclick = props.onclick.clone();
        let disabled = props.disabled;
        Callback::from(move |event: MouseEvent| {
            if !disabled {
                onclick.emit(event);
            }
        })
    };
    html! {
        <button
            class={classes}
            type="button"
            aria-label={props.aria_label.clone()}
            aria-disabled={props.disabled.to_string()}
            onclick={onclick}
            disabled={props.disabled}
        >
            {for props.children.iter()}
        </button>
    }
}
