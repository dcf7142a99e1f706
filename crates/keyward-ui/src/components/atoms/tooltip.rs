//! Hover tooltip wrapper.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TooltipProps {
    pub tip: AttrValue,
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Tooltip)]
pub(crate) fn tooltip(props: &TooltipProps) -> Html {
    html! {
        <div class={classes!("tooltip", props.class.clone())} data-tip={props.tip.clone()}>
            { for props.children.iter() }
        </div>
    }
}
