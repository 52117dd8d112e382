use shared::clock::format_countdown;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CountdownProps {
    pub remaining_ms: i64,
}

#[function_component(Countdown)]
pub fn countdown(props: &CountdownProps) -> Html {
    html! { <span class="font-mono">{ format_countdown(props.remaining_ms) }</span> }
}
