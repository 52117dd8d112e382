use shared::SessionState;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub session: SessionState,
    pub on_session_change: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let sign_out = {
        let on_session_change = props.on_session_change.clone();
        Callback::from(move |_: MouseEvent| {
            let on_session_change = on_session_change.clone();
            spawn_local(async move {
                if let Err(e) = api::sign_out().await {
                    log::error!("Sign out failed: {}", e);
                }
                on_session_change.emit(());
            });
        })
    };

    html! {
        <nav class={styles::NAV}>
            <div class={styles::NAV_CONTENT}>
                <span class={styles::NAV_BRAND}>{"Lottery"}</span>
                if let Some(email) = props.session.email() {
                    <div class="flex items-center gap-4">
                        <span class={styles::TEXT_SMALL}>{ email.to_string() }</span>
                        <button class={styles::BUTTON_SECONDARY} onclick={sign_out}>{"Sign out"}</button>
                    </div>
                }
            </div>
        </nav>
    }
}
