use shared::constants::{INVALID_EMAIL_ERROR, LOGIN_PROMPT};
use shared::validation::validate_email;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, SubmitEvent};
use yew::prelude::*;

use crate::api;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct LoginPromptProps {
    pub on_session_change: Callback<()>,
}

#[function_component(LoginPrompt)]
pub fn login_prompt(props: &LoginPromptProps) -> Html {
    let email_ref = use_node_ref();
    let error = use_state(String::new);
    let loading = use_state(|| false);

    let handle_submit = {
        let email_ref = email_ref.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_session_change = props.on_session_change.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }

            let email = email_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            if validate_email(&email).is_err() {
                error.set(INVALID_EMAIL_ERROR.to_string());
                return;
            }

            error.set(String::new());
            loading.set(true);
            let loading = loading.clone();
            let on_session_change = on_session_change.clone();
            spawn_local(async move {
                match api::sign_in(&email).await {
                    Ok(_) => on_session_change.emit(()),
                    Err(e) => log::error!("Sign in failed: {}", e),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class={styles::CENTERED}>
            <h2 class={styles::TEXT_H2}>{ LOGIN_PROMPT }</h2>
            <form class={classes!(styles::FORM, "w-full", "max-w-sm")} onsubmit={handle_submit}>
                <input
                    type="email"
                    placeholder="you@school.edu"
                    class={styles::INPUT}
                    ref={email_ref}
                />
                if !error.is_empty() {
                    <p class={styles::TEXT_ERROR}>{ (*error).clone() }</p>
                }
                <button type="submit" class={styles::BUTTON_PRIMARY} disabled={*loading}>
                    {"Sign in"}
                </button>
            </form>
        </div>
    }
}
