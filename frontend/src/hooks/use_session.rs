use shared::SessionState;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;

/// Loads the session once and again whenever the returned callback fires.
#[hook]
pub fn use_session() -> (SessionState, Callback<()>) {
    let session = use_state(|| SessionState::Loading);
    let generation = use_state(|| 0u32);

    {
        let session = session.clone();
        use_effect_with(*generation, move |_| {
            spawn_local(async move {
                match api::fetch_session().await {
                    Ok(fetched) => session.set(fetched.into()),
                    Err(e) => log::error!("Failed to load session: {}", e),
                }
            });
            || ()
        });
    }

    let reload = {
        let generation = generation.clone();
        Callback::from(move |_| generation.set(*generation + 1))
    };

    ((*session).clone(), reload)
}
