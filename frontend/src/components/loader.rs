use yew::prelude::*;
use crate::styles;

#[function_component(Loader)]
pub fn loader() -> Html {
    html! {
        <div class={styles::CENTERED}>
            <div class={styles::SPINNER} role="status" aria-label="Loading"></div>
        </div>
    }
}
