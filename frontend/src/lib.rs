pub mod api;
pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod styles;

use shared::SessionState;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_session;
use crate::pages::lottery::LotteryPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/lottery")]
    Lottery,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route, session: &SessionState, on_session_change: &Callback<()>) -> Html {
    match route {
        Route::Home | Route::Lottery => html! {
            <LotteryPage session={session.clone()} on_session_change={on_session_change.clone()} />
        },
        Route::NotFound => html! {
            <div class={styles::CENTERED}>
                <h2 class={styles::TEXT_H2}>{"Page not found"}</h2>
                <Link<Route> to={Route::Lottery} classes={classes!(styles::BUTTON_SECONDARY)}>{"Go to the lottery"}</Link<Route>>
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let (session, reload_session) = use_session();

    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full">
                <Switch<Route> render={move |route: Route| switch(route, &session, &reload_session)} />
            </div>
        </BrowserRouter>
    }
}
