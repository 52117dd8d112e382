use shared::constants::NO_LOTTERY_MESSAGE;
use shared::{Entry, FetchState, SessionState, SyncedLottery, ViewState};
use yew::prelude::*;

use crate::components::{EntryCard, EntrySubmission, Header, Loader, LoginPrompt};
use crate::hooks::{use_entry, use_lottery};
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct LotteryPageProps {
    pub session: SessionState,
    pub on_session_change: Callback<()>,
}

fn lottery_panel(lottery: &FetchState<SyncedLottery>, on_entry: &Callback<Entry>) -> Html {
    match lottery.ready() {
        Some(lottery) => html! {
            <EntrySubmission lottery={lottery.clone()} on_entry={on_entry.clone()} />
        },
        None => html! {
            <div class={styles::CARD}>
                <p class={styles::TEXT_BODY}>{ NO_LOTTERY_MESSAGE }</p>
            </div>
        },
    }
}

#[function_component(LotteryPage)]
pub fn lottery_page(props: &LotteryPageProps) -> Html {
    let email = props.session.email().map(str::to_string);
    let (entry, set_entry) = use_entry(email.clone());
    let lottery = use_lottery(email);

    let view = ViewState::compute(&props.session, &entry, &lottery);

    let content = match view {
        ViewState::Loading => html! { <Loader /> },
        ViewState::LoggedOut => html! {
            <LoginPrompt on_session_change={props.on_session_change.clone()} />
        },
        ViewState::ShowForm => html! {
            <main class={styles::MAIN}>
                { lottery_panel(&lottery, &set_entry) }
            </main>
        },
        ViewState::ShowConfirmation => html! {
            <main class={styles::MAIN}>
                if let Some(entry) = entry.ready() {
                    <EntryCard entry={entry.clone()} />
                }
                { lottery_panel(&lottery, &set_entry) }
            </main>
        },
    };

    html! {
        <div class={styles::CONTAINER}>
            <Header session={props.session.clone()} on_session_change={props.on_session_change.clone()} />
            { content }
        </div>
    }
}
