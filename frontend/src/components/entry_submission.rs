use shared::lottery::format_lottery_id;
use shared::{Entry, EntryMetadata, LotteryWindow, SyncedLottery};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::{Countdown, Loader, LotteryForm};
use crate::hooks::use_corrected_time;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct EntrySubmissionProps {
    pub lottery: SyncedLottery,
    pub on_entry: Callback<Entry>,
}

#[function_component(EntrySubmission)]
pub fn entry_submission(props: &EntrySubmissionProps) -> Html {
    let sample = use_corrected_time(props.lottery.clone());
    let submitting = use_state(|| false);

    let handle_submit = {
        let lottery_id = props.lottery.lottery.id.clone();
        let on_entry = props.on_entry.clone();
        let submitting = submitting.clone();

        Callback::from(move |metadata: EntryMetadata| {
            submitting.set(true);
            let lottery_id = lottery_id.clone();
            let on_entry = on_entry.clone();
            let submitting = submitting.clone();

            spawn_local(async move {
                match api::enter_lottery(&lottery_id, &metadata).await {
                    Ok(entry) => {
                        log::info!("Entry {} recorded for {}", entry.entry_id, lottery_id);
                        on_entry.emit(entry);
                    }
                    Err(e) => log::error!("Failed to enter {}: {}", lottery_id, e),
                }
                submitting.set(false);
            });
        })
    };

    let Some(sample) = sample else {
        return html! { <Loader /> };
    };
    let name = format_lottery_id(&props.lottery.lottery.id);
    let remaining_ms = sample.remaining_ms.unwrap_or_default();

    let body = match sample.window {
        LotteryWindow::Active => html! {
            <div class="space-y-2">
                <p class={styles::TEXT_LARGE}>
                    { format!("The {} lottery is now open for submissions!", name) }
                </p>
                <hr class={styles::DIVIDER} />
                <p class={styles::TEXT_BODY}>
                    <Countdown remaining_ms={remaining_ms} />{" remaining"}
                </p>
                <LotteryForm on_submit={handle_submit} submitting={*submitting} />
            </div>
        },
        LotteryWindow::Closed => html! {
            <p class={styles::TEXT_BODY}>
                { format!("The {} lottery is now over. We hope you'll enter next round!", name) }
            </p>
        },
        LotteryWindow::Pending => html! {
            <p class={styles::TEXT_BODY}>
                {"The lottery begins in "}<Countdown remaining_ms={remaining_ms} />
            </p>
        },
    };

    html! { <div class={styles::CARD}>{ body }</div> }
}
