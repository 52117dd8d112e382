use shared::lottery::format_lottery_id;
use shared::Entry;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct EntryCardProps {
    pub entry: Entry,
}

#[function_component(EntryCard)]
pub fn entry_card(props: &EntryCardProps) -> Html {
    let entry = &props.entry;

    html! {
        <div class={styles::CARD}>
            <h3 class={styles::TEXT_H3}>
                {"Thanks for entering, "}<strong>{ &entry.email }</strong>{"!"}
            </h3>
            <p class={classes!("mt-2", styles::TEXT_BODY)}>
                {"Your entry ID for the "}
                <strong>{ format_lottery_id(&entry.lottery_id) }</strong>
                {" lottery is "}
                <strong>{ &entry.entry_id }</strong>
                {"."}
            </p>
            <pre class={styles::PRE}>{ entry.details_json() }</pre>
        </div>
    }
}
