use shared::EntryMetadata;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, SubmitEvent};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct LotteryFormProps {
    pub on_submit: Callback<EntryMetadata>,
    #[prop_or_default]
    pub submitting: bool,
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value().trim().to_string())
        .unwrap_or_default()
}

#[function_component(LotteryForm)]
pub fn lottery_form(props: &LotteryFormProps) -> Html {
    let first_name_ref = use_node_ref();
    let last_name_ref = use_node_ref();
    let student_id_ref = use_node_ref();
    let student_number_ref = use_node_ref();
    let preferences_ref = use_node_ref();

    let handle_submit = {
        let on_submit = props.on_submit.clone();
        let submitting = props.submitting;
        let first_name_ref = first_name_ref.clone();
        let last_name_ref = last_name_ref.clone();
        let student_id_ref = student_id_ref.clone();
        let student_number_ref = student_number_ref.clone();
        let preferences_ref = preferences_ref.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if submitting {
                return;
            }

            let preferences = preferences_ref
                .cast::<HtmlTextAreaElement>()
                .map(|area| EntryMetadata::preferences_from_lines(&area.value()))
                .unwrap_or_default();

            on_submit.emit(EntryMetadata {
                first_name: input_value(&first_name_ref),
                last_name: input_value(&last_name_ref),
                student_id: input_value(&student_id_ref),
                student_number: input_value(&student_number_ref).parse().ok(),
                preferences,
            });
        })
    };

    html! {
        <form class={styles::FORM} onsubmit={handle_submit}>
            <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                <div>
                    <label class={styles::TEXT_LABEL} for="first-name">{"First name"}</label>
                    <input id="first-name" type="text" class={styles::INPUT} ref={first_name_ref} />
                </div>
                <div>
                    <label class={styles::TEXT_LABEL} for="last-name">{"Last name"}</label>
                    <input id="last-name" type="text" class={styles::INPUT} ref={last_name_ref} />
                </div>
                <div>
                    <label class={styles::TEXT_LABEL} for="student-id">{"Student ID"}</label>
                    <input id="student-id" type="text" class={styles::INPUT} ref={student_id_ref} />
                </div>
                <div>
                    <label class={styles::TEXT_LABEL} for="student-number">{"Student number"}</label>
                    <input id="student-number" type="number" class={styles::INPUT} ref={student_number_ref} />
                </div>
            </div>
            <div>
                <label class={styles::TEXT_LABEL} for="preferences">{"Preferences"}</label>
                <textarea id="preferences" rows="4" class={styles::INPUT} ref={preferences_ref} />
                <p class={styles::TEXT_HINT}>{"One per line, most wanted first."}</p>
            </div>
            <button type="submit" class={styles::BUTTON_PRIMARY} disabled={props.submitting}>
                { if props.submitting { "Submitting..." } else { "Submit entry" } }
            </button>
        </form>
    }
}
