use shared::constants::CURRENT_LOTTERY_ID;
use shared::{Entry, FetchGuard, FetchState, SyncedLottery};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;

// Both lookups run only once somebody is signed in. Their completions race
// and each writes its own state. A fetch that finishes after the page is gone
// is dropped on the floor.

#[hook]
pub fn use_entry(email: Option<String>) -> (FetchState<Entry>, Callback<Entry>) {
    let entry = use_state(FetchState::<Entry>::default);

    {
        let entry = entry.clone();
        use_effect_with(email, move |email| {
            let guard = FetchGuard::new();
            entry.set(FetchState::Pending);

            if let Some(email) = email.clone() {
                let guard = guard.clone();
                spawn_local(async move {
                    let Some(result) = guard.accept(api::fetch_entry(CURRENT_LOTTERY_ID, &email).await) else {
                        return;
                    };
                    match result {
                        Ok(record) => entry.set(FetchState::from_record(record)),
                        Err(e) => {
                            log::error!("Failed to load entry for {}: {}", email, e);
                            entry.set(FetchState::Failed);
                        }
                    }
                });
            }

            move || guard.cancel()
        });
    }

    let set_entry = {
        let entry = entry.clone();
        Callback::from(move |submitted: Entry| entry.set(FetchState::Ready(submitted)))
    };

    ((*entry).clone(), set_entry)
}

#[hook]
pub fn use_lottery(email: Option<String>) -> FetchState<SyncedLottery> {
    let lottery = use_state(FetchState::<SyncedLottery>::default);

    {
        let lottery = lottery.clone();
        use_effect_with(email.is_some(), move |signed_in| {
            let guard = FetchGuard::new();

            if *signed_in {
                let guard = guard.clone();
                spawn_local(async move {
                    let Some(result) = guard.accept(api::fetch_lottery(CURRENT_LOTTERY_ID).await) else {
                        return;
                    };
                    match result {
                        Ok(record) => {
                            if let Some(synced) = &record {
                                log::info!("Clock correction for {}: {}ms", synced.lottery.id, synced.latency);
                            }
                            lottery.set(FetchState::from_record(record));
                        }
                        Err(e) => {
                            log::error!("Failed to load lottery {}: {}", CURRENT_LOTTERY_ID, e);
                            lottery.set(FetchState::Failed);
                        }
                    }
                });
            }

            move || guard.cancel()
        });
    }

    (*lottery).clone()
}
