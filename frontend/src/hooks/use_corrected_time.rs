use gloo_timers::callback::Interval;
use shared::constants::TICK_INTERVAL_MS;
use shared::{CorrectedSample, SyncedLottery, TickScope};
use yew::prelude::*;

use crate::api::BrowserClock;

#[derive(Clone, PartialEq)]
struct Tick {
    lottery: SyncedLottery,
    sample: CorrectedSample,
}

/// Re-evaluates the corrected clock against the lottery window every tick.
///
/// The interval lives from the moment a lottery is available until the
/// window closes or the component unmounts, whichever comes first.
#[hook]
pub fn use_corrected_time(lottery: SyncedLottery) -> Option<CorrectedSample> {
    let tick = use_state(|| None::<Tick>);

    // Flips once the closing sample for this lottery has been rendered, which
    // re-runs the effect below and drops the interval.
    let closed = (*tick)
        .as_ref()
        .map(|tick| tick.lottery == lottery && tick.sample.window.is_terminal())
        .unwrap_or(false);

    {
        let tick = tick.clone();
        use_effect_with((lottery.clone(), closed), move |(lottery, closed)| {
            let mut interval = None;

            if !*closed {
                let mut scope = TickScope::new(lottery);
                if let Some(first) = scope.tick_from(&BrowserClock) {
                    tick.set(Some(Tick {
                        lottery: lottery.clone(),
                        sample: first,
                    }));
                }

                if !scope.is_released() {
                    let lottery = lottery.clone();
                    interval = Some(Interval::new(TICK_INTERVAL_MS, move || {
                        if let Some(sample) = scope.tick_from(&BrowserClock) {
                            tick.set(Some(Tick {
                                lottery: lottery.clone(),
                                sample,
                            }));
                        }
                    }));
                }
            }

            move || drop(interval)
        });
    }

    (*tick)
        .as_ref()
        .filter(|tick| tick.lottery == lottery)
        .map(|tick| tick.sample)
}
