use shared::DaySnapshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, MutationObserver, MutationObserverInit};
use yew::prelude::*;

use crate::dom::extractor::extract_snapshot;
use crate::services::date_utils::today_day_of_month;
use crate::services::debounce::Debouncer;
use crate::services::logging::Logger;

/// The host re-renders in bursts; wait this long after the last mutation
pub const REEXTRACT_DEBOUNCE_MS: u32 = 1000;

type MutationCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// Keeps an up-to-date snapshot of the timesheet rows.
///
/// Extracts once on mount and again after every burst of DOM mutations.
/// `None` until the first extraction has run.
#[hook]
pub fn use_page_observer() -> UseStateHandle<Option<DaySnapshot>> {
    use_page_observer_with(REEXTRACT_DEBOUNCE_MS)
}

/// [`use_page_observer`] with a custom quiet period.
///
/// The whole document is watched, so the host swapping out the entries
/// container is still seen. Re-extracting an unchanged page is a no-op
/// because the state only changes when the snapshot does.
#[hook]
pub fn use_page_observer_with(wait_ms: u32) -> UseStateHandle<Option<DaySnapshot>> {
    let snapshot = use_state_eq(|| Option::<DaySnapshot>::None);

    {
        let snapshot = snapshot.clone();
        use_effect_with(wait_ms, move |wait_ms| {
            let debouncer = Debouncer::new(*wait_ms);
            let schedule = {
                let debouncer = debouncer.clone();
                move || {
                    let snapshot = snapshot.clone();
                    debouncer.call(move || {
                        if let Some(document) = window().and_then(|w| w.document()) {
                            snapshot.set(Some(extract_snapshot(&document, today_day_of_month())));
                        }
                    });
                }
            };

            schedule();
            let observer = observe_document(schedule);

            move || {
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
                debouncer.cancel();
            }
        });
    }

    snapshot
}

fn observe_document(mut on_mutation: impl FnMut() + 'static) -> Option<(MutationObserver, MutationCallback)> {
    let target = window().and_then(|w| w.document()).and_then(|d| d.document_element())?;

    let callback: MutationCallback = Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
        on_mutation();
    }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

    let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(_) => {
            Logger::error_with_component("page-observer", "could not create MutationObserver");
            return None;
        }
    };

    let options = MutationObserverInit::new();
    options.set_attributes(true);
    options.set_child_list(true);
    options.set_character_data(true);
    options.set_subtree(true);

    if observer.observe_with_options(&target, &options).is_err() {
        Logger::error_with_component("page-observer", "could not observe the document");
        return None;
    }
    Some((observer, callback))
}
