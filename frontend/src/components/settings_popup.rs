use shared::settings::parse_workday_hours;
use shared::SettingsMessage;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::debounce::Debouncer;
use crate::services::logging::Logger;
use crate::services::{settings_channel, settings_store};

/// How long "Message Successful" stays visible
pub const RESPONSE_INDICATOR_MS: u32 = 5000;

const COMPONENT: &str = "settings-popup";

/// Shows the last response code and clears it once `visible_ms` have passed
/// without a newer one.
#[derive(Clone)]
pub struct ResponseIndicator {
    clear: Debouncer,
}

impl ResponseIndicator {
    pub fn new(visible_ms: u32) -> Self {
        Self {
            clear: Debouncer::new(visible_ms),
        }
    }

    /// A newer reply restarts the clear timer instead of being cleared by an
    /// older one
    pub fn show(&self, response_code: u16, set_indicator: Callback<Option<u16>>) {
        set_indicator.emit(Some(response_code));
        self.clear.call(move || set_indicator.emit(None));
    }
}

/// Store the change, tell the open timesheet about it and show the reply
fn publish(message: SettingsMessage, response_code: UseStateHandle<Option<u16>>, indicator: ResponseIndicator) {
    spawn_local(async move {
        if let Err(e) = settings_store::persist(&message).await {
            Logger::error_with_component(COMPONENT, &format!("could not store {}: {}", message.storage_key(), e));
        }

        match settings_channel::send_to_active_tab(message).await {
            Ok(Some(response)) => {
                indicator.show(response.response_code, Callback::from(move |code| response_code.set(code)));
            }
            Ok(None) => {}
            Err(e) => Logger::warn_with_component(COMPONENT, &format!("timesheet page did not answer: {}", e)),
        }
    });
}

#[function_component(SettingsPopup)]
pub fn settings_popup() -> Html {
    let workday_hours = use_state(String::new);
    let working_breed_day = use_state(|| false);
    let response_code = use_state(|| Option::<u16>::None);
    let form_error = use_state(|| Option::<String>::None);
    let indicator = use_memo((), |_| ResponseIndicator::new(RESPONSE_INDICATOR_MS));

    // Pre-fill from storage
    {
        let workday_hours = workday_hours.clone();
        let working_breed_day = working_breed_day.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match settings_store::load_configuration().await {
                    Ok(config) => {
                        workday_hours.set(config.workday_hours.to_string());
                        working_breed_day.set(config.working_breed_day);
                    }
                    Err(e) => Logger::warn_with_component(COMPONENT, &format!("could not read settings: {}", e)),
                }
            });
            || ()
        });
    }

    let on_hours_input = {
        let workday_hours = workday_hours.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            workday_hours.set(input.value());
        })
    };

    let on_save = {
        let workday_hours = workday_hours.clone();
        let response_code = response_code.clone();
        let form_error = form_error.clone();
        let indicator = indicator.clone();
        Callback::from(move |_: MouseEvent| match parse_workday_hours(&workday_hours) {
            Ok(hours) => {
                form_error.set(None);
                publish(
                    SettingsMessage::HoursPerDayUpdated(hours),
                    response_code.clone(),
                    (*indicator).clone(),
                );
            }
            Err(e) => form_error.set(Some(e.to_string())),
        })
    };

    let on_breed_day_change = {
        let working_breed_day = working_breed_day.clone();
        let response_code = response_code.clone();
        let indicator = indicator.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let checked = input.checked();
            working_breed_day.set(checked);
            publish(
                SettingsMessage::WorkingBreedDay(checked),
                response_code.clone(),
                (*indicator).clone(),
            );
        })
    };

    html! {
        <div class="w-72">
            <div class="p-4">
                <h1 class="text-base mb-4 font-medium">{"Timesheet Hours Balance"}</h1>

                <div class="mb-10">
                    <label for="workdayHours">{"How many hours do you work a day?"}</label>
                    <input
                        type="text"
                        id="workdayHours"
                        value={(*workday_hours).clone()}
                        oninput={on_hours_input}
                        class="bg-gray-50 border border-gray-200 w-full rounded-lg px-4 py-2 text-black focus:outline-none mb-5"
                    />
                    if let Some(error) = &*form_error {
                        <div class="text-red-600">{error.clone()}</div>
                    }
                    <div class="flex items-center justify-end">
                        <button onclick={on_save} class="bg-green-500 hover:bg-green-400 transition duration-300 px-6 py-2 rounded-md text-white text-center">
                            <span>{"Save"}</span>
                        </button>
                    </div>
                    if *response_code == Some(shared::RESPONSE_OK) {
                        <div>{"Message Successful"}</div>
                    }
                </div>

                <div class="form-check">
                    <input
                        class="form-check-input"
                        type="checkbox"
                        id="workingBreedDay"
                        checked={*working_breed_day}
                        onchange={on_breed_day_change}
                    />
                    <label class="form-check-label" for="workingBreedDay">{"Working on October's 12th?"}</label>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn recorder() -> (Rc<Cell<Option<u16>>>, Callback<Option<u16>>) {
        let shown = Rc::new(Cell::new(None));
        let set = {
            let shown = shown.clone();
            Callback::from(move |code| shown.set(code))
        };
        (shown, set)
    }

    #[wasm_bindgen_test]
    async fn test_indicator_clears_after_visible_period() {
        let indicator = ResponseIndicator::new(40);
        let (shown, set) = recorder();

        indicator.show(shared::RESPONSE_OK, set);
        assert_eq!(shown.get(), Some(200));

        TimeoutFuture::new(100).await;
        assert_eq!(shown.get(), None);
    }

    #[wasm_bindgen_test]
    async fn test_newer_response_outlives_older_timer() {
        let indicator = ResponseIndicator::new(100);
        let (shown, set) = recorder();

        indicator.show(shared::RESPONSE_OK, set.clone());
        TimeoutFuture::new(60).await;
        indicator.show(shared::RESPONSE_OK, set);

        // Past the first deadline (100 ms), before the second (160 ms)
        TimeoutFuture::new(70).await;
        assert_eq!(shown.get(), Some(200));

        TimeoutFuture::new(100).await;
        assert_eq!(shown.get(), None);
    }
}
