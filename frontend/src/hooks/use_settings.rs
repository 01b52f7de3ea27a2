use shared::{Configuration, SettingsMessage};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::settings_channel::SettingsListener;
use crate::services::settings_store;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SettingsState {
    pub config: Configuration,
}

pub enum SettingsAction {
    /// Values read from storage at mount
    Loaded(Configuration),
    /// A change pushed by the popup
    Changed(SettingsMessage),
}

impl Reducible for SettingsState {
    type Action = SettingsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let config = match action {
            SettingsAction::Loaded(config) => config,
            SettingsAction::Changed(message) => self.config.apply(&message),
        };
        Rc::new(Self { config })
    }
}

/// Current configuration for the widget.
///
/// Loads stored values on mount and installs the popup message listener once
/// for the lifetime of the component.
#[hook]
pub fn use_settings() -> UseReducerHandle<SettingsState> {
    let state = use_reducer_eq(SettingsState::default);
    let listener = use_mut_ref(SettingsListener::new);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            let dispatcher = state.dispatcher();
            spawn_local({
                let dispatcher = dispatcher.clone();
                async move {
                    match settings_store::load_configuration().await {
                        Ok(config) => dispatcher.dispatch(SettingsAction::Loaded(config)),
                        Err(e) => Logger::warn_with_component(
                            "settings",
                            &format!("using default settings, storage read failed: {}", e),
                        ),
                    }
                }
            });

            listener
                .borrow()
                .install(Callback::from(move |message| dispatcher.dispatch(SettingsAction::Changed(message))));
            || ()
        });
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer_applies_changes_on_top_of_loaded_values() {
        let state = Rc::new(SettingsState::default());
        let state = state.reduce(SettingsAction::Loaded(Configuration { workday_hours: 7, working_breed_day: false }));
        let state = state.reduce(SettingsAction::Changed(SettingsMessage::WorkingBreedDay(true)));

        assert_eq!(state.config, Configuration { workday_hours: 7, working_breed_day: true });
    }

    #[test]
    fn test_reducer_hours_update() {
        let state = Rc::new(SettingsState::default())
            .reduce(SettingsAction::Changed(SettingsMessage::HoursPerDayUpdated(6)));
        assert_eq!(state.config.workday_hours, 6);
        assert!(!state.config.working_breed_day);
    }
}
