pub mod chrome;
pub mod date_utils;
pub mod debounce;
pub mod logging;
pub mod settings_channel;
pub mod settings_store;
