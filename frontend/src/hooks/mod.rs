pub mod use_page_observer;
pub mod use_settings;
