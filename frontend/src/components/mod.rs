pub mod balance_widget;
pub mod settings_popup;
