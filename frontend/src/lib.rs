//! Browser-extension front end: the balance widget injected into the
//! timesheet page and the settings popup.

use anyhow::{anyhow, Result};

pub mod components;
pub mod dom;
pub mod hooks;
pub mod services;

use components::balance_widget::BalanceWidget;
use components::settings_popup::SettingsPopup;

/// Mount the balance widget above the host's pay period summary
pub fn start_content_script() -> Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow!("no document to inject into"))?;
    let root = dom::mount::create_mount_point(&document)?;
    yew::Renderer::<BalanceWidget>::with_root(root).render();
    Ok(())
}

pub fn start_popup() {
    yew::Renderer::<SettingsPopup>::new().render();
}
