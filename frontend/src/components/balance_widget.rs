use shared::{calculate_balance, BalanceSummary};
use yew::prelude::*;

use crate::hooks::use_page_observer::use_page_observer;
use crate::hooks::use_settings::use_settings;

const ON_TRACK_BACKGROUND: &str = "rgba(0,255,0,0.1)";
const BEHIND_BACKGROUND: &str = "rgba(255,0,0,0.1)";
// Reuses the host page's clock sprite
const CLOCK_ICON: &str = r##"<svg aria-hidden="true" focusable="false" pointer-events="none" width="20" height="20" class="css-0"><use xlink:href="#fab-clock-20x20"></use></svg>"##;

pub fn background_for(summary: &BalanceSummary) -> &'static str {
    if summary.is_on_track() {
        ON_TRACK_BACKGROUND
    } else {
        BEHIND_BACKGROUND
    }
}

/// Root of the injected widget: placeholder until the host has rendered rows
#[function_component(BalanceWidget)]
pub fn balance_widget() -> Html {
    let snapshot = use_page_observer();
    let settings = use_settings();

    match &*snapshot {
        Some(snapshot) if !snapshot.is_empty() => {
            let summary = calculate_balance(snapshot, &settings.config);
            html! { <BalancePanel {summary} /> }
        }
        _ => html! { <LoadingPlaceholder /> },
    }
}

#[function_component(LoadingPlaceholder)]
fn loading_placeholder() -> Html {
    html! {
        <div class="content-wrapper">
            <div class="placeholder">
                <div class="animated-background" />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BalancePanelProps {
    pub summary: BalanceSummary,
}

#[function_component(BalancePanel)]
pub fn balance_panel(props: &BalancePanelProps) -> Html {
    let summary = &props.summary;
    let style = format!("background-color: {}; padding: 1rem 0.5rem;", background_for(summary));

    html! {
        <>
            <div class="TimesheetSummary__divider" />
            <div {style}>
                <div class="TimesheetSummary__title TimesheetSummary__title--payPeriod">{"Monthly Hours Balance"}</div>
                <div class="TimesheetSummary__text">
                    {format!("Worked / Should Have Worked: {} / {}", summary.worked, summary.expected)}
                </div>
                <div class="TimesheetSummary__payPeriodTotal">
                    <span class="TimesheetSummary__payPeriodClockIcon">
                        {Html::from_html_unchecked(AttrValue::from(CLOCK_ICON))}
                    </span>
                    {summary.delta.clone()}
                </div>
            </div>
        </>
    }
}
