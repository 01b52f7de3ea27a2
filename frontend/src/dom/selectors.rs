//! Class names and selectors of the host timesheet page.

pub const DAY_ROWS: &str = ".TimesheetSlat--clock:not(.TimesheetSlat--disabled)";
pub const DAY_DATE: &str = ".TimesheetSlat__dayDate";
pub const DAY_OF_WEEK: &str = ".TimesheetSlat__dayOfWeek";
pub const DAY_TOTAL: &str = ".TimesheetSlat__dayTotal";
pub const EXTRA_INFO: &str = ".TimesheetSlat__extraInfoItem";
pub const DATA_WRAPPER: &str = ".TimesheetSlat__dataWrapper";
pub const TIME_ENTRY: &str = ".TimeEntry";

pub const PERIOD_TOGGLE: &str = ".TimesheetHeader__period .fab-SelectToggle__content";
pub const MONTH_HEADER: &str = ".TimesheetSecondHeader h4";
pub const CURRENT_PERIOD_LABEL: &str = "This Pay Period";

pub const SUMMARY_DIVIDER: &str = ".TimesheetSummary__divider";
pub const APPROVAL_SUMMARY: &str = ".ApprovalSummary";

pub const WRONG_HOURS_CLASS: &str = "wrongHoursWarn";
pub const WIDGET_ROOT_ID: &str = "timetracking-extension-data";
