/// Today's day of the month from the local clock
pub fn today_day_of_month() -> u32 {
    js_sys::Date::new_0().get_date()
}
