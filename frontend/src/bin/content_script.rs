use timesheet_balance_frontend::services::logging::Logger;

fn main() {
    if let Err(e) = timesheet_balance_frontend::start_content_script() {
        Logger::error_with_component("content-script", &format!("balance widget not mounted: {}", e));
    }
}
