fn main() {
    timesheet_balance_frontend::start_popup();
}
