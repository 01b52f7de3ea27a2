const PREFIX: &str = "Timetrack-Extension ::";

/// Console logger tagging every line with the extension prefix and the
/// component that produced it
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        gloo::console::debug!(Self::line(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(Self::line(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(Self::line(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(Self::line(component, message));
    }

    fn line(component: &str, message: &str) -> String {
        format!("{} [{}] {}", PREFIX, component, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        assert_eq!(
            Logger::line("page-observer", "re-extracting"),
            "Timetrack-Extension :: [page-observer] re-extracting"
        );
    }
}
