use std::io;

use crate::{
    domain::HealthStatus,
    draft::DraftStats,
    samples::SampleEmail,
};

pub mod model;
pub mod terminal;

pub use model::{BatchViewModel, DashboardView, ResultViewModel};
pub use terminal::TerminalView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Only the literal "light" selects the light theme.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Everything the application can put in front of the user.
pub trait ResultView: Send {
    fn show_result(&mut self, vm: &ResultViewModel) -> io::Result<()>;
    fn show_batch(&mut self, vm: &BatchViewModel) -> io::Result<()>;
    fn show_dashboard(&mut self, vm: &DashboardView) -> io::Result<()>;
    fn show_health(&mut self, status: HealthStatus, base_url: &str) -> io::Result<()>;
    fn show_draft(&mut self, stats: &DraftStats) -> io::Result<()>;
    fn show_samples(&mut self, samples: &[SampleEmail]) -> io::Result<()>;
    fn notice(&mut self, message: &str) -> io::Result<()>;
    /// Inline error panel for single-email failures.
    fn show_error(&mut self, message: &str) -> io::Result<()>;
    /// Blocking alert for batch and file failures.
    fn alert(&mut self, message: &str) -> io::Result<()>;
    fn prompt(&mut self, status: HealthStatus) -> io::Result<()>;
    fn set_theme(&mut self, theme: Theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_preference_defaults_to_dark() {
        assert_eq!(Theme::from_preference(Some("light")), Theme::Light);
        assert_eq!(Theme::from_preference(Some("Light")), Theme::Dark);
        assert_eq!(Theme::from_preference(None), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
