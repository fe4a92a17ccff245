//! Colour roles used by the CLI

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    /// Section titles and the serve banner
    pub heading: Style,
    /// Reply text printed by `ask`
    pub answer: Style,
    /// A corpus hit
    pub matched: Style,
    /// Escalated and written to the worksheet
    pub escalated: Style,
    /// Escalation skipped or lost
    pub lost: Style,
    /// Field labels, distances and row numbers
    pub detail: Style,
}

impl Theme {
    /// Colours only when the terminal supports them (honours `NO_COLOR`)
    pub fn detect() -> Self {
        if console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            heading: Style::new().cyan().bold(),
            answer: Style::new().bold(),
            matched: Style::new().green(),
            escalated: Style::new().yellow(),
            lost: Style::new().red().bold(),
            detail: Style::new().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            heading: Style::new(),
            answer: Style::new(),
            matched: Style::new(),
            escalated: Style::new(),
            lost: Style::new(),
            detail: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
