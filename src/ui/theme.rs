//! Terminal styles for report output

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles keyed by the role a line plays in CLI output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Banner and report section titles
    pub heading: Style,
    pub ok: Style,
    /// Fatal CLI errors, written to stderr
    pub failure: Style,
    /// Left-hand labels of status and summary lines
    pub label: Style,
    /// Placeholder for reports without rows
    pub faint: Style,
}

impl Theme {
    /// Colored on a terminal unless `NO_COLOR` is set, plain otherwise
    pub fn detect() -> Self {
        Self::with_color(color_enabled())
    }

    pub fn with_color(enabled: bool) -> Self {
        if !enabled {
            return Self {
                heading: Style::new(),
                ok: Style::new(),
                failure: Style::new(),
                label: Style::new(),
                faint: Style::new(),
            };
        }
        Self {
            heading: Style::new().cyan().bold(),
            ok: Style::new().green().bold(),
            failure: Style::new().red().bold(),
            label: Style::new().dimmed(),
            faint: Style::new().bright_black().italic(),
        }
    }
}

fn color_enabled() -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    !no_color && console::Term::stdout().is_term()
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
