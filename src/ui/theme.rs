use crate::reference::Reference;
use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub muted: Style,
    // Reference listings
    pub authors: Style,
    pub year: Style,
    pub title: Style,
    pub path: Style,
}

impl Theme {
    /// `NO_COLOR` always wins, then `CLICOLOR_FORCE`, then whether stdout is a terminal
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let force = std::env::var_os("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0");

        if wants_color(console::Term::stdout().is_term(), no_color, force) {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
            authors: Style::new().bold(),
            year: Style::new().yellow(),
            title: Style::new().italic(),
            path: Style::new().blue().underline(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
            authors: Style::new(),
            year: Style::new(),
            title: Style::new(),
            path: Style::new(),
        }
    }

    /// One listing line for a reference. Under [`Theme::plain`] this is exactly
    /// [`Reference::format_as_text`].
    pub fn reference_line(&self, reference: &Reference) -> String {
        let authors = reference.authors.style(self.authors.clone());
        let title = reference.title.style(self.title.clone());
        match reference.year {
            Some(year) => format!("{} - {} - {}", authors, year.style(self.year.clone()), title),
            None => format!("{} - {}", authors, title),
        }
    }
}

fn wants_color(is_term: bool, no_color: bool, force: bool) -> bool {
    !no_color && (force || is_term)
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
