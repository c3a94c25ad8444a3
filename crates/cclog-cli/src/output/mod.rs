//! Plain-text renderers for the report models.
//!
//! Every renderer returns lines instead of printing so it can be tested with
//! colors off. JSON output bypasses this module entirely.

mod listing;
mod report;
mod session;

pub use listing::{render_agent_sessions, render_projects, render_sessions};
pub use report::{render_errors, render_stats, render_summary, render_timeline, render_tools};
pub use session::{render_around, render_logs};

use owo_colors::OwoColorize;

/// Applies terminal colors only when stdout is a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter {
    pub color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(s, |s| s.bold().to_string())
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(s, |s| s.dimmed().to_string())
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(s, |s| s.green().to_string())
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(s, |s| s.red().to_string())
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(s, |s| s.cyan().to_string())
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(s, |s| s.yellow().to_string())
    }

    /// Role label colored by author.
    pub fn role(&self, role: &str) -> String {
        match role {
            "user" => self.green(role),
            "assistant" => self.cyan(role),
            _ => self.dim(role),
        }
    }

    fn paint(&self, s: &str, f: impl FnOnce(&str) -> String) -> String {
        if self.color { f(s) } else { s.to_string() }
    }
}

/// First line of `text`, cut to `max` chars.
pub(crate) fn one_line(text: &str, max: usize) -> String {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    cclog_types::truncate(first, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painter_without_color_is_identity() {
        let painter = Painter::new(false);
        assert_eq!(painter.bold("x"), "x");
        assert_eq!(painter.role("user"), "user");
    }

    #[test]
    fn test_painter_with_color_adds_escapes() {
        let painter = Painter::new(true);
        assert!(painter.red("boom").contains("\u{1b}["));
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("\n  first line  \nsecond", 80), "first line");
        assert_eq!(one_line("", 80), "");
    }
}
