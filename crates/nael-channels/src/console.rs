//! Terminal hint presenter.

use console::style;
use nael_core::traits::HintPresenter;

/// Prints hints to stdout, bold, with their display time.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    plain: bool,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable styling (for piping output into files or other tools).
    pub fn plain() -> Self {
        Self { plain: true }
    }

    fn render_hint(&self, text: &str, duration_secs: u32) -> String {
        let one_line = text.replace('\n', " ");
        if self.plain {
            format!("[hint {duration_secs}s] {one_line}")
        } else {
            format!(
                "{} {}",
                style(format!("[hint {duration_secs}s]")).dim(),
                style(one_line).bold().yellow()
            )
        }
    }
}

impl HintPresenter for ConsolePresenter {
    fn show_hint(&self, text: &str, duration_secs: u32) {
        println!("{}", self.render_hint(text, duration_secs));
    }

    fn print(&self, text: &str) {
        println!("{text}");
    }
}
