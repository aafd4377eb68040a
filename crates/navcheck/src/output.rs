//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Messages go to stderr; machine-readable data goes to stdout.
pub(crate) struct Output {
    term: Term,
    data: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            data: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a secondary detail line (dim).
    pub(crate) fn detail(&self, msg: &str) {
        let _ = self.term.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print data to stdout, uncolored.
    pub(crate) fn data(&self, msg: &str) {
        let _ = self.data.write_line(msg);
    }
}
