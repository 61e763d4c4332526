//! ANSI color helpers for CLI output.
//!
//! Colors are dropped when `NO_COLOR` is set or stdout is not a terminal, so
//! piped output and tests see plain text.

use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colors on when stdout is a terminal and `NO_COLOR` is unset.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }

    /// No escape codes at all.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, s)
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint("36", s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint("1", s)
    }

    pub fn gray(&self, s: &str) -> String {
        self.paint("90", s)
    }

    /// Right-aligned bold green label, e.g. `       Saved`.
    pub fn status_label(&self, label: &str) -> String {
        self.paint("1;32", &format!("{:>12}", label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_emits_no_escapes() {
        let p = Palette::plain();
        assert_eq!(p.red("error:"), "error:");
        assert_eq!(p.status_label("Saved"), "       Saved");
    }

    #[test]
    fn enabled_palette_wraps_text() {
        let p = Palette { enabled: true };
        assert_eq!(p.green("ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(p.bold("x"), "\x1b[1mx\x1b[0m");
    }
}
