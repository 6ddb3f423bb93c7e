//! ANSI color helpers for the human-readable output paths.
//!
//! Color is enabled only when stdout is a terminal and `NO_COLOR` is
//! unset. JSON output never goes through these helpers, so machine
//! output stays clean. Layout is identical either way; disabling color
//! only drops the escape codes.

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Red => "31",
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Magenta => "35",
            Color::Cyan => "36",
            Color::White => "37",
            Color::Gray => "90",
        }
    }
}

/// Palette cycled through when colorizing tokens by position.
pub const TOKEN_PALETTE: [Color; 5] = [
    Color::White,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
];

#[derive(Debug, Clone, Copy)]
pub struct Style {
    enabled: bool,
}

impl Style {
    /// Detect whether to emit color for this process.
    pub fn detect() -> Self {
        let enabled =
            std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout);
        Self { enabled }
    }

    #[cfg(test)]
    pub(crate) fn plain() -> Self {
        Self { enabled: false }
    }

    #[cfg(test)]
    pub(crate) fn colored() -> Self {
        Self { enabled: true }
    }

    /// Wrap `text` in the escape codes for `color`, or return it
    /// unchanged when color is disabled. Pad before painting: the
    /// escape codes would otherwise throw off column widths.
    pub fn paint(&self, color: Color, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("\x1b[{}m{}\x1b[0m", color.code(), text)
    }
}
