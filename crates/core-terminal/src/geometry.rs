//! Window geometry provider.

/// Rows reserved below the text area: the status bar and the message line.
pub const STATUS_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub cols: u16,
    pub rows: u16,
}

impl ScreenSize {
    /// Used when the terminal cannot report its size.
    pub const FALLBACK: ScreenSize = ScreenSize { cols: 80, rows: 24 };

    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Rows available for document text; never zero.
    pub fn text_rows(&self) -> usize {
        usize::from(self.rows.saturating_sub(STATUS_ROWS)).max(1)
    }

    pub fn cols(&self) -> usize {
        usize::from(self.cols).max(1)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Current terminal size, or 80x24 when unavailable.
pub fn window_size() -> ScreenSize {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => ScreenSize::new(cols, rows),
        Ok(_) | Err(_) => ScreenSize::FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_80_by_24() {
        assert_eq!(ScreenSize::default(), ScreenSize::new(80, 24));
        assert_eq!(ScreenSize::FALLBACK.text_rows(), 22);
    }

    #[test]
    fn text_rows_never_zero() {
        assert_eq!(ScreenSize::new(10, 2).text_rows(), 1);
        assert_eq!(ScreenSize::new(10, 0).text_rows(), 1);
        assert_eq!(ScreenSize::new(0, 5).cols(), 1);
    }
}
