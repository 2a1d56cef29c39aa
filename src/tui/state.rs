//! UI state of the terminal dashboard (cursor, focus, scrolling).
//!
//! The filter selection is not kept here; it belongs to the app and is
//! replaced wholesale on every change.

/// Which part of the page receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The filter sidebar.
    #[default]
    Sidebar,
    /// The detailed table.
    Table,
}

/// Navigation state.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Index of the sidebar item under the cursor.
    pub cursor: usize,
    /// Focused region.
    pub focus: Focus,
    /// First visible row of the detailed table.
    pub table_offset: usize,
    /// Whether the application should quit.
    pub should_quit: bool,
    /// Whether help is visible.
    pub show_help: bool,
}

impl State {
    /// Creates a new state with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals that the application should quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggles help visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switches focus between sidebar and table.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Table,
            Focus::Table => Focus::Sidebar,
        };
    }

    /// Moves the cursor by `delta`, clamped to `item_count` items.
    pub fn move_cursor(&mut self, delta: isize, item_count: usize) {
        let last = item_count.saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Scrolls the table by `delta` rows, clamped so the last row stays visible.
    pub fn scroll_table(&mut self, delta: isize, row_count: usize) {
        let last = row_count.saturating_sub(1);
        self.table_offset = self.table_offset.saturating_add_signed(delta).min(last);
    }

    /// Re-clamps the table offset after the row count changed.
    pub fn clamp_table(&mut self, row_count: usize) {
        self.table_offset = self.table_offset.min(row_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps() {
        let mut state = State::new();
        state.move_cursor(-1, 5);
        assert_eq!(state.cursor, 0);
        state.move_cursor(10, 5);
        assert_eq!(state.cursor, 4);
        state.move_cursor(-2, 5);
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_table_scroll_clamps() {
        let mut state = State::new();
        state.scroll_table(25, 12);
        assert_eq!(state.table_offset, 11);
        state.clamp_table(3);
        assert_eq!(state.table_offset, 2);
        state.clamp_table(0);
        assert_eq!(state.table_offset, 0);
    }

    #[test]
    fn test_focus_and_help_toggle() {
        let mut state = State::new();
        assert_eq!(state.focus, Focus::Sidebar);
        state.toggle_focus();
        assert_eq!(state.focus, Focus::Table);
        state.toggle_help();
        assert!(state.show_help);
        state.quit();
        assert!(state.should_quit);
    }
}
