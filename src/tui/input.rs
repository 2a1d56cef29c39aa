//! Input handling for the terminal dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action resulting from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Move the cursor (or scroll the table) up.
    Up,
    /// Move the cursor (or scroll the table) down.
    Down,
    /// Jump to the previous filter.
    Left,
    /// Jump to the next filter.
    Right,
    /// Toggle the value under the cursor.
    Toggle,
    /// Select every value of the filter under the cursor.
    SelectAll,
    /// Clear the filter under the cursor.
    Clear,
    /// Scroll the detailed table one page up.
    PageUp,
    /// Scroll the detailed table one page down.
    PageDown,
    /// Switch focus between the sidebar and the table.
    Focus,
    /// Toggle help.
    Help,
    /// No action.
    None,
}

/// Input handler with configurable vim keys.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Enable vim-style keys (hjkl).
    pub vim_keys: bool,
}

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new(vim_keys: bool) -> Self {
        Self { vim_keys }
    }

    /// Handles a key event and returns the corresponding action.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> Action {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c' | 'q') = event.code {
                return Action::Quit;
            }
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

            KeyCode::Up => Action::Up,
            KeyCode::Down => Action::Down,
            KeyCode::Left => Action::Left,
            KeyCode::Right => Action::Right,

            KeyCode::Char('k') if self.vim_keys => Action::Up,
            KeyCode::Char('j') if self.vim_keys => Action::Down,
            KeyCode::Char('h') if self.vim_keys => Action::Left,
            KeyCode::Char('l') if self.vim_keys => Action::Right,

            KeyCode::Char(' ') | KeyCode::Enter => Action::Toggle,
            KeyCode::Char('a') => Action::SelectAll,
            KeyCode::Char('n') => Action::Clear,

            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Tab | KeyCode::BackTab => Action::Focus,

            KeyCode::Char('?') | KeyCode::F(1) => Action::Help,

            _ => Action::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(true)
    }
}
