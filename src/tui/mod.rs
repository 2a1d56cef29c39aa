//! Interactive terminal dashboard.
//!
//! A sidebar of filters, the metric tiles, eight chart panels and the
//! detailed table. Every filter change runs one synchronous pass.

mod app;
mod input;
mod panels;
mod state;

pub use app::App;
pub use input::{Action, InputHandler};
pub use panels::{draw, draw_chart, PageView, Snapshot};
pub use state::{Focus, State};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;

/// Runs the dashboard on the current terminal until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, input or rendering fails.
pub fn run(dataset: &Dataset, config: &Config) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(dataset, config, terminal);
    let result = app.run_loop();

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    app.terminal_mut().show_cursor()?;

    result
}
