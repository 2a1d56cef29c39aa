//! Main application loop for the terminal dashboard.

use super::input::{Action, InputHandler};
use super::panels::{self, PageView, Snapshot};
use super::state::{Focus, State};
use crate::chart::ChartOptions;
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{Dimension, FilterOptions, FilterSelection, FilterValue};
use crate::pipeline::{self, RenderPass, RenderSurface};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;

/// What an action requires from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The selection changed; run a full pass.
    Rerender,
    /// Only navigation state changed.
    Redraw,
    /// Nothing to do.
    Nothing,
}

/// The interactive dashboard.
pub struct App<'a, B: Backend> {
    /// Dataset shared by every pass.
    dataset: &'a Dataset,
    /// Chart builder tunables.
    options: ChartOptions,
    /// Selectable values per dimension.
    filter_options: FilterOptions,
    /// Sidebar items, grouped by dimension in sidebar order.
    items: Vec<(Dimension, FilterValue)>,
    /// Current selection; replaced wholesale on every change.
    selection: FilterSelection,
    /// Input handler.
    input: InputHandler,
    /// Navigation state.
    state: State,
    /// Rows per page-scroll.
    page_rows: usize,
    /// Last presented pass.
    snapshot: Snapshot,
    /// Output terminal.
    terminal: Terminal<B>,
}

impl<'a, B: Backend> App<'a, B> {
    /// Creates the app with every value of every filter selected.
    #[must_use]
    pub fn new(dataset: &'a Dataset, config: &Config, terminal: Terminal<B>) -> Self {
        let filter_options = FilterOptions::from_dataset(dataset);
        let items = Dimension::ALL
            .iter()
            .flat_map(|&d| filter_options.get(d).iter().map(move |v| (d, v.clone())))
            .collect();

        Self {
            dataset,
            options: config.charts.clone(),
            filter_options,
            items,
            selection: FilterSelection::all(dataset),
            input: InputHandler::new(config.tui.vim_keys),
            state: State::new(),
            page_rows: config.tui.page_rows.max(1),
            snapshot: Snapshot::default(),
            terminal,
        }
    }

    /// Runs passes and reads input until the user quits.
    ///
    /// Blocks on terminal input; every selection change runs one pass.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or drawing fails.
    pub fn run_loop(&mut self) -> Result<()> {
        self.refresh()?;

        while !self.state.should_quit {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = self.input.handle_key(key);
                    self.handle_action(action)?;
                }
                Event::Resize(..) => self.redraw()?,
                _ => {}
            }
        }

        Ok(())
    }

    /// Runs a full pass for the current selection and draws it.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn refresh(&mut self) -> Result<()> {
        let dataset = self.dataset;
        let options = self.options.clone();
        pipeline::run_pass(self, dataset, &options)
    }

    /// Draws the last pass with the current navigation state.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn redraw(&mut self) -> Result<()> {
        let view = PageView { snapshot: &self.snapshot, items: &self.items, state: &self.state };
        self.terminal.draw(|frame| panels::draw(frame, &view))?;
        Ok(())
    }

    /// Applies an action and updates the screen accordingly.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match self.apply(action) {
            Outcome::Rerender => self.refresh(),
            Outcome::Redraw => self.redraw(),
            Outcome::Nothing => Ok(()),
        }
    }

    /// Returns whether the app should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// The output terminal.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn apply(&mut self, action: Action) -> Outcome {
        match action {
            Action::Quit => {
                self.state.quit();
                Outcome::Nothing
            }
            Action::Help => {
                self.state.toggle_help();
                Outcome::Redraw
            }
            Action::Focus => {
                self.state.toggle_focus();
                Outcome::Redraw
            }
            Action::Up | Action::Down => {
                let delta = if action == Action::Up { -1 } else { 1 };
                match self.state.focus {
                    Focus::Sidebar => self.state.move_cursor(delta, self.items.len()),
                    Focus::Table => self.state.scroll_table(delta, self.snapshot.rows.len()),
                }
                Outcome::Redraw
            }
            Action::Left => self.jump_dimension(-1),
            Action::Right => self.jump_dimension(1),
            Action::PageUp | Action::PageDown => {
                let page = self.page_rows as isize;
                let delta = if action == Action::PageUp { -page } else { page };
                self.state.scroll_table(delta, self.snapshot.rows.len());
                Outcome::Redraw
            }
            Action::Toggle => match self.items.get(self.state.cursor).cloned() {
                Some((dimension, value)) => {
                    self.replace_selection(self.selection.toggled(dimension, &value))
                }
                None => Outcome::Nothing,
            },
            Action::SelectAll => match self.cursor_dimension() {
                Some(dimension) => {
                    let all = self.filter_options.get(dimension).to_vec();
                    self.replace_selection(self.selection.with_values(dimension, all))
                }
                None => Outcome::Nothing,
            },
            Action::Clear => match self.cursor_dimension() {
                Some(dimension) => {
                    self.replace_selection(self.selection.with_values(dimension, []))
                }
                None => Outcome::Nothing,
            },
            Action::None => Outcome::Nothing,
        }
    }

    fn replace_selection(&mut self, selection: FilterSelection) -> Outcome {
        tracing::debug!(?selection, "selection changed");
        self.selection = selection;
        self.state.table_offset = 0;
        Outcome::Rerender
    }

    fn cursor_dimension(&self) -> Option<Dimension> {
        self.items.get(self.state.cursor).map(|(d, _)| *d)
    }

    /// Moves the cursor to the first item of the previous or next filter.
    fn jump_dimension(&mut self, step: isize) -> Outcome {
        let starts: Vec<usize> = (0..self.items.len())
            .filter(|&i| i == 0 || self.items[i].0 != self.items[i - 1].0)
            .collect();
        let Some(group) = starts.iter().rposition(|&start| start <= self.state.cursor) else {
            return Outcome::Nothing;
        };
        let target = group.saturating_add_signed(step).min(starts.len() - 1);
        self.state.cursor = starts[target];
        self.state.focus = Focus::Sidebar;
        Outcome::Redraw
    }
}

impl<B: Backend> RenderSurface for App<'_, B> {
    fn selection(&self) -> FilterSelection {
        self.selection.clone()
    }

    fn present(&mut self, pass: &RenderPass<'_>) -> Result<()> {
        self.snapshot = Snapshot::from_pass(pass);
        self.state.clamp_table(self.snapshot.rows.len());
        self.redraw()
    }
}
