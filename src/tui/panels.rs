//! Page rendering for the terminal dashboard.
//!
//! Drawing is a pure function of a [`PageView`]; all data comes from the
//! last presented pass, held in a [`Snapshot`].

use super::state::{Focus, State};
use crate::chart::{ChartResult, ChartSpec, Mark, Orientation, Palette, INSUFFICIENT_DATA};
use crate::color::{pastel, Rgba};
use crate::dataset::COLUMNS;
use crate::filter::{Dimension, FilterSelection, FilterValue};
use crate::format;
use crate::metrics::SummaryMetrics;
use crate::page;
use crate::pipeline::RenderPass;
use crate::scale::{ColorScale, Scale};

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Sparkline, Table, Wrap,
};
use ratatui::Frame;

/// Owned copy of a presented pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Selection the pass was computed for.
    pub selection: FilterSelection,
    /// Headline metrics.
    pub metrics: SummaryMetrics,
    /// Chart panels in page order.
    pub charts: Vec<ChartResult>,
    /// Detailed table rows.
    pub rows: Vec<[String; 8]>,
}

impl Snapshot {
    /// Copy everything the page shows out of `pass`.
    #[must_use]
    pub fn from_pass(pass: &RenderPass<'_>) -> Self {
        Self {
            selection: pass.selection.clone(),
            metrics: pass.metrics.clone(),
            charts: pass.charts.clone(),
            rows: pass.table_rows().collect(),
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'v> {
    /// Last presented pass.
    pub snapshot: &'v Snapshot,
    /// Sidebar items in display order.
    pub items: &'v [(Dimension, FilterValue)],
    /// Navigation state.
    pub state: &'v State,
}

fn color(rgba: Rgba) -> Color {
    Color::Rgb(rgba.r, rgba.g, rgba.b)
}

fn accent() -> Style {
    Style::default().fg(color(Rgba::ACCENT))
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        label.chars().take(max).collect()
    }
}

/// Draw the whole page.
pub fn draw(frame: &mut Frame, view: &PageView<'_>) {
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(30), Constraint::Min(0)]).areas(frame.area());
    let [header, tiles, charts, table] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Min(16),
        Constraint::Length(12),
    ])
    .areas(main);

    draw_sidebar(frame, sidebar, view);
    draw_header(frame, header);
    draw_tiles(frame, tiles, &view.snapshot.metrics);
    draw_sections(frame, charts, &view.snapshot.charts);
    draw_table(frame, table, view);

    if view.state.show_help {
        draw_help(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(page::HEADLINE, bold()),
        Line::from(page::SUBTITLE),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, view: &PageView<'_>) {
    let selection = &view.snapshot.selection;
    let block = Block::bordered().title(page::FILTERS).border_style(accent());

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    for dimension in Dimension::ALL {
        lines.push(Line::styled(dimension.label(), bold()));
        for (index, (_, value)) in
            view.items.iter().enumerate().filter(|(_, (d, _))| *d == dimension)
        {
            let selected = selection.contains(dimension, value);
            let marker = if selected { "[x]" } else { "[ ]" };
            let mut style = if selected { accent() } else { Style::default() };
            if index == view.state.cursor {
                cursor_line = lines.len();
                if view.state.focus == Focus::Sidebar {
                    style = style.add_modifier(Modifier::REVERSED);
                }
            }
            lines.push(Line::styled(format!(" {marker} {value}"), style));
        }
    }

    let visible = area.height.saturating_sub(2) as usize;
    let offset = cursor_line.saturating_sub(visible.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).block(block).scroll((offset as u16, 0)), area);
}

fn draw_tiles(frame: &mut Frame, area: Rect, metrics: &SummaryMetrics) {
    let block = Block::new().title(page::METRICS).borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(inner);
    for ((caption, value), cell) in metrics.tiles().into_iter().zip(cells.iter()) {
        let tile = Paragraph::new(Line::styled(value, bold()))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(caption));
        frame.render_widget(tile, *cell);
    }
}

fn draw_sections(frame: &mut Frame, area: Rect, charts: &[ChartResult]) {
    let rows = Layout::vertical([Constraint::Ratio(1, 2); 2]).split(area);
    for (section, row) in page::SECTIONS.iter().zip(rows.iter()) {
        let block = Block::new().title(section.heading).borders(Borders::TOP);
        let inner = block.inner(*row);
        frame.render_widget(block, *row);

        let n = section.charts.len() as u32;
        let panels = Layout::horizontal(vec![Constraint::Ratio(1, n); section.charts.len()])
            .split(inner);
        for (id, panel) in section.charts.iter().zip(panels.iter()) {
            if let Some(chart) = charts.iter().find(|c| c.id() == *id) {
                draw_chart(frame, *panel, chart);
            }
        }
    }
}

/// Draw one chart panel, or its placeholder.
pub fn draw_chart(frame: &mut Frame, area: Rect, chart: &ChartResult) {
    let block = Block::bordered().title(Line::styled(chart.title(), bold()));
    match chart {
        ChartResult::InsufficientData { .. } => {
            let placeholder = Paragraph::new(INSUFFICIENT_DATA)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(placeholder, area);
        }
        ChartResult::Chart(spec) => match spec.mark {
            Mark::Bar { orientation } => draw_bars(frame, area, block, spec, orientation),
            Mark::Histogram { .. } => draw_histogram(frame, area, block, spec),
            Mark::Choropleth => draw_map_table(frame, area, block, spec),
            Mark::Pie => draw_pie_legend(frame, area, block, spec),
        },
    }
}

fn draw_bars(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    spec: &ChartSpec,
    orientation: Orientation,
) {
    let n = spec.data.len().max(1) as u16;
    let (direction, bar_width, bar_gap, label_width) = match orientation {
        Orientation::Vertical => {
            let width = (area.width.saturating_sub(2) / n).saturating_sub(1).max(1);
            (Direction::Vertical, width, 1, width as usize)
        }
        Orientation::Horizontal => (Direction::Horizontal, 1, 0, 18),
    };

    let bars: Vec<Bar<'_>> = spec
        .data
        .iter()
        .enumerate()
        .map(|(i, datum)| {
            let text = match orientation {
                Orientation::Vertical => format::thousands(datum.value as u64),
                Orientation::Horizontal => format::compact(datum.value),
            };
            Bar::default()
                .value(datum.value.round() as u64)
                .label(Line::from(truncate(&datum.key, label_width)))
                .text_value(text)
                .style(Style::default().fg(color(pastel(i))))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(direction)
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_histogram(frame: &mut Frame, area: Rect, block: Block<'_>, spec: &ChartSpec) {
    let counts: Vec<u64> = spec.data.iter().map(|d| d.value as u64).collect();
    let extent = match (spec.data.first().and_then(|d| d.bin), spec.data.last().and_then(|d| d.bin))
    {
        (Some(first), Some(last)) => {
            format!(" {} a {} ", format::compact(first.start), format::compact(last.end))
        }
        _ => String::new(),
    };

    let sparkline = Sparkline::default()
        .block(block.title_bottom(extent))
        .data(&counts)
        .style(Style::default().fg(color(pastel(0))));
    frame.render_widget(sparkline, area);
}

fn draw_map_table(frame: &mut Frame, area: Rect, block: Block<'_>, spec: &ChartSpec) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let [table_area, note_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

    let (min, max) = match spec.palette {
        Palette::YlGnBu { min, max } => (min as f32, max as f32),
        Palette::Pastel => (0.0, spec.max_value() as f32),
    };
    let scale = ColorScale::yl_gn_bu((min, max));
    let rows: Vec<Row<'_>> = spec
        .data
        .iter()
        .map(|datum| {
            let value = datum.value as f32;
            let ink = if value > (min + max) / 2.0 { Color::White } else { Color::Black };
            Row::new(vec![Cell::from(datum.key.as_str()), Cell::from(format::usd(datum.value))])
                .style(Style::default().bg(color(scale.scale(value))).fg(ink))
        })
        .collect();
    let header = Row::new(vec!["País", "Média"]).style(bold());
    let table = Table::new(rows, [Constraint::Length(6), Constraint::Min(10)]).header(header);
    frame.render_widget(table, table_area);

    if let Some(note) = &spec.note {
        let note = Paragraph::new(note.as_str())
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .wrap(Wrap { trim: true });
        frame.render_widget(note, note_area);
    }
}

fn draw_pie_legend(frame: &mut Frame, area: Rect, block: Block<'_>, spec: &ChartSpec) {
    let total: f64 = spec.data.iter().map(|d| d.value).sum();
    let bar_room = area.width.saturating_sub(4) as f64;

    let mut lines = Vec::with_capacity(spec.data.len() * 2);
    for (i, datum) in spec.data.iter().enumerate() {
        let share = datum.share.unwrap_or(if total > 0.0 { datum.value / total } else { 0.0 });
        let style = Style::default().fg(color(pastel(i)));
        lines.push(Line::from(vec![
            Span::styled("■ ", style),
            Span::raw(format!("{} {}", datum.key, format::percent(share))),
        ]));
        lines.push(Line::styled("█".repeat((share * bar_room).round() as usize), style));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_table(frame: &mut Frame, area: Rect, view: &PageView<'_>) {
    let rows = &view.snapshot.rows;
    let border = if view.state.focus == Focus::Table { accent() } else { Style::default() };
    let block = Block::bordered()
        .title(format!("{} ({} registros)", page::TABLE, format::thousands(rows.len() as u64)))
        .border_style(border);

    let height = area.height.saturating_sub(3) as usize;
    let visible: Vec<Row<'_>> = rows
        .iter()
        .skip(view.state.table_offset)
        .take(height)
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))))
        .collect();
    let widths = [
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(15),
        Constraint::Length(13),
        Constraint::Length(11),
    ];
    let table = Table::new(visible, widths).header(Row::new(COLUMNS).style(bold())).block(block);
    frame.render_widget(table, area);
}

fn draw_help(frame: &mut Frame) {
    let area = frame.area();
    let width = 52.min(area.width);
    let height = 12.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let lines = vec![
        Line::from("↑/↓       mover cursor / rolar tabela"),
        Line::from("←/→       filtro anterior / próximo"),
        Line::from("espaço    marcar ou desmarcar valor"),
        Line::from("a         selecionar todos do filtro"),
        Line::from("n         limpar filtro"),
        Line::from("PgUp/PgDn rolar tabela"),
        Line::from("Tab       alternar foco"),
        Line::from("?         ajuda"),
        Line::from("q         sair"),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Ajuda").border_style(accent())),
        popup,
    );
}
