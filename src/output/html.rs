//! Static HTML report.
//!
//! One self-contained page per pass: the active filters, metric tiles, every
//! chart panel as an embedded SVG image, the chart specifications as JSON,
//! and the detailed table.

use super::figure;
use crate::chart::ChartResult;
use crate::error::Result;
use crate::filter::{Dimension, FilterSelection};
use crate::page;
use crate::pipeline::{RenderPass, RenderSurface};
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

/// Writes each presented pass to an HTML file.
#[derive(Debug, Clone)]
pub struct HtmlReport {
    selection: FilterSelection,
    path: PathBuf,
}

impl HtmlReport {
    /// A report for `selection`, written to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, selection: FilterSelection) -> Self {
        Self { selection, path: path.into() }
    }

    /// Output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSurface for HtmlReport {
    fn selection(&self) -> FilterSelection {
        self.selection.clone()
    }

    fn present(&mut self, pass: &RenderPass<'_>) -> Result<()> {
        let html = render_html(pass)?;
        std::fs::write(&self.path, html)?;
        tracing::info!(path = %self.path.display(), records = pass.view.len(), "report written");
        Ok(())
    }
}

/// Escape text for HTML content and attribute values.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render a pass as a complete HTML document.
///
/// # Errors
///
/// Returns an error if the chart specifications cannot be serialized.
pub fn render_html(pass: &RenderPass<'_>) -> Result<String> {
    let mut out = String::with_capacity(64 * 1024);

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"pt-BR\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "  <meta charset=\"utf-8\">");
    let _ = writeln!(out, "  <title>{}</title>", escape_html(page::TITLE));
    write_styles(&mut out);
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");

    write_sidebar(&mut out, &pass.selection);

    let _ = writeln!(out, "<main>");
    let _ = writeln!(out, "  <h1>{}</h1>", escape_html(page::HEADLINE));
    let _ = writeln!(out, "  <p>{}</p>", escape_html(page::SUBTITLE));

    let _ = writeln!(out, "  <h2>{}</h2>", escape_html(page::METRICS));
    let _ = writeln!(out, "  <div class=\"tiles\">");
    for (caption, value) in pass.metrics.tiles() {
        let _ = writeln!(
            out,
            "    <div class=\"tile\"><span>{}</span><strong>{}</strong></div>",
            escape_html(caption),
            escape_html(&value)
        );
    }
    let _ = writeln!(out, "  </div>");

    for section in &page::SECTIONS {
        let _ = writeln!(out, "  <h2>{}</h2>", escape_html(section.heading));
        if let Some(description) = section.description {
            let _ = writeln!(out, "  <p>{}</p>", escape_html(description));
        }
        let _ = writeln!(out, "  <div class=\"grid\">");
        for id in section.charts {
            if let Some(chart) = pass.charts.iter().find(|c| c.id() == *id) {
                write_chart(&mut out, chart);
            }
        }
        let _ = writeln!(out, "  </div>");
    }

    write_table(&mut out, pass);

    // `</` inside a script element would end it early.
    let specs = serde_json::to_string(&pass.charts)?.replace("</", "<\\/");
    let _ = writeln!(
        out,
        "  <script type=\"application/json\" id=\"chart-specs\">{specs}</script>"
    );

    let _ = writeln!(out, "</main>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    Ok(out)
}

fn write_styles(out: &mut String) {
    out.push_str(
        r"  <style>
    body { margin: 0; display: flex; font-family: sans-serif; color: #334155; }
    aside { width: 240px; padding: 16px; background: #f1f5f9; }
    main { flex: 1; padding: 16px 32px; }
    .tag { display: inline-block; margin: 2px; padding: 2px 8px; border-radius: 4px;
           background: #20B2AA; color: #fff; font-size: 12px; }
    .tiles { display: flex; gap: 16px; }
    .tile { flex: 1; padding: 12px; border: 1px solid #e2e8f0; border-radius: 6px; }
    .tile span { display: block; font-size: 13px; }
    .tile strong { font-size: 22px; }
    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
    figure { margin: 0; }
    figure img { width: 100%; }
    figcaption { font-size: 12px; }
    table { border-collapse: collapse; font-size: 12px; }
    th, td { border: 1px solid #e2e8f0; padding: 2px 8px; }
    td.num { text-align: right; }
  </style>
",
    );
}

fn write_sidebar(out: &mut String, selection: &FilterSelection) {
    let _ = writeln!(out, "<aside>");
    let _ = writeln!(out, "  <h3>{}</h3>", escape_html(page::FILTERS));
    for dimension in Dimension::ALL {
        let _ = writeln!(out, "  <h4>{}</h4>", escape_html(dimension.label()));
        let _ = write!(out, "  <div>");
        for value in selection.values(dimension) {
            let _ = write!(out, "<span class=\"tag\">{}</span>", escape_html(&value.to_string()));
        }
        let _ = writeln!(out, "</div>");
    }
    let _ = writeln!(out, "</aside>");
}

fn write_chart(out: &mut String, chart: &ChartResult) {
    let svg = figure::render(chart);
    let _ = writeln!(
        out,
        "    <figure id=\"{}\"><img alt=\"{}\" src=\"{}\">",
        chart_anchor(chart),
        escape_html(chart.title()),
        svg.to_data_uri()
    );
    if let Some(note) = chart.spec().and_then(|s| s.note.as_deref()) {
        let _ = writeln!(out, "      <figcaption>{}</figcaption>", escape_html(note));
    }
    let _ = writeln!(out, "    </figure>");
}

fn chart_anchor(chart: &ChartResult) -> String {
    serde_json::to_value(chart.id())
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn write_table(out: &mut String, pass: &RenderPass<'_>) {
    let _ = writeln!(out, "  <h2>{}</h2>", escape_html(page::TABLE));
    let _ = writeln!(out, "  <table>");
    let _ = write!(out, "    <tr>");
    for column in pass.table_header() {
        let _ = write!(out, "<th>{}</th>", escape_html(column));
    }
    let _ = writeln!(out, "</tr>");
    for row in pass.table_rows() {
        let _ = write!(out, "    <tr>");
        let last = row.len() - 1;
        for (i, cell) in row.iter().enumerate() {
            let class = if i == 0 || i == last { " class=\"num\"" } else { "" };
            let _ = write!(out, "<td{class}>{}</td>", escape_html(cell));
        }
        let _ = writeln!(out, "</tr>");
    }
    let _ = writeln!(out, "  </table>");
}
