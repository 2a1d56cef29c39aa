//! The filter-aggregate-render pipeline.
//!
//! [`render`] is one synchronous pass: filter the dataset, compute the
//! metrics, run every chart builder. [`RenderSurface`] is the boundary to
//! whatever displays the result; [`run_pass`] reads the surface's current
//! selection, renders, and presents the whole pass in a single call.

use crate::chart::{self, ChartOptions, ChartResult};
use crate::dataset::{Dataset, Record, COLUMNS};
use crate::error::Result;
use crate::filter::{self, FilterSelection, FilteredView};
use crate::metrics::SummaryMetrics;

/// Everything one pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass<'a> {
    /// The selection this pass was computed for.
    pub selection: FilterSelection,
    /// The filtered records, for the detailed table.
    pub view: FilteredView<'a>,
    /// Headline metrics.
    pub metrics: SummaryMetrics,
    /// One result per chart panel, in page order.
    pub charts: Vec<ChartResult>,
}

impl RenderPass<'_> {
    /// Header of the detailed table.
    #[must_use]
    pub fn table_header(&self) -> [&'static str; 8] {
        COLUMNS
    }

    /// Rows of the detailed table, in dataset order.
    pub fn table_rows(&self) -> impl Iterator<Item = [String; 8]> + '_ {
        self.view.iter().map(Record::cells)
    }

    /// Number of panels showing the insufficient-data placeholder.
    #[must_use]
    pub fn insufficient_panels(&self) -> usize {
        self.charts.iter().filter(|c| c.is_insufficient()).count()
    }
}

/// Compute a full pass for `selection`.
#[must_use]
pub fn render<'a>(
    dataset: &'a Dataset,
    selection: &FilterSelection,
    options: &ChartOptions,
) -> RenderPass<'a> {
    let view = filter::apply(dataset, selection);
    let metrics = SummaryMetrics::compute(&view);
    let charts = chart::build_all(&view, options);

    let pass = RenderPass { selection: selection.clone(), view, metrics, charts };
    tracing::debug!(
        records = pass.view.len(),
        of = dataset.len(),
        insufficient = pass.insufficient_panels(),
        "render pass"
    );
    pass
}

/// A display target for render passes.
///
/// Selection reads and presentation are synchronous; `present` receives the
/// complete pass so no partially updated page is ever shown.
pub trait RenderSurface {
    /// The selection currently chosen in the surface's widgets.
    fn selection(&self) -> FilterSelection;

    /// Display a complete pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot draw or write its output.
    fn present(&mut self, pass: &RenderPass<'_>) -> Result<()>;
}

/// Read the surface's selection, render, and present.
///
/// # Errors
///
/// Propagates presentation errors from the surface.
pub fn run_pass<S>(surface: &mut S, dataset: &Dataset, options: &ChartOptions) -> Result<()>
where
    S: RenderSurface + ?Sized,
{
    let selection = surface.selection();
    let pass = render(dataset, &selection, options);
    surface.present(&pass)
}
