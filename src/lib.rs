//! # salary-dash
//!
//! Interactive exploration of a salary dataset for data roles.
//!
//! The crate loads a tabular dataset once, filters it by four categorical
//! dimensions (year, seniority, contract type, work modality), and derives
//! headline metrics and eight chart panels from the filtered view. The same
//! pass can be shown in the terminal or written out as a static HTML page.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salary_dash::prelude::*;
//!
//! let dataset = Dataset::load("df_final.csv")?;
//! let selection = FilterSelection::all(&dataset);
//! let pass = render(&dataset, &selection, &ChartOptions::default());
//!
//! println!("{} registros", pass.metrics.count);
//! ```
//!
//! ## Feature Flags
//!
//! - `tui` (default): interactive terminal dashboard (ratatui + crossterm)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Modules
// ============================================================================

/// Dataset schema and CSV loading.
pub mod dataset;

/// Filter state and filter engine.
pub mod filter;

/// Headline metrics.
pub mod metrics;

/// Chart specifications and builders.
pub mod chart;

/// The filter-aggregate-render pass and the render surface boundary.
pub mod pipeline;

// ============================================================================
// Presentation Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Number formatting.
pub mod format;

/// Page headings and chart sections.
pub mod page;

/// Output encoders (SVG, HTML).
pub mod output;

/// Interactive terminal dashboard.
#[cfg(feature = "tui")]
#[cfg_attr(docsrs, doc(cfg(feature = "tui")))]
pub mod tui;

// ============================================================================
// Configuration & Logging
// ============================================================================

/// Configuration file support.
pub mod config;

/// Logging setup.
pub mod logging;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for salary-dash operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use salary_dash::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{ChartId, ChartOptions, ChartResult, ChartSpec, INSUFFICIENT_DATA};
    pub use crate::config::Config;
    pub use crate::dataset::{CompanySize, Dataset, Record, Seniority};
    pub use crate::error::{Error, Result};
    pub use crate::filter::{apply, Dimension, FilterSelection, FilterValue, FilteredView};
    pub use crate::metrics::{SummaryMetrics, NO_DATA};
    pub use crate::output::HtmlReport;
    pub use crate::pipeline::{render, run_pass, RenderPass, RenderSurface};
}
