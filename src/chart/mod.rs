//! Chart specifications and the chart builders.
//!
//! A [`ChartSpec`] is a declarative, renderer-agnostic description of one
//! panel: mark, encodings, ordered data and palette. Builders in [`builders`]
//! map a filtered view to a [`ChartResult`], which is either a spec or the
//! [`ChartResult::InsufficientData`] signal. Surfaces treat both variants
//! uniformly.

pub mod builders;
pub mod stat;

pub use builders::{
    build_all, company_size_distribution, modality_share, role_salary_map, salary_histogram,
    seniority_distribution, top_countries, top_roles_by_salary, year_distribution,
};
pub use stat::Bin;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Placeholder text shown instead of a chart.
pub const INSUFFICIENT_DATA: &str = "Sem informações suficientes para gerar gráfico";

/// Identifies one of the dashboard's chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    /// Records per seniority level.
    SeniorityDistribution,
    /// Records per year.
    YearDistribution,
    /// Top residence countries by record count.
    TopCountries,
    /// Records per company size.
    CompanySizeDistribution,
    /// Top roles by mean salary.
    TopRolesBySalary,
    /// Salary histogram.
    SalaryHistogram,
    /// Mean salary per country for one role.
    RoleSalaryMap,
    /// Work modality proportions.
    ModalityShare,
}

impl ChartId {
    /// All panels in page order.
    pub const ALL: [Self; 8] = [
        Self::SeniorityDistribution,
        Self::YearDistribution,
        Self::TopCountries,
        Self::CompanySizeDistribution,
        Self::TopRolesBySalary,
        Self::SalaryHistogram,
        Self::RoleSalaryMap,
        Self::ModalityShare,
    ];

    /// Generic panel title, used when no spec carries a more specific one.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SeniorityDistribution => "Distribuição dos dados por experiência",
            Self::YearDistribution => "Distribuição dos dados por ano",
            Self::TopCountries => "Distribuição dos dados por país",
            Self::CompanySizeDistribution => "Distribuição dos dados por porte de empresa",
            Self::TopRolesBySalary => "Top cargos por salário anual médio",
            Self::SalaryHistogram => "Distribuição de salários anuais",
            Self::RoleSalaryMap => "Média salarial anual em USD por país",
            Self::ModalityShare => "Proporção de quantidade de tipos de trabalho",
        }
    }
}

/// Bar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Categories on x, values on y.
    Vertical,
    /// Categories on y, values on x.
    Horizontal,
}

/// Visual mark of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    /// Bars, one per datum.
    Bar {
        /// Bar direction.
        orientation: Orientation,
    },
    /// Adjacent bars over equal-width bins.
    Histogram {
        /// Number of bins.
        bins: usize,
    },
    /// Regions colored by value, keyed by ISO3 country code.
    Choropleth,
    /// Part-to-whole slices annotated with percent and label.
    Pie,
}

/// Maps a data field to a visual channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    /// Source field name.
    pub field: String,
    /// Axis or legend title.
    pub title: String,
}

impl Encoding {
    /// Create an encoding.
    #[must_use]
    pub fn new(field: &str, title: &str) -> Self {
        Self { field: field.to_string(), title: title.to_string() }
    }
}

/// Color assignment of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Palette {
    /// Cycling pastel qualitative colors.
    Pastel,
    /// Continuous yellow-green-blue ramp over a value domain.
    YlGnBu {
        /// Domain minimum.
        min: f64,
        /// Domain maximum.
        max: f64,
    },
}

/// One data point, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datum {
    /// Category, bin label or country code.
    pub key: String,
    /// Count or mean.
    pub value: f64,
    /// Bin extent, for histograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,
    /// Fraction of the whole, for part-to-whole charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
}

impl Datum {
    /// A plain keyed value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self { key: key.into(), value, bin: None, share: None }
    }
}

/// Declarative chart description derived from a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Panel identity.
    pub id: ChartId,
    /// Chart title.
    pub title: String,
    /// Visual mark.
    pub mark: Mark,
    /// Horizontal channel.
    pub x: Encoding,
    /// Vertical channel.
    pub y: Encoding,
    /// Color channel, if data-driven.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Encoding>,
    /// Data points in display order.
    pub data: Vec<Datum>,
    /// Color assignment.
    pub palette: Palette,
    /// Caveat shown under the chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChartSpec {
    /// Largest datum value, 0 when there is no data.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.data.iter().map(|d| d.value).fold(0.0, f64::max)
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Output of a chart builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartResult {
    /// A drawable chart.
    Chart(ChartSpec),
    /// The input (after any restriction) was empty.
    InsufficientData {
        /// The panel that has nothing to show.
        id: ChartId,
    },
}

impl ChartResult {
    /// Panel identity.
    #[must_use]
    pub fn id(&self) -> ChartId {
        match self {
            Self::Chart(spec) => spec.id,
            Self::InsufficientData { id } => *id,
        }
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Chart(spec) => &spec.title,
            Self::InsufficientData { id } => id.title(),
        }
    }

    /// The chart spec, if any.
    #[must_use]
    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            Self::Chart(spec) => Some(spec),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Whether this is the insufficient-data signal.
    #[must_use]
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

/// Tunables of the chart builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Histogram bin count.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Group count kept by the top-N charts.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Role the salary map is restricted to.
    #[serde(default = "default_focus_role")]
    pub focus_role: String,
}

fn default_histogram_bins() -> usize {
    40
}
fn default_top_n() -> usize {
    10
}
fn default_focus_role() -> String {
    "Data Scientist".to_string()
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
            top_n: default_top_n(),
            focus_role: default_focus_role(),
        }
    }
}
