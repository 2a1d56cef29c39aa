//! Metric engine: scalar summaries of a filtered view.

use crate::filter::FilteredView;
use crate::format;
use std::collections::BTreeMap;

/// Role shown when the view is empty.
pub const NO_DATA: &str = "Sem informações";

/// The four headline metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    /// Mean annual salary (USD).
    pub mean_salary: f64,
    /// Maximum annual salary (USD).
    pub max_salary: f64,
    /// Number of records.
    pub count: usize,
    /// Most frequent role title.
    pub top_role: String,
}

impl Default for SummaryMetrics {
    fn default() -> Self {
        Self { mean_salary: 0.0, max_salary: 0.0, count: 0, top_role: NO_DATA.to_string() }
    }
}

impl SummaryMetrics {
    /// Compute the metrics; an empty view yields `(0, 0, 0, NO_DATA)`.
    #[must_use]
    pub fn compute(view: &FilteredView<'_>) -> Self {
        if view.is_empty() {
            return Self::default();
        }

        let count = view.len();
        let sum: f64 = view.iter().map(|r| r.salary_usd).sum();
        let max_salary = view.iter().map(|r| r.salary_usd).fold(f64::NEG_INFINITY, f64::max);
        // Clamp against summation rounding so the mean stays within [min, max].
        let min_salary = view.iter().map(|r| r.salary_usd).fold(f64::INFINITY, f64::min);
        let mean_salary = (sum / count as f64).clamp(min_salary, max_salary);

        Self {
            mean_salary,
            max_salary,
            count,
            top_role: most_frequent_role(view).unwrap_or_else(|| NO_DATA.to_string()),
        }
    }

    /// Tiles as (caption, formatted value) in display order.
    #[must_use]
    pub fn tiles(&self) -> [(&'static str, String); 4] {
        [
            ("Média salarial anual", format::usd(self.mean_salary)),
            ("Salário máximo anual", format::usd(self.max_salary)),
            ("Quantidade de registros", format::thousands(self.count as u64)),
            ("Cargo mais frequente", self.top_role.clone()),
        ]
    }
}

/// The most frequent role; ties go to the lexicographically smallest title.
#[must_use]
pub fn most_frequent_role(view: &FilteredView<'_>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in view.iter() {
        *counts.entry(record.role.as_str()).or_insert(0) += 1;
    }

    // Ascending key order plus strict `>` keeps the first (smallest) title on ties.
    let mut best: Option<(&str, usize)> = None;
    for (role, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((role, count));
        }
    }
    best.map(|(role, _)| role.to_string())
}
