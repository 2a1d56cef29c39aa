//! Property-based tests for the filter, metric and chart stages.
//!
//! Run: cargo test --test pipeline_properties
#![allow(clippy::unwrap_used, missing_docs)]

use proptest::prelude::*;
use salary_dash::chart::{self, ChartOptions};
use salary_dash::dataset::{CompanySize, Dataset, Record, Seniority};
use salary_dash::filter::{self, Dimension, FilterSelection};
use salary_dash::metrics::{SummaryMetrics, NO_DATA};
use salary_dash::pipeline;
use std::collections::BTreeSet;

const CONTRACTS: [&str; 3] = ["integral", "freelancer", "parcial"];
const MODALITIES: [&str; 3] = ["remoto", "presencial", "híbrido"];
const ROLES: [&str; 5] =
    ["Data Scientist", "Data Analyst", "Data Engineer", "ML Engineer", "BI Analyst"];
const COUNTRIES: [&str; 5] = ["USA", "BRA", "DEU", "GBR", "IND"];

fn record() -> impl Strategy<Value = Record> {
    (
        2020i32..2026,
        0usize..4,
        0usize..3,
        0usize..3,
        0usize..5,
        0usize..5,
        0usize..3,
        1_000.0f64..500_000.0,
    )
        .prop_map(|(year, level, contract, modality, role, country, size, salary)| Record {
            year,
            seniority: Seniority::ALL[level],
            contract: CONTRACTS[contract].to_string(),
            modality: MODALITIES[modality].to_string(),
            role: ROLES[role].to_string(),
            residence: COUNTRIES[country].to_string(),
            company_size: CompanySize::ALL[size],
            salary_usd: salary.round(),
        })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record(), 0..60).prop_map(Dataset::new)
}

/// A selection drawn from the full value universe, independent of the data.
fn selection() -> impl Strategy<Value = FilterSelection> {
    (
        prop::collection::btree_set(2020i32..2026, 0..6),
        prop::collection::btree_set(0usize..4, 0..4),
        prop::collection::btree_set(0usize..3, 0..3),
        prop::collection::btree_set(0usize..3, 0..3),
    )
        .prop_map(|(years, levels, contracts, modalities)| FilterSelection {
            years,
            seniorities: levels.into_iter().map(|i| Seniority::ALL[i]).collect(),
            contracts: contracts.into_iter().map(|i| CONTRACTS[i].to_string()).collect(),
            modalities: modalities.into_iter().map(|i| MODALITIES[i].to_string()).collect(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The view is exactly the matching records, in dataset order.
    #[test]
    fn prop_view_is_ordered_matching_subset(data in dataset(), selection in selection()) {
        let view = filter::apply(&data, &selection);

        let expected: Vec<&Record> =
            data.records().iter().filter(|r| selection.matches(r)).collect();
        prop_assert_eq!(view.records(), expected.as_slice());

        for record in view.iter() {
            prop_assert!(selection.years.contains(&record.year));
            prop_assert!(selection.seniorities.contains(&record.seniority));
            prop_assert!(selection.contracts.contains(&record.contract));
            prop_assert!(selection.modalities.contains(&record.modality));
            prop_assert!(data.records().iter().any(|r| std::ptr::eq(r, record)));
        }
    }

    /// Emptying any one dimension empties the view.
    #[test]
    fn prop_empty_dimension_empties_view(data in dataset(), dim in 0usize..4) {
        let dimension = Dimension::ALL[dim];
        let selection = FilterSelection::all(&data).with_values(dimension, []);

        prop_assert!(selection.has_empty_dimension());
        prop_assert!(filter::apply(&data, &selection).is_empty());
    }

    /// The full selection keeps every record.
    #[test]
    fn prop_full_selection_keeps_everything(data in dataset()) {
        let view = filter::apply(&data, &FilterSelection::all(&data));
        prop_assert_eq!(view.len(), data.len());
    }

    /// Metrics are the defaults on an empty view and bounded otherwise.
    #[test]
    fn prop_metric_bounds(data in dataset(), selection in selection()) {
        let view = filter::apply(&data, &selection);
        let metrics = SummaryMetrics::compute(&view);

        if view.is_empty() {
            prop_assert_eq!(metrics.mean_salary, 0.0);
            prop_assert_eq!(metrics.max_salary, 0.0);
            prop_assert_eq!(metrics.count, 0);
            prop_assert_eq!(metrics.top_role.as_str(), NO_DATA);
        } else {
            let salaries: Vec<f64> = view.iter().map(|r| r.salary_usd).collect();
            let min = salaries.iter().copied().fold(f64::INFINITY, f64::min);
            let max = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(metrics.mean_salary >= min && metrics.mean_salary <= max);
            prop_assert_eq!(metrics.max_salary, max);
            prop_assert_eq!(metrics.count, view.len());
            let roles: BTreeSet<&str> = view.iter().map(|r| r.role.as_str()).collect();
            prop_assert!(roles.contains(metrics.top_role.as_str()));
        }
    }

    /// Filtering and chart building are pure.
    #[test]
    fn prop_idempotent(data in dataset(), selection in selection()) {
        let options = ChartOptions::default();
        let first = pipeline::render(&data, &selection, &options);
        let second = pipeline::render(&data, &selection, &options);
        prop_assert_eq!(&first, &second);

        let view = filter::apply(&data, &selection);
        prop_assert_eq!(chart::build_all(&view, &options), chart::build_all(&view, &options));
    }

    /// Every panel is insufficient exactly when the view is empty, except the
    /// role-restricted map which also depends on the focus role.
    #[test]
    fn prop_insufficient_iff_empty(data in dataset(), selection in selection()) {
        let options = ChartOptions::default();
        let pass = pipeline::render(&data, &selection, &options);
        let has_focus = pass.view.iter().any(|r| r.role == options.focus_role);

        for result in &pass.charts {
            let expected = match result.id() {
                chart::ChartId::RoleSalaryMap => !has_focus,
                _ => pass.view.is_empty(),
            };
            prop_assert_eq!(result.is_insufficient(), expected);
            if let Some(spec) = result.spec() {
                prop_assert!(!spec.data.is_empty());
            }
        }
    }

    /// Histogram bins account for every record; modality shares sum to one.
    #[test]
    fn prop_histogram_and_shares_are_complete(data in dataset(), selection in selection()) {
        let view = filter::apply(&data, &selection);
        prop_assume!(!view.is_empty());

        let hist = chart::salary_histogram(&view, 40);
        let total: f64 = hist.spec().unwrap().data.iter().map(|d| d.value).sum();
        prop_assert_eq!(total as usize, view.len());

        let pie = chart::modality_share(&view);
        let shares: f64 = pie.spec().unwrap().data.iter().filter_map(|d| d.share).sum();
        prop_assert!((shares - 1.0).abs() < 1e-9);
    }
}
