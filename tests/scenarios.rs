//! End-to-end scenarios: CSV in, metrics and chart results out.
//!
//! Run: cargo test --test scenarios
#![allow(clippy::unwrap_used, missing_docs)]

use approx::assert_relative_eq;
use salary_dash::chart::{self, ChartId, ChartOptions, ChartResult};
use salary_dash::dataset::Dataset;
use salary_dash::filter::{self, Dimension, FilterSelection, FilterValue};
use salary_dash::metrics::{SummaryMetrics, NO_DATA};
use salary_dash::output::render_html;
use salary_dash::pipeline;
use std::fmt::Write as _;
use std::io::Write as _;

const HEADER: &str =
    "ano,senioridade,contrato,modalidade,cargo,residencia_iso3,porte_empresa,salario_usd\n";

fn csv(rows: &[&str]) -> Dataset {
    let mut text = HEADER.to_string();
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    Dataset::from_csv_str(&text).unwrap()
}

// ============================================================================
// Scenario 1: year selection
// ============================================================================

#[test]
fn scenario_01_year_selection() {
    let data = csv(&[
        "2022,junior,integral,remoto,Data Analyst,BRA,pequena,30000",
        "2023,pleno,integral,presencial,Data Engineer,USA,média,90000",
        "2024,senior,integral,remoto,Data Scientist,USA,grande,150000",
    ]);

    let all = FilterSelection::all(&data);
    assert_eq!(filter::apply(&data, &all).len(), 3);

    let subset =
        all.with_values(Dimension::Year, [FilterValue::Year(2022), FilterValue::Year(2024)]);
    let view = filter::apply(&data, &subset);
    let years: Vec<i32> = view.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2022, 2024]);
}

// ============================================================================
// Scenario 2: identical salaries
// ============================================================================

#[test]
fn scenario_02_identical_salaries() {
    let data = csv(&[
        "2023,junior,integral,remoto,Data Analyst,BRA,pequena,100000",
        "2023,senior,integral,remoto,Data Analyst,USA,grande,100000",
        "2024,pleno,parcial,híbrido,Data Engineer,DEU,média,100000",
        "2024,executivo,integral,presencial,Data Scientist,GBR,grande,100000",
    ]);
    let view = filter::apply(&data, &FilterSelection::all(&data));
    let metrics = SummaryMetrics::compute(&view);

    assert_relative_eq!(metrics.mean_salary, 100_000.0);
    assert_relative_eq!(metrics.max_salary, 100_000.0);
    assert_eq!(metrics.count, 4);
    assert_eq!(metrics.top_role, "Data Analyst");

    // A single distinct salary still yields a drawable histogram.
    let ChartResult::Chart(hist) = chart::salary_histogram(&view, 40) else {
        panic!("histogram should be drawable");
    };
    assert_eq!(hist.data.iter().map(|d| d.value).sum::<f64>(), 4.0);
}

// ============================================================================
// Scenario 3: every modality excluded
// ============================================================================

#[test]
fn scenario_03_all_modalities_excluded() {
    let data = csv(&[
        "2023,junior,integral,remoto,Data Analyst,BRA,pequena,30000",
        "2024,senior,integral,presencial,Data Scientist,USA,grande,150000",
    ]);
    let selection = FilterSelection::all(&data).with_values(Dimension::Modality, []);
    let pass = pipeline::render(&data, &selection, &ChartOptions::default());

    assert!(pass.view.is_empty());
    assert_eq!(pass.metrics, SummaryMetrics::default());
    assert_eq!(pass.metrics.top_role, NO_DATA);
    assert_eq!(pass.charts.len(), ChartId::ALL.len());
    assert!(pass.charts.iter().all(ChartResult::is_insufficient));
    assert_eq!(pass.table_rows().count(), 0);

    let html = render_html(&pass).unwrap();
    assert_eq!(html.matches("\"status\":\"insufficient_data\"").count(), 8);
}

// ============================================================================
// Scenario 4: role-restricted map
// ============================================================================

#[test]
fn scenario_04_map_without_focus_role() {
    let data = csv(&[
        "2023,junior,integral,remoto,Data Analyst,BRA,pequena,30000",
        "2024,senior,integral,presencial,Data Engineer,USA,grande,150000",
    ]);
    let view = filter::apply(&data, &FilterSelection::all(&data));
    assert!(!view.is_empty());

    assert!(chart::role_salary_map(&view, "Data Scientist").is_insufficient());
    assert!(!chart::role_salary_map(&view, "Data Engineer").is_insufficient());
    assert!(!chart::top_countries(&view, 10).is_insufficient());
}

#[test]
fn scenario_04_map_means_per_country() {
    let data = csv(&[
        "2023,senior,integral,remoto,Data Scientist,USA,grande,200000",
        "2024,senior,integral,remoto,Data Scientist,USA,grande,100000",
        "2024,pleno,integral,remoto,Data Scientist,BRA,média,50000",
        "2024,pleno,integral,remoto,Data Analyst,BRA,média,10000",
    ]);
    let view = filter::apply(&data, &FilterSelection::all(&data));
    let result = chart::role_salary_map(&view, "Data Scientist");
    let spec = result.spec().unwrap();

    let keys: Vec<&str> = spec.data.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["BRA", "USA"]);
    assert_relative_eq!(spec.data[0].value, 50_000.0);
    assert_relative_eq!(spec.data[1].value, 150_000.0);
    assert!(spec.note.is_some());
}

// ============================================================================
// Scenario 5: top-10 out of 15 groups
// ============================================================================

/// 15 countries `C01..C15` where country `i` has `i` records, all of them
/// `Role i` earning `i * 10_000`.
fn fifteen_groups() -> Dataset {
    let mut text = HEADER.to_string();
    for i in 1..=15 {
        for _ in 0..i {
            let _ = writeln!(
                text,
                "2024,senior,integral,remoto,Role {i:02},C{i:02},grande,{}",
                i * 10_000
            );
        }
    }
    Dataset::from_csv_str(&text).unwrap()
}

#[test]
fn scenario_05_top_countries_by_count() {
    let data = fifteen_groups();
    let view = filter::apply(&data, &FilterSelection::all(&data));
    let spec = chart::top_countries(&view, 10).spec().cloned().unwrap();

    assert_eq!(spec.data.len(), 10);
    let keys: Vec<&str> = spec.data.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["C15", "C14", "C13", "C12", "C11", "C10", "C09", "C08", "C07", "C06"]);
    assert!(spec.data.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test]
fn scenario_05_top_roles_by_mean() {
    let data = fifteen_groups();
    let view = filter::apply(&data, &FilterSelection::all(&data));
    let spec = chart::top_roles_by_salary(&view, 10).spec().cloned().unwrap();

    assert_eq!(spec.data.len(), 10);
    // Displayed ascending, so the best-paid role comes last.
    let keys: Vec<&str> = spec.data.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "Role 06", "Role 07", "Role 08", "Role 09", "Role 10", "Role 11", "Role 12",
            "Role 13", "Role 14", "Role 15"
        ]
    );
    assert_relative_eq!(spec.data[9].value, 150_000.0);
    assert!(spec.title.starts_with("Top 10"));
}

#[test]
fn scenario_05_zero_top_n_keeps_one_bar() {
    let data = fifteen_groups();
    let options = ChartOptions { top_n: 0, ..ChartOptions::default() };
    let pass = pipeline::render(&data, &FilterSelection::all(&data), &options);

    for id in [ChartId::TopCountries, ChartId::TopRolesBySalary] {
        let chart = pass.charts.iter().find(|c| c.id() == id).unwrap();
        assert_eq!(chart.spec().unwrap().data.len(), 1, "{id:?}");
    }
}

// ============================================================================
// Loading from disk
// ============================================================================

#[test]
fn load_from_file_and_render_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("df_final.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    writeln!(file, "2024,senior,integral,remoto,Data Scientist,USA,grande,180000").unwrap();
    drop(file);

    let data = Dataset::load(&path).unwrap();
    let out = dir.path().join("dashboard.html");
    let mut report = salary_dash::output::HtmlReport::new(&out, FilterSelection::all(&data));
    pipeline::run_pass(&mut report, &data, &ChartOptions::default()).unwrap();

    let html = std::fs::read_to_string(out).unwrap();
    assert!(html.contains("$180,000"));
    assert_eq!(html.matches("data:image/svg+xml;base64,").count(), 8);
}
