//! Chart builders: pure functions from a filtered view to a chart result.
//!
//! Every builder returns [`ChartResult::InsufficientData`] on an empty input
//! and never a chart with zero data points. None of them holds state, so they
//! can run in any order.

use super::stat::{count_by, histogram, mean_salary_by, top_n};
use super::{
    ChartId, ChartOptions, ChartResult, ChartSpec, Datum, Encoding, Mark, Orientation, Palette,
};
use crate::dataset::{
    COL_COMPANY_SIZE, COL_MODALITY, COL_RESIDENCE, COL_ROLE, COL_SALARY, COL_SENIORITY, COL_YEAR,
};
use crate::filter::FilteredView;
use crate::format;

const COUNT_FIELD: &str = "quantidade";

/// Caveat attached to the salary map.
pub const MAP_NOTE: &str =
    "Atenção: A representatividade global pode ser limitada pela alta concentração de dados nos EUA.";

fn bar_chart(id: ChartId, x: Encoding, data: Vec<Datum>) -> ChartResult {
    ChartResult::Chart(ChartSpec {
        id,
        title: id.title().to_string(),
        mark: Mark::Bar { orientation: Orientation::Vertical },
        x,
        y: Encoding::new(COUNT_FIELD, COUNT_FIELD),
        color: None,
        data,
        palette: Palette::Pastel,
        note: None,
    })
}

/// Records per seniority level, in canonical level order.
#[must_use]
pub fn seniority_distribution(view: &FilteredView<'_>) -> ChartResult {
    let id = ChartId::SeniorityDistribution;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }
    let data = count_by(view, |r| r.seniority)
        .into_iter()
        .map(|(level, n)| Datum::new(level.as_str(), n as f64))
        .collect();
    bar_chart(id, Encoding::new(COL_SENIORITY, "Experiências"), data)
}

/// Records per year, ascending.
#[must_use]
pub fn year_distribution(view: &FilteredView<'_>) -> ChartResult {
    let id = ChartId::YearDistribution;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }
    let data = count_by(view, |r| r.year)
        .into_iter()
        .map(|(year, n)| Datum::new(year.to_string(), n as f64))
        .collect();
    bar_chart(id, Encoding::new(COL_YEAR, "Ano"), data)
}

/// The `n` residence countries with most records, descending.
///
/// Ties are ordered by country code. `n` below 1 is treated as 1.
#[must_use]
pub fn top_countries(view: &FilteredView<'_>, n: usize) -> ChartResult {
    let id = ChartId::TopCountries;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }
    let data = top_n(count_by(view, |r| r.residence.clone()), n.max(1))
        .into_iter()
        .map(|(code, count)| Datum::new(code, count as f64))
        .collect();
    bar_chart(id, Encoding::new(COL_RESIDENCE, "Países"), data)
}

/// Records per company size, in canonical size order.
#[must_use]
pub fn company_size_distribution(view: &FilteredView<'_>) -> ChartResult {
    let id = ChartId::CompanySizeDistribution;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }
    let data = count_by(view, |r| r.company_size)
        .into_iter()
        .map(|(size, n)| Datum::new(size.as_str(), n as f64))
        .collect();
    bar_chart(id, Encoding::new(COL_COMPANY_SIZE, "Porte"), data)
}

/// The `n` roles with the highest mean salary, as horizontal bars.
///
/// Selection ranks by mean descending (ties by role name); display order is
/// ascending by mean so the best-paid role sits at the top of the chart.
/// `n` below 1 is treated as 1.
#[must_use]
pub fn top_roles_by_salary(view: &FilteredView<'_>, n: usize) -> ChartResult {
    let id = ChartId::TopRolesBySalary;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }

    let n = n.max(1);
    let mut top = top_n(mean_salary_by(view, |r| r.role.clone()), n);
    top.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    ChartResult::Chart(ChartSpec {
        id,
        title: format!("Top {n} cargos por salário anual médio"),
        mark: Mark::Bar { orientation: Orientation::Horizontal },
        x: Encoding::new(COL_SALARY, "Média salarial anual em USD"),
        y: Encoding::new(COL_ROLE, "Cargo"),
        color: None,
        data: top.into_iter().map(|(role, mean)| Datum::new(role, mean)).collect(),
        palette: Palette::Pastel,
        note: None,
    })
}

/// Unweighted salary histogram over `bins` equal-width bins.
#[must_use]
pub fn salary_histogram(view: &FilteredView<'_>, bins: usize) -> ChartResult {
    let id = ChartId::SalaryHistogram;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }

    let salaries: Vec<f64> = view.iter().map(|r| r.salary_usd).collect();
    let data = histogram(&salaries, bins)
        .into_iter()
        .map(|bin| Datum {
            key: format!("{}-{}", format::compact(bin.start), format::compact(bin.end)),
            value: bin.count as f64,
            bin: Some(bin),
            share: None,
        })
        .collect::<Vec<_>>();

    ChartResult::Chart(ChartSpec {
        id,
        title: id.title().to_string(),
        mark: Mark::Histogram { bins: data.len() },
        x: Encoding::new(COL_SALARY, "Salário anual em USD"),
        y: Encoding::new("count", "count"),
        color: None,
        data,
        palette: Palette::Pastel,
        note: None,
    })
}

/// Mean salary per residence country for `role` only, as a choropleth.
///
/// The role restriction is applied on top of the user filter; an empty
/// restriction is insufficient data even when `view` is not empty.
#[must_use]
pub fn role_salary_map(view: &FilteredView<'_>, role: &str) -> ChartResult {
    let id = ChartId::RoleSalaryMap;
    let restricted = view.restrict(|r| r.role == role);
    if restricted.is_empty() {
        return ChartResult::InsufficientData { id };
    }

    let means = mean_salary_by(&restricted, |r| r.residence.clone());
    let min = means.values().copied().fold(f64::INFINITY, f64::min);
    let max = means.values().copied().fold(f64::NEG_INFINITY, f64::max);

    ChartResult::Chart(ChartSpec {
        id,
        title: format!("{} (cargo de {role})", id.title()),
        mark: Mark::Choropleth,
        x: Encoding::new(COL_RESIDENCE, "País"),
        y: Encoding::new(COL_SALARY, "Média salarial anual em USD"),
        color: Some(Encoding::new(COL_SALARY, "Média salarial anual em USD")),
        data: means.into_iter().map(|(code, mean)| Datum::new(code, mean)).collect(),
        palette: Palette::YlGnBu { min, max },
        note: Some(MAP_NOTE.to_string()),
    })
}

/// Work modality proportions with percent and label annotations.
///
/// Slices are ordered by count descending, ties by label.
#[must_use]
pub fn modality_share(view: &FilteredView<'_>) -> ChartResult {
    let id = ChartId::ModalityShare;
    if view.is_empty() {
        return ChartResult::InsufficientData { id };
    }

    let total = view.len() as f64;
    let data = top_n(count_by(view, |r| r.modality.clone()), usize::MAX)
        .into_iter()
        .map(|(modality, n)| Datum {
            key: modality,
            value: n as f64,
            bin: None,
            share: Some(n as f64 / total),
        })
        .collect();

    ChartResult::Chart(ChartSpec {
        id,
        title: id.title().to_string(),
        mark: Mark::Pie,
        x: Encoding::new(COL_MODALITY, "modalidade"),
        y: Encoding::new(COUNT_FIELD, COUNT_FIELD),
        color: Some(Encoding::new(COL_MODALITY, "modalidade")),
        data,
        palette: Palette::Pastel,
        note: None,
    })
}

/// Run every builder, in [`ChartId::ALL`] order.
#[must_use]
pub fn build_all(view: &FilteredView<'_>, options: &ChartOptions) -> Vec<ChartResult> {
    ChartId::ALL
        .iter()
        .map(|id| match id {
            ChartId::SeniorityDistribution => seniority_distribution(view),
            ChartId::YearDistribution => year_distribution(view),
            ChartId::TopCountries => top_countries(view, options.top_n),
            ChartId::CompanySizeDistribution => company_size_distribution(view),
            ChartId::TopRolesBySalary => top_roles_by_salary(view, options.top_n),
            ChartId::SalaryHistogram => salary_histogram(view, options.histogram_bins),
            ChartId::RoleSalaryMap => role_salary_map(view, &options.focus_role),
            ChartId::ModalityShare => modality_share(view),
        })
        .collect()
}
