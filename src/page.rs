//! Page layout shared by every render surface: headings and the grouping of
//! chart panels into sections.

use crate::chart::ChartId;

/// Window / document title.
pub const TITLE: &str = "Análise de salários na área de dados";
/// Page headline.
pub const HEADLINE: &str = "Dashboard interativo de análises de salários na área de dados";
/// Line under the headline.
pub const SUBTITLE: &str =
    "Sinta-se livre para explorar nesta base de dados de salários na área de dados";
/// Sidebar heading.
pub const FILTERS: &str = "Filtros";
/// Metric tiles heading.
pub const METRICS: &str = "Principais métricas (Salário anual em USD)";
/// Detailed table heading.
pub const TABLE: &str = "Dados Detalhados";

/// A titled group of chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Heading.
    pub heading: &'static str,
    /// Text under the heading, if any.
    pub description: Option<&'static str>,
    /// Panels, in display order.
    pub charts: &'static [ChartId],
}

/// Chart sections in page order; together they cover [`ChartId::ALL`].
pub const SECTIONS: [Section; 2] = [
    Section {
        heading: "Distribuição dos dados",
        description: Some(
            "Com os dados distribuídos entre as principais colunas, fica mais fácil a leitura \
             e interpretação dos gráficos",
        ),
        charts: &[
            ChartId::SeniorityDistribution,
            ChartId::YearDistribution,
            ChartId::TopCountries,
            ChartId::CompanySizeDistribution,
        ],
    },
    Section {
        heading: "Gráficos",
        description: None,
        charts: &[
            ChartId::TopRolesBySalary,
            ChartId::SalaryHistogram,
            ChartId::RoleSalaryMap,
            ChartId::ModalityShare,
        ],
    },
];
