//! Dataset store: the immutable base table of salary records.
//!
//! The table is loaded once from a CSV file with a fixed set of columns and is
//! never mutated afterwards. Filtered views borrow from it.
//!
//! # Columns
//!
//! | column            | type        | field                   |
//! |-------------------|-------------|-------------------------|
//! | `ano`             | integer     | [`Record::year`]        |
//! | `senioridade`     | categorical | [`Record::seniority`]   |
//! | `contrato`        | text        | [`Record::contract`]    |
//! | `modalidade`      | text        | [`Record::modality`]    |
//! | `cargo`           | text        | [`Record::role`]        |
//! | `residencia_iso3` | text        | [`Record::residence`]   |
//! | `porte_empresa`   | categorical | [`Record::company_size`]|
//! | `salario_usd`     | number      | [`Record::salary_usd`]  |
//!
//! Extra columns are ignored and column order is free.

use crate::error::{Error, Result};
use arrow_array::cast::AsArray;
use arrow_array::types::{Float64Type, Int32Type};
use arrow_array::{Array, ArrayRef, RecordBatch};
use arrow_csv::reader::Format;
use arrow_csv::ReaderBuilder;
use arrow_schema::DataType;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Column holding the reference year.
pub const COL_YEAR: &str = "ano";
/// Column holding the seniority level.
pub const COL_SENIORITY: &str = "senioridade";
/// Column holding the contract type.
pub const COL_CONTRACT: &str = "contrato";
/// Column holding the work modality.
pub const COL_MODALITY: &str = "modalidade";
/// Column holding the role title.
pub const COL_ROLE: &str = "cargo";
/// Column holding the ISO3 residence country code.
pub const COL_RESIDENCE: &str = "residencia_iso3";
/// Column holding the company size.
pub const COL_COMPANY_SIZE: &str = "porte_empresa";
/// Column holding the annual salary in USD.
pub const COL_SALARY: &str = "salario_usd";

/// All dataset columns in display order.
pub const COLUMNS: [&str; 8] = [
    COL_YEAR,
    COL_SENIORITY,
    COL_CONTRACT,
    COL_MODALITY,
    COL_ROLE,
    COL_RESIDENCE,
    COL_COMPANY_SIZE,
    COL_SALARY,
];

/// Seniority level, ordered by the canonical ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    /// Junior.
    Junior,
    /// Mid-level.
    Pleno,
    /// Senior.
    Senior,
    /// Executive.
    Executivo,
}

impl Seniority {
    /// All levels in canonical order.
    pub const ALL: [Self; 4] = [Self::Junior, Self::Pleno, Self::Senior, Self::Executivo];

    /// The value as written in the dataset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Pleno => "pleno",
            Self::Senior => "senior",
            Self::Executivo => "executivo",
        }
    }
}

impl FromStr for Seniority {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "junior" => Ok(Self::Junior),
            "pleno" => Ok(Self::Pleno),
            "senior" => Ok(Self::Senior),
            "executivo" => Ok(Self::Executivo),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company size, ordered by the canonical ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CompanySize {
    /// Small.
    #[serde(rename = "pequena")]
    Pequena,
    /// Medium.
    #[serde(rename = "média")]
    Media,
    /// Large.
    #[serde(rename = "grande")]
    Grande,
}

impl CompanySize {
    /// All sizes in canonical order.
    pub const ALL: [Self; 3] = [Self::Pequena, Self::Media, Self::Grande];

    /// The value as written in the dataset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pequena => "pequena",
            Self::Media => "média",
            Self::Grande => "grande",
        }
    }
}

impl FromStr for CompanySize {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "pequena" => Ok(Self::Pequena),
            "média" | "media" => Ok(Self::Media),
            "grande" => Ok(Self::Grande),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Reference year.
    pub year: i32,
    /// Seniority level.
    pub seniority: Seniority,
    /// Contract type (e.g. "integral").
    pub contract: String,
    /// Work modality (e.g. "remoto").
    pub modality: String,
    /// Role title.
    pub role: String,
    /// Residence country, ISO3 code.
    pub residence: String,
    /// Company size.
    pub company_size: CompanySize,
    /// Annual salary in USD.
    pub salary_usd: f64,
}

impl Record {
    /// Cell texts in [`COLUMNS`] order, for tabular display.
    #[must_use]
    pub fn cells(&self) -> [String; 8] {
        [
            self.year.to_string(),
            self.seniority.to_string(),
            self.contract.clone(),
            self.modality.clone(),
            self.role.clone(),
            self.residence.clone(),
            self.company_size.to_string(),
            format!("{}", self.salary_usd),
        ]
    }
}

/// The immutable base table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap an already decoded sequence of records.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid CSV, lacks
    /// a required column, or holds a null or unknown categorical value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(File::open(path)?)?;
        tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Decode CSV text held in memory.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dataset::load`].
    pub fn from_csv_str(csv: &str) -> Result<Self> {
        Self::from_reader(Cursor::new(csv.as_bytes()))
    }

    /// Decode CSV from any seekable reader.
    ///
    /// The reader is scanned twice: once for schema inference, once for data.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dataset::load`].
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let format = Format::default().with_header(true);
        let (schema, _) = format.infer_schema(&mut reader, None)?;
        for column in COLUMNS {
            if schema.column_with_name(column).is_none() {
                return Err(Error::MissingColumn(column));
            }
        }
        reader.rewind()?;

        let csv = ReaderBuilder::new(Arc::new(schema)).with_header(true).build(reader)?;

        let mut records = Vec::new();
        for batch in csv {
            decode_batch(&batch?, &mut records)?;
        }

        Ok(Self { records })
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Distinct seniority levels, canonical order.
    #[must_use]
    pub fn seniorities(&self) -> BTreeSet<Seniority> {
        self.records.iter().map(|r| r.seniority).collect()
    }

    /// Distinct contract types, sorted.
    #[must_use]
    pub fn contracts(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.contract.clone()).collect()
    }

    /// Distinct work modalities, sorted.
    #[must_use]
    pub fn modalities(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.modality.clone()).collect()
    }
}

fn column(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef> {
    let array = batch.column_by_name(name).ok_or(Error::MissingColumn(name))?;
    Ok(arrow_cast::cast(array, to)?)
}

fn check_valid(array: &dyn Array, column: &'static str, row: usize, base: usize) -> Result<()> {
    if array.is_null(row) {
        return Err(Error::NullValue { column, row: base + row });
    }
    Ok(())
}

fn decode_batch(batch: &RecordBatch, out: &mut Vec<Record>) -> Result<()> {
    let base = out.len();

    let years = column(batch, COL_YEAR, &DataType::Int32)?;
    let seniorities = column(batch, COL_SENIORITY, &DataType::Utf8)?;
    let contracts = column(batch, COL_CONTRACT, &DataType::Utf8)?;
    let modalities = column(batch, COL_MODALITY, &DataType::Utf8)?;
    let roles = column(batch, COL_ROLE, &DataType::Utf8)?;
    let residences = column(batch, COL_RESIDENCE, &DataType::Utf8)?;
    let sizes = column(batch, COL_COMPANY_SIZE, &DataType::Utf8)?;
    let salaries = column(batch, COL_SALARY, &DataType::Float64)?;

    let text_columns: [(&ArrayRef, &'static str); 6] = [
        (&seniorities, COL_SENIORITY),
        (&contracts, COL_CONTRACT),
        (&modalities, COL_MODALITY),
        (&roles, COL_ROLE),
        (&residences, COL_RESIDENCE),
        (&sizes, COL_COMPANY_SIZE),
    ];

    let year_values = years.as_primitive::<Int32Type>();
    let salary_values = salaries.as_primitive::<Float64Type>();
    let seniority_values = seniorities.as_string::<i32>();
    let contract_values = contracts.as_string::<i32>();
    let modality_values = modalities.as_string::<i32>();
    let role_values = roles.as_string::<i32>();
    let residence_values = residences.as_string::<i32>();
    let size_values = sizes.as_string::<i32>();

    out.reserve(batch.num_rows());
    for row in 0..batch.num_rows() {
        check_valid(year_values, COL_YEAR, row, base)?;
        check_valid(salary_values, COL_SALARY, row, base)?;
        for (array, name) in text_columns {
            check_valid(&**array, name, row, base)?;
        }

        let seniority_text = seniority_values.value(row);
        let seniority = seniority_text.parse().map_err(|()| Error::UnknownCategory {
            column: COL_SENIORITY,
            value: seniority_text.to_string(),
            row: base + row,
        })?;

        let size_text = size_values.value(row);
        let company_size = size_text.parse().map_err(|()| Error::UnknownCategory {
            column: COL_COMPANY_SIZE,
            value: size_text.to_string(),
            row: base + row,
        })?;

        out.push(Record {
            year: year_values.value(row),
            seniority,
            contract: contract_values.value(row).to_string(),
            modality: modality_values.value(row).to_string(),
            role: role_values.value(row).to_string(),
            residence: residence_values.value(row).to_string(),
            company_size,
            salary_usd: salary_values.value(row),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
ano,senioridade,contrato,modalidade,cargo,residencia_iso3,porte_empresa,salario_usd
2023,senior,integral,remoto,Data Scientist,USA,grande,180000
2024,junior,integral,presencial,Data Analyst,BRA,pequena,25000
2022,pleno,contrato,hibrido,Data Engineer,DEU,média,95000
";

    #[test]
    fn test_parse_sample() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = &dataset.records()[0];
        assert_eq!(first.year, 2023);
        assert_eq!(first.seniority, Seniority::Senior);
        assert_eq!(first.role, "Data Scientist");
        assert_eq!(first.company_size, CompanySize::Grande);
        assert!((first.salary_usd - 180_000.0).abs() < f64::EPSILON);

        assert_eq!(dataset.records()[2].company_size, CompanySize::Media);
    }

    #[test]
    fn test_distinct_values_sorted() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.years().into_iter().collect::<Vec<_>>(), vec![2022, 2023, 2024]);
        assert_eq!(
            dataset.seniorities().into_iter().collect::<Vec<_>>(),
            vec![Seniority::Junior, Seniority::Pleno, Seniority::Senior]
        );
        assert_eq!(
            dataset.modalities().into_iter().collect::<Vec<_>>(),
            vec!["hibrido", "presencial", "remoto"]
        );
    }

    #[test]
    fn test_extra_columns_and_order_ignored() {
        let csv = "\
salario_usd,cargo,extra,ano,senioridade,contrato,modalidade,residencia_iso3,porte_empresa
50000.5,ML Engineer,x,2021,executivo,freelancer,remoto,CAN,grande
";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.role, "ML Engineer");
        assert_eq!(record.seniority, Seniority::Executivo);
        assert!((record.salary_usd - 50_000.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_column() {
        let csv = "ano,senioridade\n2023,senior\n";
        let err = Dataset::from_csv_str(csv).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }

    #[test]
    fn test_unknown_seniority() {
        let csv = "\
ano,senioridade,contrato,modalidade,cargo,residencia_iso3,porte_empresa,salario_usd
2023,estagiario,integral,remoto,Data Scientist,USA,grande,1000
";
        let err = Dataset::from_csv_str(csv).unwrap_err();
        match err {
            Error::UnknownCategory { column, value, row } => {
                assert_eq!(column, COL_SENIORITY);
                assert_eq!(value, "estagiario");
                assert_eq!(row, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let csv = "ano,senioridade,contrato,modalidade,cargo,residencia_iso3,porte_empresa,salario_usd\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load("/nonexistent/df_final.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_record_cells() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let cells = dataset.records()[2].cells();
        assert_eq!(cells[0], "2022");
        assert_eq!(cells[6], "média");
        assert_eq!(cells[7], "95000");
    }

    #[test]
    fn test_canonical_orderings() {
        assert!(Seniority::Junior < Seniority::Pleno);
        assert!(Seniority::Senior < Seniority::Executivo);
        assert!(CompanySize::Pequena < CompanySize::Media);
        assert!(CompanySize::Media < CompanySize::Grande);
    }
}
