//! Filter state and filter engine.
//!
//! A [`FilterSelection`] holds one accepted-value set per filterable
//! [`Dimension`]. [`apply`] keeps the records whose value in every dimension
//! belongs to the matching set, preserving dataset order.
//!
//! Selections are values: changing one produces a new selection
//! ([`FilterSelection::toggled`], [`FilterSelection::with_values`]) that
//! replaces the old one wholesale between render passes.

use crate::dataset::{Dataset, Record, Seniority};
use std::collections::BTreeSet;
use std::fmt;

/// A filterable dimension of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// Reference year.
    Year,
    /// Seniority level.
    Seniority,
    /// Contract type.
    Contract,
    /// Work modality.
    Modality,
}

impl Dimension {
    /// All dimensions in sidebar order.
    pub const ALL: [Self; 4] = [Self::Year, Self::Seniority, Self::Contract, Self::Modality];

    /// Selector caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "Ano",
            Self::Seniority => "Experiência",
            Self::Contract => "Contrato de trabalho",
            Self::Modality => "Tipo de trabalho",
        }
    }
}

/// A selectable value of some dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterValue {
    /// A year.
    Year(i32),
    /// A seniority level.
    Seniority(Seniority),
    /// A free-text category (contract type, modality).
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Seniority(level) => write!(f, "{level}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Accepted values per filterable dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    /// Accepted years.
    pub years: BTreeSet<i32>,
    /// Accepted seniority levels.
    pub seniorities: BTreeSet<Seniority>,
    /// Accepted contract types.
    pub contracts: BTreeSet<String>,
    /// Accepted work modalities.
    pub modalities: BTreeSet<String>,
}

impl FilterSelection {
    /// The default selection: every distinct value observed in the dataset.
    #[must_use]
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            years: dataset.years(),
            seniorities: dataset.seniorities(),
            contracts: dataset.contracts(),
            modalities: dataset.modalities(),
        }
    }

    /// Whether the record passes every dimension.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contracts.contains(&record.contract)
            && self.modalities.contains(&record.modality)
    }

    /// Whether `value` is accepted along `dimension`.
    ///
    /// A value of the wrong kind for the dimension is never accepted.
    #[must_use]
    pub fn contains(&self, dimension: Dimension, value: &FilterValue) -> bool {
        match (dimension, value) {
            (Dimension::Year, FilterValue::Year(year)) => self.years.contains(year),
            (Dimension::Seniority, FilterValue::Seniority(level)) => {
                self.seniorities.contains(level)
            }
            (Dimension::Contract, FilterValue::Text(text)) => self.contracts.contains(text),
            (Dimension::Modality, FilterValue::Text(text)) => self.modalities.contains(text),
            _ => false,
        }
    }

    /// Accepted values along `dimension`, sorted.
    #[must_use]
    pub fn values(&self, dimension: Dimension) -> Vec<FilterValue> {
        match dimension {
            Dimension::Year => self.years.iter().copied().map(FilterValue::Year).collect(),
            Dimension::Seniority => {
                self.seniorities.iter().copied().map(FilterValue::Seniority).collect()
            }
            Dimension::Contract => self.contracts.iter().cloned().map(FilterValue::Text).collect(),
            Dimension::Modality => self.modalities.iter().cloned().map(FilterValue::Text).collect(),
        }
    }

    /// Whether some dimension accepts nothing (the view is then empty).
    #[must_use]
    pub fn has_empty_dimension(&self) -> bool {
        self.years.is_empty()
            || self.seniorities.is_empty()
            || self.contracts.is_empty()
            || self.modalities.is_empty()
    }

    /// A new selection with `value` flipped along `dimension`.
    ///
    /// Values of the wrong kind for the dimension leave the selection as is.
    #[must_use]
    pub fn toggled(&self, dimension: Dimension, value: &FilterValue) -> Self {
        let mut next = self.clone();
        match (dimension, value) {
            (Dimension::Year, FilterValue::Year(year)) => flip(&mut next.years, *year),
            (Dimension::Seniority, FilterValue::Seniority(level)) => {
                flip(&mut next.seniorities, *level);
            }
            (Dimension::Contract, FilterValue::Text(text)) => {
                flip(&mut next.contracts, text.clone());
            }
            (Dimension::Modality, FilterValue::Text(text)) => {
                flip(&mut next.modalities, text.clone());
            }
            _ => {}
        }
        next
    }

    /// A new selection whose `dimension` set is replaced by `values`.
    ///
    /// Values of the wrong kind for the dimension are dropped.
    #[must_use]
    pub fn with_values<I>(&self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = FilterValue>,
    {
        let mut next = self.clone();
        let values = values.into_iter();
        match dimension {
            Dimension::Year => {
                next.years = values
                    .filter_map(|v| match v {
                        FilterValue::Year(year) => Some(year),
                        _ => None,
                    })
                    .collect();
            }
            Dimension::Seniority => {
                next.seniorities = values
                    .filter_map(|v| match v {
                        FilterValue::Seniority(level) => Some(level),
                        _ => None,
                    })
                    .collect();
            }
            Dimension::Contract | Dimension::Modality => {
                let texts: BTreeSet<String> = values
                    .filter_map(|v| match v {
                        FilterValue::Text(text) => Some(text),
                        _ => None,
                    })
                    .collect();
                if dimension == Dimension::Contract {
                    next.contracts = texts;
                } else {
                    next.modalities = texts;
                }
            }
        }
        next
    }
}

fn flip<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Every selectable value per dimension, taken from the dataset.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    options: [Vec<FilterValue>; 4],
}

impl FilterOptions {
    /// Collect the sorted distinct values of each dimension.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let all = FilterSelection::all(dataset);
        Self { options: Dimension::ALL.map(|d| all.values(d)) }
    }

    /// Options along `dimension`.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> &[FilterValue] {
        &self.options[dimension as usize]
    }
}

/// The records of a dataset that pass a filter selection.
///
/// Borrowed from the dataset; dataset order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// Build a view over explicit records.
    #[must_use]
    pub fn from_records(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    /// Number of records in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in dataset order.
    #[must_use]
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    /// Iterate over the records.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    /// A narrower view keeping records that satisfy `predicate`.
    #[must_use]
    pub fn restrict(&self, predicate: impl Fn(&Record) -> bool) -> Self {
        Self { records: self.iter().filter(|r| predicate(r)).collect() }
    }
}

/// Derive the filtered view of `dataset` under `selection`.
#[must_use]
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    if selection.has_empty_dimension() {
        return FilteredView::from_records(Vec::new());
    }
    FilteredView {
        records: dataset.records().iter().filter(|r| selection.matches(r)).collect(),
    }
}
