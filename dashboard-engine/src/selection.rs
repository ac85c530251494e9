//! FILENAME: dashboard-engine/src/selection.rs
//! Selection State - the serializable user intent driving every view.
//!
//! A selection is a required year plus an optional country filter derived
//! from the last chart interaction. It is replaced wholesale on every
//! transition and never partially mutated; every transition validates
//! against the index so an invalid interaction leaves the previous
//! selection untouched.

use crate::error::QueryError;
use crate::index::AggregationIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    year: i32,
    country: Option<String>,
}

impl Selection {
    /// The startup selection: the most recent year in the data, no country.
    pub fn initial(index: &AggregationIndex) -> Result<Self, QueryError> {
        let year = index.latest_year().ok_or(QueryError::EmptyIndex)?;
        Ok(Selection {
            year,
            country: None,
        })
    }

    /// A year-only selection, validated against the index.
    pub fn for_year(index: &AggregationIndex, year: i32) -> Result<Self, QueryError> {
        if !index.contains_year(year) {
            return Err(QueryError::UnknownYear(year));
        }
        Ok(Selection {
            year,
            country: None,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Selecting a year resets to a year-only selection, clearing any
    /// active country filter.
    pub fn select_year(&self, index: &AggregationIndex, year: i32) -> Result<Self, QueryError> {
        Selection::for_year(index, year)
    }

    /// Clicking a country bar narrows every other view to that country.
    /// The filter is sticky: no interaction other than re-selecting a year
    /// clears it.
    pub fn select_country(
        &self,
        index: &AggregationIndex,
        country: &str,
    ) -> Result<Self, QueryError> {
        if index.country_in_year(self.year, country).is_none() {
            return Err(QueryError::UnknownCountry {
                year: self.year,
                country: country.to_string(),
            });
        }
        Ok(Selection {
            year: self.year,
            country: Some(country.to_string()),
        })
    }
}
