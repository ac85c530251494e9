//! FILENAME: dashboard-engine/src/error.rs

use thiserror::Error;

/// Recoverable lookup failures. The presentation layer reacts by ignoring
/// the interaction or keeping the previous selection; nothing here is fatal
/// once the index is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("year {0} is not present in the loaded data")]
    UnknownYear(i32),

    #[error("country '{country}' has no orders in {year}")]
    UnknownCountry { year: i32, country: String },

    #[error("the loaded data set contains no orders")]
    EmptyIndex,
}
