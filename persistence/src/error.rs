//! FILENAME: persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet read error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}
