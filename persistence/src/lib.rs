//! FILENAME: persistence/src/lib.rs
//! Superstore Persistence Module
//!
//! Handles the one-time load of the source order spreadsheet. The data set
//! is read once at startup; there is no write path.

mod error;
mod xlsx_reader;

pub use error::LoadError;
pub use xlsx_reader::{load_orders, load_orders_from_sheet};

use orders::OrderStore;
use serde::{Deserialize, Serialize};

/// Counters describing a completed load.
///
/// Rows with an unparseable date or numeric field are excluded rather than
/// failing the load; `skipped` records how many were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Data rows encountered below the header (blank rows excluded).
    pub total_rows: usize,
    /// Rows normalized into order records.
    pub loaded: usize,
    /// Malformed rows excluded from the store.
    pub skipped: usize,
}

/// The result of loading the source spreadsheet.
#[derive(Debug, Clone)]
pub struct LoadedOrders {
    pub store: OrderStore,
    pub stats: LoadStats,
}
