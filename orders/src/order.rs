//! FILENAME: orders/src/order.rs
//! PURPOSE: Defines the fundamental data structures for a single order line.
//! CONTEXT: This file contains the `OrderRecord` struct and the read-only
//! `OrderStore`. Records are normalized at load time (year and month derived
//! from the order date, numerics parsed); after that nothing mutates them.

use crate::month::Month;
use serde::{Deserialize, Serialize};

/// One order line from the source sheet, normalized at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    /// Calendar year derived from the order date.
    pub year: i32,
    /// Calendar month derived from the order date.
    pub month: Month,
    pub country: String,
    pub product: String,
    pub category: String,
    pub sub_category: String,
    pub customer_id: String,
    pub sales: f64,
    pub profit: f64,
}

/// The loaded order rows. Read-only after construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStore {
    records: Vec<OrderRecord>,
}

impl OrderStore {
    pub fn new(records: Vec<OrderRecord>) -> Self {
        OrderStore { records }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct order years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
