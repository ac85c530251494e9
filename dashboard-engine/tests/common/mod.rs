//! FILENAME: tests/common/mod.rs
//! Shared fixture for the dashboard integration tests.

use dashboard_engine::AggregationIndex;
use orders::{Month, OrderRecord, OrderStore};

/// Builds a single order record; the fixture data keeps amounts small and
/// decimal-friendly so expected sums can be written down exactly.
pub fn record(
    order_id: &str,
    year: i32,
    month: Month,
    country: &str,
    product: &str,
    category: &str,
    sub_category: &str,
    customer_id: &str,
    sales: f64,
    profit: f64,
) -> OrderRecord {
    OrderRecord {
        order_id: order_id.to_string(),
        year,
        month,
        country: country.to_string(),
        product: product.to_string(),
        category: category.to_string(),
        sub_category: sub_category.to_string(),
        customer_id: customer_id.to_string(),
        sales,
        profit,
    }
}

/// Three years of orders.
///
/// 2018 totals: sales 770, profit 47, 4 distinct orders, 3 distinct
/// customers, biggest order O-3 at 300. Per country: Germany 270, France
/// 500. 2017: Germany 80, Spain 60. 2016 carries a single zero-sales order
/// so derived ratios are undefined.
pub struct SuperstoreFixture;

impl SuperstoreFixture {
    pub fn orders() -> Vec<OrderRecord> {
        vec![
            // O-1 spans two lines: distinct order counting must not double it
            record("O-1", 2018, Month::Jan, "Germany", "Table", "Furniture", "Tables", "C-1", 100.0, 20.0),
            record("O-1", 2018, Month::Jan, "Germany", "Chair", "Furniture", "Chairs", "C-1", 50.0, 5.0),
            record("O-2", 2018, Month::Feb, "France", "Table", "Furniture", "Tables", "C-2", 200.0, 40.0),
            record("O-3", 2018, Month::Mar, "France", "Phone", "Technology", "Phones", "C-1", 300.0, -30.0),
            record("O-4", 2018, Month::Nov, "Germany", "Phone", "Technology", "Phones", "C-3", 120.0, 12.0),
            record("O-5", 2017, Month::Jun, "Germany", "Table", "Furniture", "Tables", "C-1", 80.0, 8.0),
            record("O-6", 2017, Month::Jul, "Spain", "Binder", "Office Supplies", "Binders", "C-4", 60.0, 6.0),
            record("O-7", 2016, Month::Apr, "Italy", "Flyer", "Office Supplies", "Paper", "C-5", 0.0, 0.0),
        ]
    }

    pub fn store() -> OrderStore {
        OrderStore::new(Self::orders())
    }

    pub fn index() -> AggregationIndex {
        AggregationIndex::build(&Self::store())
    }
}

/// Assert two floats are equal to within rounding noise.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
