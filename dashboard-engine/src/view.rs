//! FILENAME: dashboard-engine/src/view.rs
//! Renderable output for the presentation layer.
//!
//! These are plain structured records, never chart-library objects: the
//! frontend decides how to draw bars, scatter points, lines and tables and
//! feeds selection changes back into the core.

use crate::format;
use orders::Month;
use serde::{Deserialize, Serialize};

/// The per-year KPI scalars.
///
/// `profit_ratio` and `profit_per_customer` are `None` when their
/// denominator is zero for the year; the tile formatter renders that as
/// "n/a" rather than infinity or NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub year: i32,
    pub order_count: u64,
    pub sales: f64,
    pub profit: f64,
    pub profit_ratio: Option<f64>,
    pub profit_per_customer: Option<f64>,
    pub biggest_order: f64,
}

/// One bar of the sales-per-country chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySales {
    pub country: String,
    pub sales: f64,
}

/// One point of the product sales/profit scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPoint {
    pub product: String,
    pub sales: f64,
    pub profit: f64,
}

/// One entry of the monthly sales line; the series always carries all
/// twelve months in calendar order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: Month,
    pub sales: f64,
}

/// One row of the category breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub sub_category: String,
    pub sales: f64,
    pub profit: f64,
}

/// A formatted KPI tile: header label plus display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiTile {
    pub label: String,
    pub value: String,
}

impl KpiTile {
    fn new(label: &str, value: String) -> Self {
        KpiTile {
            label: label.to_string(),
            value,
        }
    }

    /// Builds the six dashboard tiles from the raw KPI scalars.
    pub fn from_summary(kpi: &KpiSummary) -> Vec<KpiTile> {
        let not_available = || format::NOT_AVAILABLE.to_string();
        vec![
            KpiTile::new("Order Quantity", format::format_count(kpi.order_count)),
            KpiTile::new("Sales", format::format_currency(kpi.sales)),
            KpiTile::new("Profit", format::format_currency(kpi.profit)),
            KpiTile::new(
                "Profit Ratio",
                kpi.profit_ratio
                    .map(format::format_percent)
                    .unwrap_or_else(not_available),
            ),
            KpiTile::new(
                "Profit per Customer",
                kpi.profit_per_customer
                    .map(format::format_currency)
                    .unwrap_or_else(not_available),
            ),
            KpiTile::new("Biggest Order", format::format_currency(kpi.biggest_order)),
        ]
    }
}

/// A chart/table payload together with its display title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitledSeries<T> {
    pub title: String,
    pub rows: Vec<T>,
}

/// Everything the dashboard shows for one selection, resolved in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// The page header, e.g. "Superstore Sales Dashboard - 2018".
    pub title: String,
    pub kpis: KpiSummary,
    pub tiles: Vec<KpiTile>,
    pub country_chart: TitledSeries<CountrySales>,
    pub product_chart: TitledSeries<ProductPoint>,
    pub monthly_chart: TitledSeries<MonthlySales>,
    pub category_table: TitledSeries<CategoryRow>,
}
