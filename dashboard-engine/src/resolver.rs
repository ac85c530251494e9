//! FILENAME: dashboard-engine/src/resolver.rs
//! View Resolver - pure lookups that turn the aggregation index into
//! renderable rows.
//!
//! Every function here is stateless: identical inputs yield identical
//! outputs and nothing in the index is mutated. The country-filterable
//! views resolve the optional filter to a label id once and then run a
//! single lookup path whose only difference is the table consulted, so the
//! filtered and unfiltered cases return identically shaped rows.

use crate::error::QueryError;
use crate::index::{AggregationIndex, LabelId, Metrics};
use crate::selection::Selection;
use crate::view::{
    CategoryRow, CountrySales, DashboardSnapshot, KpiSummary, KpiTile, MonthlySales, ProductPoint,
    TitledSeries,
};
use orders::Month;
use std::cmp::Ordering;

/// The per-year KPI scalars shown as dashboard tiles.
pub fn kpis(index: &AggregationIndex, year: i32) -> Result<KpiSummary, QueryError> {
    let stats = index
        .year_stats
        .get(&year)
        .ok_or(QueryError::UnknownYear(year))?;

    let profit_ratio = if stats.totals.sales != 0.0 {
        Some(stats.totals.profit / stats.totals.sales)
    } else {
        None
    };
    let profit_per_customer = if stats.customer_count > 0 {
        Some(stats.totals.profit / stats.customer_count as f64)
    } else {
        None
    };

    Ok(KpiSummary {
        year,
        order_count: stats.order_count,
        sales: stats.totals.sales,
        profit: stats.totals.profit,
        profit_ratio,
        profit_per_customer,
        biggest_order: stats.biggest_order,
    })
}

/// Sales per country for the year, ascending by sales.
/// Ties are broken by country name so the output is deterministic.
pub fn country_bars(index: &AggregationIndex, year: i32) -> Result<Vec<CountrySales>, QueryError> {
    ensure_year(index, year)?;

    let mut bars: Vec<CountrySales> = index
        .countries_by_year
        .get(&year)
        .into_iter()
        .flatten()
        .filter_map(|&id| {
            let country = index.countries.get(id)?;
            let metrics = index.by_country.get(&(year, id))?;
            Some(CountrySales {
                country: country.to_string(),
                sales: metrics.sales,
            })
        })
        .collect();

    bars.sort_by(|a, b| {
        a.sales
            .partial_cmp(&b.sales)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });
    Ok(bars)
}

/// Sales and profit per product for the year, restricted to `country` when
/// present, else aggregated across all countries. Sorted by product name.
pub fn product_scatter(
    index: &AggregationIndex,
    year: i32,
    country: Option<&str>,
) -> Result<Vec<ProductPoint>, QueryError> {
    ensure_year(index, year)?;
    let filter = resolve_country(index, year, country)?;

    let mut points: Vec<ProductPoint> = index
        .products_by_year
        .get(&year)
        .into_iter()
        .flatten()
        .filter_map(|&id| {
            let metrics = match filter {
                Some(c) => index.by_country_product.get(&(year, c, id)).copied(),
                None => index.by_product.get(&(year, id)).copied(),
            }?;
            Some(ProductPoint {
                product: index.products.get(id)?.to_string(),
                sales: metrics.sales,
                profit: metrics.profit,
            })
        })
        .collect();

    points.sort_by(|a, b| a.product.cmp(&b.product));
    Ok(points)
}

/// Monthly sales for the year in calendar order. Always exactly twelve
/// entries; months without orders carry zero rather than being omitted.
pub fn monthly_series(
    index: &AggregationIndex,
    year: i32,
    country: Option<&str>,
) -> Result<Vec<MonthlySales>, QueryError> {
    ensure_year(index, year)?;
    let filter = resolve_country(index, year, country)?;

    Ok(Month::ALL
        .iter()
        .map(|&month| {
            let metrics: Option<&Metrics> = match filter {
                Some(c) => index.by_country_month.get(&(year, c, month)),
                None => index.by_month.get(&(year, month)),
            };
            MonthlySales {
                month,
                sales: metrics.map_or(0.0, |m| m.sales),
            }
        })
        .collect())
}

/// The category/sub-category breakdown for the year, ordered by
/// (category, sub-category).
pub fn category_table(
    index: &AggregationIndex,
    year: i32,
    country: Option<&str>,
) -> Result<Vec<CategoryRow>, QueryError> {
    ensure_year(index, year)?;
    let filter = resolve_country(index, year, country)?;

    let mut rows: Vec<CategoryRow> = index
        .category_pairs_by_year
        .get(&year)
        .into_iter()
        .flatten()
        .filter_map(|&(category, sub_category)| {
            let metrics = match filter {
                Some(c) => index
                    .by_country_category
                    .get(&(year, c, category, sub_category))
                    .copied(),
                None => index.by_category.get(&(year, category, sub_category)).copied(),
            }?;
            Some(CategoryRow {
                category: index.categories.get(category)?.to_string(),
                sub_category: index.sub_categories.get(sub_category)?.to_string(),
                sales: metrics.sales,
                profit: metrics.profit,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.sub_category.cmp(&b.sub_category))
    });
    Ok(rows)
}

/// Resolves everything the dashboard shows for one selection: header title,
/// formatted KPI tiles and the four titled series.
pub fn resolve_dashboard(
    index: &AggregationIndex,
    selection: &Selection,
) -> Result<DashboardSnapshot, QueryError> {
    let year = selection.year();
    let country = selection.country();

    let kpi = kpis(index, year)?;
    let tiles = KpiTile::from_summary(&kpi);

    Ok(DashboardSnapshot {
        title: format!("Superstore Sales Dashboard - {}", year),
        kpis: kpi,
        tiles,
        // the country chart is never filtered; it is where the filter comes from
        country_chart: TitledSeries {
            title: chart_title("Sales per Country", None),
            rows: country_bars(index, year)?,
        },
        product_chart: TitledSeries {
            title: chart_title("Product Sales vs Profit", country),
            rows: product_scatter(index, year, country)?,
        },
        monthly_chart: TitledSeries {
            title: chart_title("Monthly Sales", country),
            rows: monthly_series(index, year, country)?,
        },
        category_table: TitledSeries {
            title: chart_title("Sales per Category", country),
            rows: category_table(index, year, country)?,
        },
    })
}

fn ensure_year(index: &AggregationIndex, year: i32) -> Result<(), QueryError> {
    if index.contains_year(year) {
        Ok(())
    } else {
        Err(QueryError::UnknownYear(year))
    }
}

/// Resolves the optional country filter against the selected year.
fn resolve_country(
    index: &AggregationIndex,
    year: i32,
    country: Option<&str>,
) -> Result<Option<LabelId>, QueryError> {
    match country {
        None => Ok(None),
        Some(name) => index
            .country_in_year(year, name)
            .map(Some)
            .ok_or_else(|| QueryError::UnknownCountry {
                year,
                country: name.to_string(),
            }),
    }
}

fn chart_title(base: &str, country: Option<&str>) -> String {
    match country {
        Some(c) => format!("{} | Selected: {}", base, c),
        None => base.to_string(),
    }
}
