//! Aggregation Index - the precomputed representation behind every view.
//!
//! The index is designed for:
//! - One fast build from the order store (O(n) where n = rows)
//! - Bounded-time lookups afterwards; nothing is recomputed per interaction
//! - Memory-efficient storage via label interning
//!
//! Architecture:
//! - Each unique dimension label (country, product, category, sub-category)
//!   is stored once and referenced by a `LabelId`
//! - One group-and-sum table per key combination the dashboard needs, keyed
//!   by fixed-arity tuples of year, label ids and months
//! - Distinct-count scalars (orders, customers, biggest order per year) are
//!   folded into `YearStats` during the build and the scratch state dropped
//!
//! The index is immutable after `build`; every query takes `&self`.

use orders::{Month, OrderStore};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A reference to an interned label within a dimension's store.
/// Using u32 to save memory in the aggregate keys.
pub type LabelId = u32;

// ============================================================================
// LABEL INTERNING
// ============================================================================

/// Interned store for one dimension's labels.
/// Stores each unique label once and provides O(1) lookup by `LabelId`.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    /// Map from label to its unique ID (for deduplication during build).
    value_to_id: FxHashMap<String, LabelId>,

    /// Ordered list of unique labels (indexed by LabelId).
    id_to_value: Vec<String>,
}

impl LabelSet {
    /// Interns a label and returns its id.
    /// If the label already exists, returns the existing id.
    fn intern(&mut self, value: &str) -> LabelId {
        if let Some(&id) = self.value_to_id.get(value) {
            return id;
        }
        let id = self.id_to_value.len() as LabelId;
        self.id_to_value.push(value.to_string());
        self.value_to_id.insert(value.to_string(), id);
        id
    }

    /// Gets the label for a given id.
    pub fn get(&self, id: LabelId) -> Option<&str> {
        self.id_to_value.get(id as usize).map(String::as_str)
    }

    /// Looks up the id of a label, if it was ever interned.
    pub fn id_of(&self, value: &str) -> Option<LabelId> {
        self.value_to_id.get(value).copied()
    }

    /// Returns the number of unique labels.
    pub fn len(&self) -> usize {
        self.id_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_value.is_empty()
    }
}

// ============================================================================
// AGGREGATES
// ============================================================================

/// Summed metrics for one group of order lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub sales: f64,
    pub profit: f64,
}

impl Metrics {
    fn add(&mut self, sales: f64, profit: f64) {
        self.sales += sales;
        self.profit += profit;
    }
}

/// Per-year scalar aggregates behind the KPI tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    /// Distinct order ids seen in the year.
    pub order_count: u64,

    /// Distinct customer ids seen in the year.
    pub customer_count: u64,

    /// Sales and profit summed over every order line of the year.
    pub totals: Metrics,

    /// Largest summed sales of a single order id.
    pub biggest_order: f64,
}

/// Statistics about the build for logging and diagnostics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub records: usize,
    pub years: usize,
    pub countries: usize,
    pub products: usize,
    /// Total number of aggregate groups across all tables.
    pub groups: usize,
    pub build_time_ms: u64,
}

// ============================================================================
// MAIN INDEX STRUCT
// ============================================================================

/// Precomputed group-and-sum tables for every key combination the dashboard
/// queries, plus the per-year scalars.
#[derive(Debug, Clone, Default)]
pub struct AggregationIndex {
    /// Distinct order years, ascending.
    years: Vec<i32>,

    pub(crate) countries: LabelSet,
    pub(crate) products: LabelSet,
    pub(crate) categories: LabelSet,
    pub(crate) sub_categories: LabelSet,

    pub(crate) year_stats: FxHashMap<i32, YearStats>,

    pub(crate) by_country: FxHashMap<(i32, LabelId), Metrics>,
    pub(crate) by_product: FxHashMap<(i32, LabelId), Metrics>,
    pub(crate) by_country_product: FxHashMap<(i32, LabelId, LabelId), Metrics>,
    pub(crate) by_month: FxHashMap<(i32, Month), Metrics>,
    pub(crate) by_country_month: FxHashMap<(i32, LabelId, Month), Metrics>,
    pub(crate) by_category: FxHashMap<(i32, LabelId, LabelId), Metrics>,
    pub(crate) by_country_category: FxHashMap<(i32, LabelId, LabelId, LabelId), Metrics>,

    /// Dimension membership per year, used for iteration and filter checks.
    pub(crate) countries_by_year: FxHashMap<i32, FxHashSet<LabelId>>,
    pub(crate) products_by_year: FxHashMap<i32, FxHashSet<LabelId>>,
    pub(crate) category_pairs_by_year: FxHashMap<i32, FxHashSet<(LabelId, LabelId)>>,

    stats: IndexStats,
}

impl AggregationIndex {
    /// Builds every aggregate table in a single pass over the store.
    /// Pure and deterministic; run once at startup.
    pub fn build(store: &OrderStore) -> Self {
        let started = Instant::now();
        let mut index = AggregationIndex::default();

        // Scratch state for the distinct-count scalars; dropped after the build.
        let mut order_ids = LabelSet::default();
        let mut customer_ids = LabelSet::default();
        let mut orders_per_year: FxHashMap<i32, FxHashSet<LabelId>> = FxHashMap::default();
        let mut customers_per_year: FxHashMap<i32, FxHashSet<LabelId>> = FxHashMap::default();
        let mut sales_per_order: FxHashMap<(i32, LabelId), f64> = FxHashMap::default();

        for record in store.iter() {
            let year = record.year;
            let country = index.countries.intern(&record.country);
            let product = index.products.intern(&record.product);
            let category = index.categories.intern(&record.category);
            let sub_category = index.sub_categories.intern(&record.sub_category);
            let (sales, profit) = (record.sales, record.profit);

            index
                .year_stats
                .entry(year)
                .or_default()
                .totals
                .add(sales, profit);

            index
                .by_country
                .entry((year, country))
                .or_default()
                .add(sales, profit);
            index
                .by_product
                .entry((year, product))
                .or_default()
                .add(sales, profit);
            index
                .by_country_product
                .entry((year, country, product))
                .or_default()
                .add(sales, profit);
            index
                .by_month
                .entry((year, record.month))
                .or_default()
                .add(sales, profit);
            index
                .by_country_month
                .entry((year, country, record.month))
                .or_default()
                .add(sales, profit);
            index
                .by_category
                .entry((year, category, sub_category))
                .or_default()
                .add(sales, profit);
            index
                .by_country_category
                .entry((year, country, category, sub_category))
                .or_default()
                .add(sales, profit);

            index
                .countries_by_year
                .entry(year)
                .or_default()
                .insert(country);
            index
                .products_by_year
                .entry(year)
                .or_default()
                .insert(product);
            index
                .category_pairs_by_year
                .entry(year)
                .or_default()
                .insert((category, sub_category));

            let order = order_ids.intern(&record.order_id);
            let customer = customer_ids.intern(&record.customer_id);
            orders_per_year.entry(year).or_default().insert(order);
            customers_per_year.entry(year).or_default().insert(customer);
            *sales_per_order.entry((year, order)).or_insert(0.0) += sales;
        }

        // Fold the scratch state into the per-year scalars.
        for (&(year, _), &order_sales) in &sales_per_order {
            if let Some(stats) = index.year_stats.get_mut(&year) {
                if order_sales > stats.biggest_order {
                    stats.biggest_order = order_sales;
                }
            }
        }
        for (year, orders) in &orders_per_year {
            if let Some(stats) = index.year_stats.get_mut(year) {
                stats.order_count = orders.len() as u64;
            }
        }
        for (year, customers) in &customers_per_year {
            if let Some(stats) = index.year_stats.get_mut(year) {
                stats.customer_count = customers.len() as u64;
            }
        }

        index.years = index.year_stats.keys().copied().collect();
        index.years.sort_unstable();

        index.stats = IndexStats {
            records: store.len(),
            years: index.years.len(),
            countries: index.countries.len(),
            products: index.products.len(),
            groups: index.by_country.len()
                + index.by_product.len()
                + index.by_country_product.len()
                + index.by_month.len()
                + index.by_country_month.len()
                + index.by_category.len()
                + index.by_country_category.len(),
            build_time_ms: started.elapsed().as_millis() as u64,
        };

        log::debug!(
            "aggregation index built: {} records, {} years, {} groups in {} ms",
            index.stats.records,
            index.stats.years,
            index.stats.groups,
            index.stats.build_time_ms
        );

        index
    }

    /// Distinct order years, ascending. Drives the year selector.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// The most recent year in the data, used as the default selection.
    pub fn latest_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.year_stats.contains_key(&year)
    }

    /// Countries with orders in `year`, sorted by name.
    pub fn countries_in(&self, year: i32) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .countries_by_year
            .get(&year)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.countries.get(id))
            .collect();
        names.sort_unstable();
        names
    }

    /// Resolves a country name against a year, returning its id only when
    /// the country actually has orders in that year.
    pub(crate) fn country_in_year(&self, year: i32, name: &str) -> Option<LabelId> {
        let id = self.countries.id_of(name)?;
        self.countries_by_year
            .get(&year)?
            .contains(&id)
            .then_some(id)
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn record_count(&self) -> usize {
        self.stats.records
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
