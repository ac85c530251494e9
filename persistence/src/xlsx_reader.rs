// FILENAME: persistence/src/xlsx_reader.rs

use crate::{LoadError, LoadStats, LoadedOrders};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Datelike, Duration, NaiveDate};
use orders::{Month, OrderRecord, OrderStore};
use std::path::Path;

/// Required column headers, matched case-sensitively against the first row.
const COL_ORDER_ID: &str = "Order ID";
const COL_ORDER_DATE: &str = "Order Date";
const COL_COUNTRY: &str = "Country";
const COL_PRODUCT: &str = "Product Name";
const COL_CATEGORY: &str = "Category";
const COL_SUB_CATEGORY: &str = "Sub-Category";
const COL_CUSTOMER_ID: &str = "Customer ID";
const COL_SALES: &str = "Sales";
const COL_PROFIT: &str = "Profit";

/// Loads order records from the first sheet of an XLS/XLSX workbook.
pub fn load_orders(path: &Path) -> Result<LoadedOrders, LoadError> {
    load_impl(path, None)
}

/// Loads order records from a named sheet (e.g. "Orders").
pub fn load_orders_from_sheet(path: &Path, sheet: &str) -> Result<LoadedOrders, LoadError> {
    load_impl(path, Some(sheet))
}

fn load_impl(path: &Path, sheet: Option<&str>) -> Result<LoadedOrders, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();

    if sheet_names.is_empty() {
        return Err(LoadError::InvalidFormat(
            "workbook contains no sheets".to_string(),
        ));
    }

    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(LoadError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => sheet_names[0].clone(),
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let header = rows
        .next()
        .ok_or_else(|| LoadError::InvalidFormat(format!("sheet '{}' is empty", sheet_name)))?;
    let columns = ColumnMap::detect(header)?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for (i, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue; // trailing blank rows are not data
        }

        stats.total_rows += 1;
        match parse_row(row, &columns) {
            Some(record) => records.push(record),
            None => {
                stats.skipped += 1;
                // +2: 1-based display plus the header row
                log::warn!("skipping malformed row {} in sheet '{}'", i + 2, sheet_name);
            }
        }
    }

    stats.loaded = records.len();
    log::info!(
        "loaded {} order records from {:?} ({} skipped)",
        stats.loaded,
        path,
        stats.skipped
    );

    Ok(LoadedOrders {
        store: OrderStore::new(records),
        stats,
    })
}

/// Resolved 0-based column index for every required header.
struct ColumnMap {
    order_id: usize,
    order_date: usize,
    country: usize,
    product: usize,
    category: usize,
    sub_category: usize,
    customer_id: usize,
    sales: usize,
    profit: usize,
}

impl ColumnMap {
    fn detect(header: &[Data]) -> Result<Self, LoadError> {
        let find = |name: &'static str| -> Result<usize, LoadError> {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(ColumnMap {
            order_id: find(COL_ORDER_ID)?,
            order_date: find(COL_ORDER_DATE)?,
            country: find(COL_COUNTRY)?,
            product: find(COL_PRODUCT)?,
            category: find(COL_CATEGORY)?,
            sub_category: find(COL_SUB_CATEGORY)?,
            customer_id: find(COL_CUSTOMER_ID)?,
            sales: find(COL_SALES)?,
            profit: find(COL_PROFIT)?,
        })
    }
}

/// Parses one data row. Returns `None` when a required field is missing or
/// unparseable; the caller counts and logs the skip.
fn parse_row(row: &[Data], columns: &ColumnMap) -> Option<OrderRecord> {
    let date = cell_as_date(row.get(columns.order_date)?)?;
    let month = Month::from_number(date.month())?;

    Some(OrderRecord {
        order_id: cell_as_text(row.get(columns.order_id)?)?,
        year: date.year(),
        month,
        country: cell_as_text(row.get(columns.country)?)?,
        product: cell_as_text(row.get(columns.product)?)?,
        category: cell_as_text(row.get(columns.category)?)?,
        sub_category: cell_as_text(row.get(columns.sub_category)?)?,
        customer_id: cell_as_text(row.get(columns.customer_id)?)?,
        sales: cell_as_number(row.get(columns.sales)?)?,
        profit: cell_as_number(row.get(columns.profit)?)?,
    })
}

fn cell_as_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{:.0}", f))
            } else {
                Some(format!("{}", f))
            }
        }
        _ => None,
    }
}

fn cell_as_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn cell_as_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => date_from_serial(dt.as_f64()),
        Data::Float(f) => date_from_serial(*f),
        Data::Int(i) => date_from_serial(*i as f64),
        Data::String(s) => date_from_text(s.trim()),
        Data::DateTimeIso(s) => date_from_text(s.trim()),
        _ => None,
    }
}

/// Excel serial dates count days from the 1900 epoch (day 0 = 1899-12-30,
/// which absorbs Excel's phantom 1900-02-29).
fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn date_from_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    // ISO timestamps keep the date in the first ten characters
    let date_part = if text.len() >= 10 && text.as_bytes().get(4) == Some(&b'-') {
        &text[..10]
    } else {
        text
    };

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_date_conversion() {
        // 2018-03-14 is serial 43173
        let date = date_from_serial(43173.0).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2018, 3, 14).unwrap());

        assert_eq!(date_from_serial(0.0), None);
        assert_eq!(date_from_serial(f64::NAN), None);
    }

    #[test]
    fn text_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2018, 3, 14).unwrap();
        assert_eq!(date_from_text("2018-03-14"), Some(expected));
        assert_eq!(date_from_text("2018-03-14T00:00:00"), Some(expected));
        assert_eq!(date_from_text("03/14/2018"), Some(expected));
        assert_eq!(date_from_text("not a date"), None);
    }

    #[test]
    fn numeric_text_parses_as_number() {
        assert_eq!(cell_as_number(&Data::String(" 12.5 ".to_string())), Some(12.5));
        assert_eq!(cell_as_number(&Data::String("abc".to_string())), None);
        assert_eq!(cell_as_number(&Data::Empty), None);
    }
}
