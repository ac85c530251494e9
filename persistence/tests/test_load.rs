//! FILENAME: tests/test_load.rs
//! Integration tests for spreadsheet loading: workbooks are written with
//! rust_xlsxwriter into a temp dir and read back through the loader.

use orders::Month;
use persistence::{load_orders, load_orders_from_sheet, LoadError};
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header layout used by the fixtures. The leading "Row ID" column is not
/// required by the loader and proves columns are matched by name.
const HEADERS: [&str; 10] = [
    "Row ID",
    "Order ID",
    "Order Date",
    "Customer ID",
    "Country",
    "Product Name",
    "Category",
    "Sub-Category",
    "Sales",
    "Profit",
];

struct Row<'a> {
    order_id: &'a str,
    date: &'a str,
    customer_id: &'a str,
    country: &'a str,
    product: &'a str,
    category: &'a str,
    sub_category: &'a str,
    sales: f64,
    profit: f64,
}

fn write_fixture(dir: &TempDir, sheet: &str, rows: &[Row]) -> PathBuf {
    let path = dir.path().join("orders.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, (i + 1) as f64).unwrap();
        worksheet.write_string(r, 1, row.order_id).unwrap();
        worksheet.write_string(r, 2, row.date).unwrap();
        worksheet.write_string(r, 3, row.customer_id).unwrap();
        worksheet.write_string(r, 4, row.country).unwrap();
        worksheet.write_string(r, 5, row.product).unwrap();
        worksheet.write_string(r, 6, row.category).unwrap();
        worksheet.write_string(r, 7, row.sub_category).unwrap();
        worksheet.write_number(r, 8, row.sales).unwrap();
        worksheet.write_number(r, 9, row.profit).unwrap();
    }

    workbook.save(&path).unwrap();
    path
}

fn sample_rows() -> Vec<Row<'static>> {
    vec![
        Row {
            order_id: "ES-2018-1000",
            date: "2018-03-14",
            customer_id: "TB-21520",
            country: "Germany",
            product: "Bretford Table",
            category: "Furniture",
            sub_category: "Tables",
            sales: 854.9,
            profit: 290.7,
        },
        Row {
            order_id: "ES-2018-1001",
            date: "2018-11-02",
            customer_id: "AA-10375",
            country: "France",
            product: "Staple envelope",
            category: "Office Supplies",
            sub_category: "Envelopes",
            sales: 113.9,
            profit: 54.7,
        },
        Row {
            order_id: "ES-2017-0042",
            date: "2017-06-21",
            customer_id: "TB-21520",
            country: "Germany",
            product: "Nokia Smart Phone",
            category: "Technology",
            sub_category: "Phones",
            sales: 907.2,
            profit: 90.7,
        },
    ]
}

#[test]
fn loads_records_from_named_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "Orders", &sample_rows());

    let loaded = load_orders_from_sheet(&path, "Orders").unwrap();
    assert_eq!(loaded.store.len(), 3);
    assert_eq!(loaded.stats.total_rows, 3);
    assert_eq!(loaded.stats.loaded, 3);
    assert_eq!(loaded.stats.skipped, 0);

    let first = &loaded.store.records()[0];
    assert_eq!(first.order_id, "ES-2018-1000");
    assert_eq!(first.year, 2018);
    assert_eq!(first.month, Month::Mar);
    assert_eq!(first.country, "Germany");
    assert!((first.sales - 854.9).abs() < 1e-9);

    assert_eq!(loaded.store.years(), vec![2017, 2018]);
}

#[test]
fn first_sheet_is_the_default() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "Orders", &sample_rows());

    let loaded = load_orders(&path).unwrap();
    assert_eq!(loaded.store.len(), 3);
}

#[test]
fn unknown_sheet_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "Orders", &sample_rows());

    let err = load_orders_from_sheet(&path, "Returns").unwrap_err();
    assert!(matches!(err, LoadError::SheetNotFound(name) if name == "Returns"));
}

#[test]
fn missing_column_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    // "Profit" deliberately absent
    for (col, header) in HEADERS[..9].iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let err = load_orders(&path).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("Profit")));
}

#[test]
fn malformed_rows_are_excluded_with_a_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    // Row 1: valid, with the date as an Excel serial number (2018-03-14)
    worksheet.write_number(1, 0, 1.0).unwrap();
    worksheet.write_string(1, 1, "ES-2018-1000").unwrap();
    worksheet.write_number(1, 2, 43173.0).unwrap();
    worksheet.write_string(1, 3, "TB-21520").unwrap();
    worksheet.write_string(1, 4, "Germany").unwrap();
    worksheet.write_string(1, 5, "Bretford Table").unwrap();
    worksheet.write_string(1, 6, "Furniture").unwrap();
    worksheet.write_string(1, 7, "Tables").unwrap();
    worksheet.write_number(1, 8, 854.9).unwrap();
    worksheet.write_number(1, 9, 290.7).unwrap();

    // Row 2: unparseable date
    worksheet.write_number(2, 0, 2.0).unwrap();
    worksheet.write_string(2, 1, "ES-2018-1001").unwrap();
    worksheet.write_string(2, 2, "someday").unwrap();
    worksheet.write_string(2, 3, "AA-10375").unwrap();
    worksheet.write_string(2, 4, "France").unwrap();
    worksheet.write_string(2, 5, "Staple envelope").unwrap();
    worksheet.write_string(2, 6, "Office Supplies").unwrap();
    worksheet.write_string(2, 7, "Envelopes").unwrap();
    worksheet.write_number(2, 8, 113.9).unwrap();
    worksheet.write_number(2, 9, 54.7).unwrap();

    // Row 3: non-numeric sales
    worksheet.write_number(3, 0, 3.0).unwrap();
    worksheet.write_string(3, 1, "ES-2018-1002").unwrap();
    worksheet.write_string(3, 2, "2018-05-01").unwrap();
    worksheet.write_string(3, 3, "AA-10375").unwrap();
    worksheet.write_string(3, 4, "Spain").unwrap();
    worksheet.write_string(3, 5, "Fellowes Shelf").unwrap();
    worksheet.write_string(3, 6, "Office Supplies").unwrap();
    worksheet.write_string(3, 7, "Storage").unwrap();
    worksheet.write_string(3, 8, "n/a").unwrap();
    worksheet.write_number(3, 9, 10.0).unwrap();

    workbook.save(&path).unwrap();

    let loaded = load_orders(&path).unwrap();
    assert_eq!(loaded.stats.total_rows, 3);
    assert_eq!(loaded.stats.loaded, 1);
    assert_eq!(loaded.stats.skipped, 2);

    let record = &loaded.store.records()[0];
    assert_eq!(record.year, 2018);
    assert_eq!(record.month, Month::Mar);
}

#[test]
fn headers_only_yields_an_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let loaded = load_orders(&path).unwrap();
    assert!(loaded.store.is_empty());
    assert_eq!(loaded.stats, persistence::LoadStats::default());
}
