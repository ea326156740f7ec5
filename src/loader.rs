// 📂 Data Loader - CSV → typed sales records
// Header is resolved by name, every value is coerced at load time

use crate::error::{Result, SummaryError};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Columns every input file must carry (extra columns are ignored)
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "region", "product", "units", "price"];

/// Date layouts accepted for the `date` column, tried in order
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// ============================================================================
// CORE TYPES
// ============================================================================

/// SaleRecord - one transaction as loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub region: String,
    pub product: String,
    pub units: f64,
    pub price: f64,

    /// Line in the source file (header is line 1)
    pub line_number: usize,
}

/// SalesTable - all records of one input, in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesTable {
    pub records: Vec<SaleRecord>,
    pub source_name: String,

    /// SHA-256 of the raw input bytes
    pub source_digest: String,
}

impl SalesTable {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        SalesTable {
            records,
            source_name: String::new(),
            source_digest: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// TableSource - anything that can produce a SalesTable
pub trait TableSource {
    fn load_table(&self) -> Result<SalesTable>;

    /// Name used in logs and error messages
    fn name(&self) -> String;
}

/// CSV file on disk
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TableSource for CsvFileSource {
    fn load_table(&self) -> Result<SalesTable> {
        load_csv(&self.path)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a CSV file into a SalesTable
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<SalesTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SummaryError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, &path.display().to_string())
}

/// Parse CSV from any reader (stdin, in-memory fixtures, ...)
pub fn parse_csv<R: Read>(mut reader: R, source_name: &str) -> Result<SalesTable> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_bytes(&bytes, source_name)
}

fn parse_bytes(bytes: &[u8], source_name: &str) -> Result<SalesTable> {
    // Short rows surface as per-field coercion errors, not CSV structure errors
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns = ColumnIndex::resolve(reader.headers()?)?;
    debug!(source = source_name, ?columns, "Resolved header columns");

    let mut records = Vec::new();
    // Bounds every grouped sum downstream
    let mut gross_revenue = 0.0_f64;
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        let record = columns.read_record(&row, line)?;

        gross_revenue += (record.units * record.price).abs();
        if !gross_revenue.is_finite() {
            return Err(SummaryError::NumericConversionError {
                line,
                column: "revenue".to_string(),
                value: "running revenue total overflows".to_string(),
            });
        }

        records.push(record);
    }

    let table = SalesTable {
        records,
        source_name: source_name.to_string(),
        source_digest: fingerprint(bytes),
    };

    info!(
        source = source_name,
        rows = table.len(),
        digest = %table.source_digest,
        "Loaded sales table"
    );

    Ok(table)
}

/// SHA-256 hex digest of raw input
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// COLUMN RESOLUTION & COERCION
// ============================================================================

/// Position of each required column in the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    region: usize,
    product: usize,
    units: usize,
    price: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| find(*name).is_none())
            .map(String::from)
            .collect();

        match (
            find("date"),
            find("region"),
            find("product"),
            find("units"),
            find("price"),
        ) {
            (Some(date), Some(region), Some(product), Some(units), Some(price)) => Ok(ColumnIndex {
                date,
                region,
                product,
                units,
                price,
            }),
            _ => Err(SummaryError::SchemaMismatch { missing }),
        }
    }

    fn read_record(&self, row: &StringRecord, line: usize) -> Result<SaleRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let date = parse_date(field(self.date), line)?;
        let units = parse_number(field(self.units), "units", line)?;
        let price = parse_number(field(self.price), "price", line)?;

        // units × price must stay representable as a finite revenue
        if !(units * price).is_finite() {
            return Err(SummaryError::NumericConversionError {
                line,
                column: "revenue".to_string(),
                value: format!("{} × {}", field(self.units), field(self.price)),
            });
        }

        Ok(SaleRecord {
            date,
            region: field(self.region).to_string(),
            product: field(self.product).to_string(),
            units,
            price,
            line_number: line,
        })
    }
}

/// Parse a calendar date, trying each accepted layout
pub fn parse_date(value: &str, line: usize) -> Result<NaiveDate> {
    let trimmed = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SummaryError::ParseError {
            line,
            value: value.to_string(),
        })
}

/// Parse a finite number; NaN and infinities are rejected
pub fn parse_number(value: &str, column: &str, line: usize) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(SummaryError::NumericConversionError {
            line,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<SalesTable> {
        parse_csv(text.as_bytes(), "test.csv")
    }

    #[test]
    fn test_load_typed_records() {
        let table = parse(
            "date,region,product,units,price\n\
             2024-01-01,East,A,10,2\n\
             2024-01-02,West,B,1.5,4.25\n",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.source_name, "test.csv");

        let first = &table.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.region, "East");
        assert_eq!(first.product, "A");
        assert_eq!(first.units, 10.0);
        assert_eq!(first.price, 2.0);
        assert_eq!(first.line_number, 2);

        assert_eq!(table.records[1].units, 1.5);
        assert_eq!(table.records[1].line_number, 3);
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = parse("date,region,product,units,price\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let table = parse(
            "price,notes,units,product,region,date,revenue\n\
             3,promo,2,Widget,North,2024-03-05,999\n",
        )
        .unwrap();

        let rec = &table.records[0];
        assert_eq!(rec.price, 3.0);
        assert_eq!(rec.units, 2.0);
        assert_eq!(rec.product, "Widget");
        assert_eq!(rec.region, "North");
    }

    #[test]
    fn test_missing_columns_is_schema_mismatch() {
        let err = parse("date,region,product\n2024-01-01,East,A\n").unwrap_err();

        match err {
            SummaryError::SchemaMismatch { missing } => {
                assert_eq!(missing, vec!["units".to_string(), "price".to_string()]);
            }
            other => panic!("Expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_schema_mismatch() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, SummaryError::SchemaMismatch { ref missing } if missing.len() == 5));
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let err = parse(
            "date,region,product,units,price\n\
             2024-01-01,East,A,1,1\n\
             2024-02-30,East,A,1,1\n",
        )
        .unwrap_err();

        match err {
            SummaryError::ParseError { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "2024-02-30");
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_is_numeric_conversion_error() {
        let err = parse("date,region,product,units,price\n2024-01-01,East,A,ten,2\n").unwrap_err();

        match err {
            SummaryError::NumericConversionError { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "units");
                assert_eq!(value, "ten");
            }
            other => panic!("Expected NumericConversionError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_non_finite_numbers_rejected() {
        assert!(parse_number("", "price", 2).is_err());
        assert!(parse_number("NaN", "price", 2).is_err());
        assert!(parse_number("inf", "price", 2).is_err());
        assert_eq!(parse_number(" 7.5 ", "price", 2).unwrap(), 7.5);
    }

    #[test]
    fn test_alternate_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(parse_date("2024-12-25", 2).unwrap(), expected);
        assert_eq!(parse_date("2024/12/25", 2).unwrap(), expected);
        assert_eq!(parse_date("12/25/2024", 2).unwrap(), expected);
        assert!(parse_date("25.12.2024", 2).is_err());
    }

    #[test]
    fn test_short_row_is_numeric_conversion_error() {
        let err = parse("date,region,product,units,price\n2024-01-01,East,A,1\n").unwrap_err();

        match err {
            SummaryError::NumericConversionError { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "price");
                assert_eq!(value, "");
            }
            other => panic!("Expected NumericConversionError, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_missing_date_is_parse_error() {
        let err = parse("price,units,product,region,date\n2,1,A,East\n").unwrap_err();
        assert!(matches!(err, SummaryError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_overflowing_revenue_total_rejected() {
        let err = parse(
            "date,region,product,units,price\n\
             2024-01-01,East,A,1e154,1e154\n\
             2024-01-02,East,A,1e154,1e154\n\
             2024-01-03,East,A,1e154,1e154\n",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SummaryError::NumericConversionError { line: 3, ref column, .. } if column == "revenue"
        ));
    }

    #[test]
    fn test_overflowing_revenue_rejected() {
        let err = parse("date,region,product,units,price\n2024-01-01,East,A,1e200,1e200\n").unwrap_err();

        match err {
            SummaryError::NumericConversionError { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "revenue");
            }
            other => panic!("Expected NumericConversionError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let err = load_csv("/definitely/not/here/data.csv").unwrap_err();
        assert!(matches!(err, SummaryError::InputNotFound { .. }));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint(b"date,region,product,units,price\n");
        let b = fingerprint(b"date,region,product,units,price\n");
        let c = fingerprint(b"date,region,product,units,price\n2024-01-01,E,A,1,1\n");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
