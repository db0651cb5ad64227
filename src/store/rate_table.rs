//! Employee rate table loaded from CSV.
//!
//! The file has the header `이름,직급,일비,식비`. Header names and cell values
//! are trimmed, and amounts may carry thousands separators or stray spaces
//! (`" 50,000 "`). Rows that cannot be parsed are skipped with a warning, so
//! a lookup for that employee simply finds nothing.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{PaperworkError, PaperworkResult};
use crate::models::EmployeeRate;

const NAME_COLUMN: &str = "이름";
const POSITION_COLUMN: &str = "직급";
const DAILY_ALLOWANCE_COLUMN: &str = "일비";
const MEAL_COLUMN: &str = "식비";

/// Parses a whole-won amount such as `"50,000"` or `" 30 000 "`.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let digits: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&digits)
        .ok()
        .filter(|amount| amount.fract().is_zero())
}

struct Columns {
    name: usize,
    position: usize,
    daily_allowance: usize,
    meal: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, source: &str) -> PaperworkResult<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == wanted)
                .ok_or_else(|| PaperworkError::DataFileError {
                    path: source.to_string(),
                    message: format!("missing column '{wanted}'"),
                })
        };
        Ok(Self {
            name: find(NAME_COLUMN)?,
            position: find(POSITION_COLUMN)?,
            daily_allowance: find(DAILY_ALLOWANCE_COLUMN)?,
            meal: find(MEAL_COLUMN)?,
        })
    }

    fn parse(&self, record: &StringRecord) -> Option<EmployeeRate> {
        let name = record.get(self.name)?.trim();
        if name.is_empty() {
            return None;
        }
        Some(EmployeeRate {
            name: name.to_string(),
            position: record.get(self.position)?.trim().to_string(),
            daily_allowance: parse_amount(record.get(self.daily_allowance)?)?,
            meal_rate: parse_amount(record.get(self.meal)?)?,
        })
    }
}

/// Per-diem rates by employee name, in file order.
///
/// # Example
///
/// ```
/// use trip_paperwork::store::RateTable;
/// use rust_decimal::Decimal;
///
/// let csv = "이름,직급,일비,식비\n김민수,책임연구원,\"50,000\",\"20,000\"\n";
/// let table = RateTable::from_reader(csv.as_bytes(), "inline").unwrap();
///
/// let rate = table.lookup("김민수").unwrap();
/// assert_eq!(rate.daily_allowance, Decimal::from(50_000));
/// assert!(table.lookup("홍길동").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: Vec<EmployeeRate>,
    index: HashMap<String, usize>,
}

impl RateTable {
    /// Loads the rate table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`PaperworkError::DataFileNotFound`] when the file is missing
    /// and [`PaperworkError::DataFileError`] when it cannot be read or lacks
    /// a required column.
    pub fn load<P: AsRef<Path>>(path: P) -> PaperworkResult<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        if !path.exists() {
            return Err(PaperworkError::DataFileNotFound { path: source });
        }
        let file = File::open(path).map_err(|e| PaperworkError::DataFileError {
            path: source.clone(),
            message: e.to_string(),
        })?;
        let table = Self::from_reader(file, &source)?;
        debug!(path = %source, employees = table.len(), "Loaded rate table");
        Ok(table)
    }

    /// Reads a rate table from any CSV source; `source` names it in errors
    /// and log lines.
    pub fn from_reader<R: Read>(reader: R, source: &str) -> PaperworkResult<Self> {
        let mut csv = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers().map_err(|e| PaperworkError::DataFileError {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        let columns = Columns::locate(headers, source)?;

        let mut table = Self::default();
        for (line, record) in (2u64..).zip(csv.records()) {
            let parsed = record
                .map_err(|e| e.to_string())
                .and_then(|record| columns.parse(&record).ok_or_else(|| "unparseable row".to_string()));
            match parsed {
                Ok(rate) => table.insert(rate, source, line),
                Err(reason) => warn!(path = %source, line, reason = %reason, "Skipping rate table row"),
            }
        }
        Ok(table)
    }

    /// Builds a table from already-parsed rates. Later duplicates are ignored.
    pub fn from_rates(rates: impl IntoIterator<Item = EmployeeRate>) -> Self {
        let mut table = Self::default();
        for (line, rate) in (1u64..).zip(rates) {
            table.insert(rate, "memory", line);
        }
        table
    }

    fn insert(&mut self, rate: EmployeeRate, source: &str, line: u64) {
        if self.index.contains_key(&rate.name) {
            warn!(path = %source, line, name = %rate.name, "Ignoring duplicate rate table entry");
            return;
        }
        self.index.insert(rate.name.clone(), self.rates.len());
        self.rates.push(rate);
    }

    /// Returns the rates of the employee with exactly this name.
    pub fn lookup(&self, name: &str) -> Option<&EmployeeRate> {
        self.index.get(name).map(|&i| &self.rates[i])
    }

    /// Employee names in file order.
    pub fn employee_names(&self) -> Vec<&str> {
        self.rates.iter().map(|rate| rate.name.as_str()).collect()
    }

    /// Every rate record in file order.
    pub fn rates(&self) -> &[EmployeeRate] {
        &self.rates
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true when no employee was loaded.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
 이름 , 직급 ,일비,식비
김민수,책임연구원,\"50,000\",\"20,000\"
이서연,선임연구원,\" 40,000 \",\"20,000\"
박지훈,연구원,삼만원,\"15,000\"
";

    #[test]
    fn test_separators_and_spaces_are_stripped() {
        let table = RateTable::from_reader(SAMPLE.as_bytes(), "sample").unwrap();

        let rate = table.lookup("이서연").unwrap();
        assert_eq!(rate.position, "선임연구원");
        assert_eq!(rate.daily_allowance, Decimal::from(40_000));
        assert_eq!(rate.meal_rate, Decimal::from(20_000));
    }

    #[test]
    fn test_unparseable_row_is_skipped() {
        let table = RateTable::from_reader(SAMPLE.as_bytes(), "sample").unwrap();

        assert!(table.lookup("박지훈").is_none());
        assert_eq!(table.employee_names(), vec!["김민수", "이서연"]);
    }

    #[test]
    fn test_fractional_amount_row_is_skipped() {
        let csv = "이름,직급,일비,식비\n김민수,책임연구원,\"50,000.5\",20000\n이서연,선임연구원,40000,20000\n";
        let table = RateTable::from_reader(csv.as_bytes(), "fraction.csv").unwrap();

        assert!(table.lookup("김민수").is_none());
        assert_eq!(table.employee_names(), vec!["이서연"]);
    }

    #[test]
    fn test_missing_column_is_data_file_error() {
        let csv = "이름,직급,일비\n김민수,책임연구원,50000\n";
        match RateTable::from_reader(csv.as_bytes(), "short.csv") {
            Err(PaperworkError::DataFileError { message, .. }) => {
                assert!(message.contains("식비"))
            }
            other => panic!("Expected DataFileError, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_order_mark_in_header_is_ignored() {
        let csv = "\u{feff}이름,직급,일비,식비\n최유진,연구원,30000,15000\n";
        let table = RateTable::from_reader(csv.as_bytes(), "bom.csv").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_names_keep_first_row() {
        let csv = "이름,직급,일비,식비\n김민수,책임연구원,50000,20000\n김민수,연구원,1,1\n";
        let table = RateTable::from_reader(csv.as_bytes(), "dup.csv").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("김민수").unwrap().position, "책임연구원");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        match RateTable::load("./config/does-not-exist.csv") {
            Err(PaperworkError::DataFileNotFound { path }) => {
                assert!(path.ends_with("does-not-exist.csv"))
            }
            other => panic!("Expected DataFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_bundled_rate_table_loads() {
        let table = RateTable::load("./config/rates.csv").unwrap();
        assert!(!table.is_empty());
        assert_eq!(
            table.lookup("최유진").map(|r| r.daily_allowance),
            Some(Decimal::from(30_000))
        );
    }
}
