//! The cell grid documents are laid out on.
//!
//! Coordinates are 1-based, matching spreadsheet notation (`A1` is row 1,
//! column 1). The writer converts to the 0-based indices of the xlsx
//! serializer.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::{PaperworkError, PaperworkResult};

/// Returns the spreadsheet column letters for a 1-based column number.
///
/// ```
/// use trip_paperwork::synthesis::column_name;
///
/// assert_eq!(column_name(1), "A");
/// assert_eq!(column_name(12), "L");
/// assert_eq!(column_name(28), "AB");
/// ```
pub fn column_name(col: u16) -> String {
    let mut n = u32::from(col);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn column_number(letters: &str) -> Option<u16> {
    letters.chars().try_fold(0u16, |acc, c| {
        if !c.is_ascii_uppercase() {
            return None;
        }
        acc.checked_mul(26)?.checked_add(c as u16 - u16::from(b'A') + 1)
    })
}

/// A single cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    /// 1-based row.
    pub row: u32,
    /// 1-based column.
    pub col: u16,
}

impl CellRef {
    /// Creates an address from 1-based row and column numbers.
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parses an `A1`-style address.
    pub fn parse(a1: &str) -> PaperworkResult<Self> {
        let split = a1
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| invalid_address(a1))?;
        let (letters, digits) = a1.split_at(split);
        let col = column_number(letters).filter(|c| *c > 0);
        let row = digits.parse::<u32>().ok().filter(|r| *r > 0);
        match (row, col) {
            (Some(row), Some(col)) => Ok(Self { row, col }),
            _ => Err(invalid_address(a1)),
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.col), self.row)
    }
}

fn invalid_address(a1: &str) -> PaperworkError {
    PaperworkError::Render {
        message: format!("invalid cell address '{a1}'"),
    }
}

/// A rectangular block of cells, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    /// Top-left corner.
    pub first: CellRef,
    /// Bottom-right corner.
    pub last: CellRef,
}

impl CellRange {
    /// Creates a range from two corners given in any order.
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            first: CellRef::new(first_row.min(last_row), first_col.min(last_col)),
            last: CellRef::new(first_row.max(last_row), first_col.max(last_col)),
        }
    }

    /// A range covering one cell.
    pub fn single(at: CellRef) -> Self {
        Self { first: at, last: at }
    }

    /// A range covering columns `first_col..=last_col` of one row.
    pub fn row_span(row: u32, first_col: u16, last_col: u16) -> Self {
        Self::new(row, first_col, row, last_col)
    }

    /// Parses `A1:L1` or a single address such as `F12`.
    pub fn parse(range: &str) -> PaperworkResult<Self> {
        match range.split_once(':') {
            Some((first, last)) => {
                let first = CellRef::parse(first)?;
                let last = CellRef::parse(last)?;
                Ok(Self::new(first.row, first.col, last.row, last.col))
            }
            None => CellRef::parse(range).map(Self::single),
        }
    }

    /// Returns true when the range is a single cell.
    pub fn is_single(&self) -> bool {
        self.first == self.last
    }

    /// Returns true when `at` lies inside the range.
    pub fn contains(&self, at: CellRef) -> bool {
        (self.first.row..=self.last.row).contains(&at.row)
            && (self.first.col..=self.last.col).contains(&at.col)
    }

    /// Returns true when the two ranges share at least one cell.
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.first.row <= other.last.row
            && other.first.row <= self.last.row
            && self.first.col <= other.last.col
            && other.first.col <= self.last.col
    }

    /// Every cell of the range, row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.first.row..=self.last.row)
            .flat_map(move |row| (self.first.col..=self.last.col).map(move |col| CellRef::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}:{}", self.first, self.last)
        }
    }
}

/// What a cell holds.
///
/// Computed subtotals and totals are always [`CellContent::Formula`] so the
/// document stays auditable in spreadsheet software.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellContent {
    /// A literal number.
    Number(Decimal),
    /// Literal text.
    Text(String),
    /// A formula expression, including the leading `=`.
    Formula(String),
}

impl CellContent {
    /// Returns the text if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the expression if this is a formula cell.
    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellContent::Formula(expr) => Some(expr),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric cell.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            CellContent::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        CellContent::Text(text.to_string())
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        CellContent::Text(text)
    }
}

impl From<Decimal> for CellContent {
    fn from(n: Decimal) -> Self {
        CellContent::Number(n)
    }
}

impl From<u32> for CellContent {
    fn from(n: u32) -> Self {
        CellContent::Number(Decimal::from(n))
    }
}

/// The part a cell plays in a document. Styling is chosen from this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    /// The document title.
    Title,
    /// A label in a header block or a table heading.
    Header,
    /// A label printed in regular weight.
    Label,
    /// A value filled into the header block.
    Field,
    /// The "(단위:원)" currency note.
    UnitLabel,
    /// A heading that opens a section of the form.
    SectionHeader,
    /// The approval box: role labels and blank signature cells.
    Signature,
    /// A cost, employee or traveler row.
    DataRow,
    /// The totals row.
    Totals,
    /// The submission statement, date and organization lines.
    Trailer,
    /// The extra-duty allowance block.
    ExtraDuty,
    /// The second-page attachment notice.
    Notice,
}

/// A populated cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The value, absent for cells that only carry a role (signature boxes).
    pub content: Option<CellContent>,
    /// The cell's role.
    pub role: CellRole,
}

/// A merge request that overlaps an existing merge region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("merge {requested} overlaps existing region {existing}")]
pub struct MergeConflict {
    /// The rejected range.
    pub requested: CellRange,
    /// The region it collided with.
    pub existing: CellRange,
}

/// The cell space of one document.
///
/// Holds cell values and roles, non-overlapping merge regions, a row cursor
/// for appending data rows, and an optional page-break row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportGrid {
    cells: BTreeMap<CellRef, Cell>,
    merges: Vec<CellRange>,
    cursor: u32,
    page_break_row: Option<u32>,
}

impl ReportGrid {
    /// Creates an empty grid whose cursor starts at `first_row`.
    pub fn new(first_row: u32) -> Self {
        Self {
            cursor: first_row,
            ..Self::default()
        }
    }

    /// Stores a value and role at `at`, replacing any previous cell.
    pub fn write(&mut self, at: CellRef, content: impl Into<CellContent>, role: CellRole) {
        self.cells.insert(
            at,
            Cell {
                content: Some(content.into()),
                role,
            },
        );
    }

    /// Tags `at` with a role without giving it a value.
    pub fn mark(&mut self, at: CellRef, role: CellRole) {
        self.cells.insert(at, Cell { content: None, role });
    }

    /// Registers a merge region.
    ///
    /// Single-cell ranges are accepted and not recorded.
    pub fn merge(&mut self, range: CellRange) -> Result<(), MergeConflict> {
        if range.is_single() {
            return Ok(());
        }
        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&range)) {
            return Err(MergeConflict {
                requested: range,
                existing: *existing,
            });
        }
        self.merges.push(range);
        Ok(())
    }

    /// Merges `range` and stores `content` in its top-left cell.
    ///
    /// A merge conflict is logged and the merge skipped; the value is still
    /// written so the rest of the document is unaffected.
    pub fn place(&mut self, range: CellRange, content: Option<CellContent>, role: CellRole) {
        if let Err(conflict) = self.merge(range) {
            warn!(
                requested = %conflict.requested,
                existing = %conflict.existing,
                "Skipping conflicting merge region"
            );
        }
        match content {
            Some(content) => self.write(range.first, content, role),
            None => self.mark(range.first, role),
        }
    }

    /// Returns the cell stored at `at`.
    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.cells.get(&at)
    }

    /// Returns the value at an `A1`-style address.
    pub fn content_at(&self, a1: &str) -> Option<&CellContent> {
        let at = CellRef::parse(a1).ok()?;
        self.cells.get(&at)?.content.as_ref()
    }

    /// Returns the merge region containing `at`.
    pub fn merge_at(&self, at: CellRef) -> Option<&CellRange> {
        self.merges.iter().find(|m| m.contains(at))
    }

    /// Returns the role governing `at`: its own, or that of the top-left
    /// cell of the merge region covering it.
    pub fn role_at(&self, at: CellRef) -> Option<CellRole> {
        if let Some(cell) = self.cells.get(&at) {
            return Some(cell.role);
        }
        let region = self.merge_at(at)?;
        self.cells.get(&region.first).map(|cell| cell.role)
    }

    /// All merge regions in registration order.
    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// All populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    /// The next row data will be appended to.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Returns the cursor row and moves the cursor down one row.
    pub fn advance(&mut self) -> u32 {
        let row = self.cursor;
        self.cursor += 1;
        row
    }

    /// Records the row after which the printed document breaks.
    pub fn set_page_break(&mut self, row: u32) {
        self.page_break_row = Some(row);
    }

    /// The row after which the printed document breaks.
    pub fn page_break_row(&self) -> Option<u32> {
        self.page_break_row
    }

    /// The last row holding a cell or a merge region.
    pub fn last_row(&self) -> u32 {
        let cell_rows = self.cells.keys().map(|at| at.row);
        let merge_rows = self.merges.iter().map(|m| m.last.row);
        cell_rows.chain(merge_rows).max().unwrap_or(0)
    }
}
