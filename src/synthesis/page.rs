//! Print geometry: paper, margins, fit, print area and sizing.

use std::collections::BTreeMap;

use super::grid::CellRange;

/// The xlsx paper-size code for A4.
pub const A4_PAPER_SIZE: u8 = 9;

const A4_WIDTH_INCH: f64 = 8.27;
const A4_HEIGHT_INCH: f64 = 11.69;
const ROWS_PER_PAGE: u32 = 25;

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Header margin.
    pub header: f64,
    /// Footer margin.
    pub footer: f64,
}

impl Margins {
    /// Equal margins on all four sides with 0.3in header and footer.
    pub const fn uniform(inches: f64) -> Self {
        Self {
            left: inches,
            right: inches,
            top: inches,
            bottom: inches,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// How a sheet is printed. Paper is always A4 portrait, without gridlines,
/// shown in page-break preview at 100%.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    /// Page margins.
    pub margins: Margins,
    /// Pages wide to fit the print area into.
    pub fit_to_width: u16,
    /// Pages tall to fit the print area into.
    pub fit_to_height: u16,
    /// The printed block.
    pub print_area: CellRange,
    /// Manual breaks; each value is the 1-based row the page ends after.
    pub row_breaks: Vec<u32>,
    /// Center the page horizontally.
    pub center_horizontally: bool,
    /// Center the page vertically.
    pub center_vertically: bool,
    /// Rows repeated at the top of every printed page (1-based, inclusive).
    pub repeat_rows: Option<(u32, u32)>,
}

/// Row and column sizes of a sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetDimensions {
    /// Height in points per 1-based row.
    pub row_heights: BTreeMap<u32, f64>,
    /// Width in character units per 1-based column.
    pub column_widths: BTreeMap<u16, f64>,
}

/// Default sizes derived from the printable A4 area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoDimensions {
    /// Row height in points.
    pub row_height: f64,
    /// Column width in character units.
    pub column_width: f64,
    /// Printable width in inches.
    pub usable_width_inch: f64,
    /// Printable height in inches.
    pub usable_height_inch: f64,
    /// Rows a page is sized for.
    pub rows_per_page: u32,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Computes default row and column sizes for an A4 page.
///
/// # Example
///
/// ```
/// use trip_paperwork::synthesis::auto_dimensions;
///
/// let dims = auto_dimensions(12, 0.65);
/// assert_eq!(dims.row_height, 35.0);
/// assert_eq!(dims.column_width, 8.0);
/// ```
pub fn auto_dimensions(total_cols: u16, margin_inches: f64) -> AutoDimensions {
    let usable_width = A4_WIDTH_INCH - margin_inches * 2.0;
    let usable_height = A4_HEIGHT_INCH - margin_inches * 2.0;

    let row_height = (usable_height * 72.0 / f64::from(ROWS_PER_PAGE)).clamp(35.0, 50.0);
    let column_width = (usable_width * 7.5 / f64::from(total_cols.max(1))).clamp(8.0, 18.0);

    AutoDimensions {
        row_height: round_to(row_height, 1),
        column_width: round_to(column_width, 1),
        usable_width_inch: round_to(usable_width, 2),
        usable_height_inch: round_to(usable_height, 2),
        rows_per_page: ROWS_PER_PAGE,
    }
}
