//! Document synthesis: cell layout, styling, print setup and `.xlsx` output.
//!
//! Synthesizers place values on a [`ReportGrid`] and tag every cell with a
//! [`CellRole`]. Styles are derived from those roles and the row bands of
//! each form, then the writer serializes the sheet with `rust_xlsxwriter`.
//! Every generation builds its own grid; nothing is shared between calls.

mod application;
mod generate;
mod grid;
mod page;
mod report;
mod style;
mod writer;

pub use application::{
    APPLICATION_COLUMNS, APPLICATION_ROWS, FIRST_TRAVELER_ROW, layout_application,
    synthesize_application,
};
pub use generate::{
    DocumentKind, GeneratedDocument, application_file_name, generate_application,
    generate_expense_report, report_file_name,
};
pub use grid::{
    Cell, CellContent, CellRange, CellRef, CellRole, MergeConflict, ReportGrid, column_name,
};
pub use page::{A4_PAPER_SIZE, AutoDimensions, Margins, PageSetup, SheetDimensions, auto_dimensions};
pub use report::{
    ACCOUNT_TRANSFER, ExpenseReportLayout, FIRST_DATA_ROW, MIN_STYLED_ROWS, REPORT_COLUMNS,
    ReportGeometry, layout_expense_report, synthesize_expense_report,
};
pub use style::{
    BorderStyle, CellStyle, HorizontalAlign, ReportBands, application_cell_style,
    report_cell_style,
};
pub use writer::{SheetDocument, render_workbook, save_document};
