//! Serialization of a laid-out sheet into an `.xlsx` workbook.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, warn};

use crate::error::{PaperworkError, PaperworkResult};

use super::grid::{CellContent, CellRef, ReportGrid};
use super::page::{A4_PAPER_SIZE, PageSetup, SheetDimensions};
use super::style::CellStyle;

/// A fully laid-out single-sheet document, ready to serialize.
#[derive(Debug, Clone)]
pub struct SheetDocument {
    /// Worksheet tab name.
    pub name: String,
    /// Cell contents, roles and merges.
    pub grid: ReportGrid,
    /// Style of every cell in the styled block.
    pub styles: BTreeMap<CellRef, CellStyle>,
    /// Style for populated cells outside the styled block.
    pub default_style: CellStyle,
    /// Row heights and column widths.
    pub dimensions: SheetDimensions,
    /// Print geometry.
    pub page: PageSetup,
}

impl SheetDocument {
    /// The style of the cell at `at`.
    pub fn style_at(&self, at: CellRef) -> CellStyle {
        self.styles.get(&at).copied().unwrap_or(self.default_style)
    }
}

fn render_error(error: XlsxError) -> PaperworkError {
    PaperworkError::Render {
        message: error.to_string(),
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    at: CellRef,
    content: Option<&CellContent>,
    format: &Format,
) -> PaperworkResult<()> {
    let (row, col) = (at.row - 1, at.col - 1);
    match content {
        Some(CellContent::Number(n)) => {
            let value = n.to_f64().ok_or_else(|| PaperworkError::Render {
                message: format!("amount {n} at {at} is not representable"),
            })?;
            worksheet.write_number_with_format(row, col, value, format)
        }
        Some(CellContent::Text(text)) => worksheet.write_string_with_format(row, col, text, format),
        Some(CellContent::Formula(expr)) => {
            worksheet.write_formula_with_format(row, col, expr.as_str(), format)
        }
        None => worksheet.write_blank(row, col, format),
    }
    .map_err(render_error)?;
    Ok(())
}

fn fill_worksheet(
    worksheet: &mut Worksheet,
    document: &SheetDocument,
    font_name: &str,
) -> PaperworkResult<()> {
    worksheet.set_name(&document.name).map_err(render_error)?;

    let mut covered = HashSet::new();
    for range in document.grid.merges() {
        let format = document.style_at(range.first).to_format(font_name);
        match worksheet.merge_range(
            range.first.row - 1,
            range.first.col - 1,
            range.last.row - 1,
            range.last.col - 1,
            "",
            &format,
        ) {
            Ok(_) => covered.extend(range.cells().filter(|at| *at != range.first)),
            Err(error) => warn!(range = %range, error = %error, "Writer rejected merge region"),
        }
    }

    let mut positions: BTreeSet<CellRef> = document.styles.keys().copied().collect();
    positions.extend(document.grid.cells().map(|(at, _)| *at));
    for at in positions.into_iter().filter(|at| !covered.contains(at)) {
        let format = document.style_at(at).to_format(font_name);
        let content = document.grid.cell(at).and_then(|cell| cell.content.as_ref());
        write_cell(worksheet, at, content, &format)?;
    }

    for (row, height) in &document.dimensions.row_heights {
        worksheet.set_row_height(row - 1, *height).map_err(render_error)?;
    }
    for (col, width) in &document.dimensions.column_widths {
        worksheet.set_column_width(col - 1, *width).map_err(render_error)?;
    }

    apply_page_setup(worksheet, &document.page)
}

fn apply_page_setup(worksheet: &mut Worksheet, page: &PageSetup) -> PaperworkResult<()> {
    let margins = &page.margins;
    worksheet.set_portrait();
    worksheet.set_paper_size(A4_PAPER_SIZE);
    worksheet.set_margins(
        margins.left,
        margins.right,
        margins.top,
        margins.bottom,
        margins.header,
        margins.footer,
    );
    worksheet.set_print_fit_to_pages(page.fit_to_width, page.fit_to_height);

    let area = &page.print_area;
    worksheet
        .set_print_area(
            area.first.row - 1,
            area.first.col - 1,
            area.last.row - 1,
            area.last.col - 1,
        )
        .map_err(render_error)?;

    // The serializer places a break above the given 0-based row, which is
    // the 1-based row the page ends after.
    if !page.row_breaks.is_empty() {
        worksheet
            .set_page_breaks(&page.row_breaks)
            .map_err(render_error)?;
    }
    if let Some((first, last)) = page.repeat_rows {
        worksheet
            .set_repeat_rows(first - 1, last - 1)
            .map_err(render_error)?;
    }

    worksheet.set_print_gridlines(false);
    worksheet.set_print_center_horizontally(page.center_horizontally);
    worksheet.set_print_center_vertically(page.center_vertically);
    worksheet.set_view_page_break_preview();
    worksheet.set_zoom(100);
    Ok(())
}

/// Builds an in-memory workbook holding `document` as its only sheet.
pub fn render_workbook(document: &SheetDocument, font_name: &str) -> PaperworkResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, document, font_name)?;
    Ok(workbook)
}

/// Renders `document` and saves it to `path`.
///
/// # Errors
///
/// Returns [`PaperworkError::Render`] when the sheet cannot be built and
/// [`PaperworkError::Write`] when the file cannot be saved.
pub fn save_document(document: &SheetDocument, font_name: &str, path: &Path) -> PaperworkResult<()> {
    let mut workbook = render_workbook(document, font_name)?;
    workbook.save(path).map_err(|e| PaperworkError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), sheet = %document.name, "Saved workbook");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::grid::{CellRange, CellRole};
    use crate::synthesis::page::Margins;
    use rust_decimal::Decimal;

    fn tiny_document() -> SheetDocument {
        let mut grid = ReportGrid::new(2);
        grid.place(
            CellRange::parse("A1:B1").unwrap(),
            Some("제목".into()),
            CellRole::Title,
        );
        grid.write(CellRef::new(2, 1), Decimal::from(80_000), CellRole::DataRow);
        grid.write(
            CellRef::new(2, 2),
            CellContent::Formula("=A2*2".to_string()),
            CellRole::DataRow,
        );

        SheetDocument {
            name: "시험".to_string(),
            grid,
            styles: BTreeMap::new(),
            default_style: CellStyle::regular(10.0),
            dimensions: SheetDimensions::default(),
            page: PageSetup {
                margins: Margins::uniform(0.65),
                fit_to_width: 1,
                fit_to_height: 1,
                print_area: CellRange::parse("A1:B2").unwrap(),
                row_breaks: vec![1],
                center_horizontally: true,
                center_vertically: false,
                repeat_rows: Some((1, 1)),
            },
        }
    }

    #[test]
    fn test_save_document_writes_xlsx_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.xlsx");

        save_document(&tiny_document(), "맑은 고딕", &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_save_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tiny.xlsx");

        match save_document(&tiny_document(), "맑은 고딕", &path) {
            Err(PaperworkError::Write { path: reported, .. }) => {
                assert!(reported.ends_with("tiny.xlsx"))
            }
            other => panic!("Expected Write error, got {:?}", other),
        }
    }

    #[test]
    fn test_style_falls_back_to_default() {
        let document = tiny_document();
        assert_eq!(document.style_at(CellRef::new(40, 40)), CellStyle::regular(10.0));
    }
}
