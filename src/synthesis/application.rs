//! Layout of the trip application ("출장신청서"), a fixed 22-row form.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calculation::format_trip_period;
use crate::config::Organization;
use crate::models::{APPLICATION_TRAVELER_ROWS, ApplicationForm};

use super::grid::{CellContent, CellRange, CellRole, ReportGrid};
use super::page::{Margins, PageSetup, SheetDimensions};
use super::style::{CellStyle, application_cell_style};
use super::writer::SheetDocument;

/// Columns A through G.
pub const APPLICATION_COLUMNS: u16 = 7;
/// Rows of the fixed template.
pub const APPLICATION_ROWS: u32 = 22;
/// First traveler row.
pub const FIRST_TRAVELER_ROW: u32 = 12;

const SHEET_NAME: &str = "출장신청서";

const ROW_HEIGHTS: [(u32, f64); 14] = [
    (1, 60.0),
    (2, 30.0),
    (3, 90.0),
    (4, 40.0),
    (5, 40.0),
    (6, 120.0),
    (7, 160.0),
    (8, 40.0),
    (9, 40.0),
    (10, 40.0),
    (11, 32.0),
    (20, 40.0),
    (21, 40.0),
    (22, 60.0),
];
const TRAVELER_ROW_HEIGHT: f64 = 32.0;
const NARROW_COLUMN_WIDTH: f64 = 15.0;
const WIDE_COLUMN_WIDTH: f64 = 19.0;

fn range(a1: &str) -> Option<CellRange> {
    match CellRange::parse(a1) {
        Ok(range) => Some(range),
        Err(error) => {
            tracing::warn!(range = a1, error = %error, "Skipping invalid range");
            None
        }
    }
}

fn label(grid: &mut ReportGrid, a1: &str, text: &str, role: CellRole) {
    if let Some(range) = range(a1) {
        grid.place(range, Some(text.into()), role);
    }
}

/// Places a form value; blank values keep the merge but leave the cell empty.
fn field(grid: &mut ReportGrid, a1: &str, value: &str) {
    if let Some(range) = range(a1) {
        let content = (!value.is_empty()).then(|| CellContent::from(value));
        grid.place(range, content, CellRole::Field);
    }
}

fn traveler_value(value: Option<&str>) -> Option<CellContent> {
    value.filter(|v| !v.is_empty()).map(CellContent::from)
}

/// Lays out a trip application. Travelers beyond the eighth row are not
/// placed; validation rejects such forms before layout.
pub fn layout_application(
    form: &ApplicationForm,
    organization: &Organization,
    issued_on: NaiveDate,
) -> ReportGrid {
    let mut grid = ReportGrid::new(FIRST_TRAVELER_ROW);

    label(&mut grid, "A1:G1", "출 장 신 청 서", CellRole::Title);

    label(&mut grid, "D2:D3", "결재", CellRole::Signature);
    label(&mut grid, "E2", "담당", CellRole::Signature);
    label(&mut grid, "F2", "책임연구원", CellRole::Signature);
    label(&mut grid, "G2", "대표이사", CellRole::Signature);
    for a1 in ["E3", "F3", "G3"] {
        if let Some(range) = range(a1) {
            grid.place(range, None, CellRole::Signature);
        }
    }

    label(&mut grid, "A4", "소속", CellRole::Header);
    field(&mut grid, "B4:D4", &organization.short_name);
    label(&mut grid, "E4", "과제책임자", CellRole::Header);
    field(&mut grid, "F4:G4", &form.project_manager);

    label(&mut grid, "A5", "연구과제명", CellRole::Header);
    field(&mut grid, "B5:G5", &form.project_name);

    label(&mut grid, "A6", "출장기간", CellRole::Header);
    field(&mut grid, "B6:D6", &format_trip_period(form.start_date, form.end_date));
    label(&mut grid, "E6", "출장지", CellRole::Header);
    field(&mut grid, "F6:G6", &form.destination);

    label(&mut grid, "A7", "출장목적", CellRole::Header);
    field(&mut grid, "B7:G7", &form.purpose);

    label(&mut grid, "A8:A9", "출장교통비", CellRole::Header);
    label(&mut grid, "B8:B9", "이용차량", CellRole::Header);
    label(&mut grid, "C8", "법인(차종)", CellRole::Label);
    field(&mut grid, "D8", &form.company_car);
    label(&mut grid, "C9", "자차(유종)", CellRole::Label);
    label(&mut grid, "E8:E9", "대중교통\n(항공,철도,\n선박)", CellRole::Header);
    field(&mut grid, "F8:G9", &form.public_transport);

    label(&mut grid, "A10:G10", "출 장 자", CellRole::SectionHeader);
    label(&mut grid, "A11:C11", "직급", CellRole::Header);
    label(&mut grid, "D11", "성명", CellRole::Header);
    label(&mut grid, "E11:F11", "계좌번호", CellRole::Header);
    label(&mut grid, "G11", "비고", CellRole::Header);

    for slot in 0..APPLICATION_TRAVELER_ROWS {
        let row = grid.advance();
        let traveler = form.travelers.get(slot);

        grid.place(
            CellRange::row_span(row, 1, 3),
            traveler_value(traveler.map(|t| t.position.as_str())),
            CellRole::DataRow,
        );
        grid.place(
            CellRange::row_span(row, 4, 4),
            traveler_value(traveler.map(|t| t.name.as_str())),
            CellRole::DataRow,
        );
        grid.place(
            CellRange::row_span(row, 5, 6),
            traveler_value(traveler.map(|t| t.account.as_str())),
            CellRole::DataRow,
        );
        grid.place(
            CellRange::row_span(row, 7, 7),
            traveler_value(traveler.map(|t| t.note.as_str())),
            CellRole::DataRow,
        );
    }

    let trailer = [
        ("A20:G20", "위와 같이 출장을 신청합니다.".to_string()),
        ("A21:G21", issued_on.format("%Y년 %m월 %d일").to_string()),
        ("A22:G22", organization.formal_name.clone()),
    ];
    for (a1, text) in trailer {
        label(&mut grid, a1, &text, CellRole::Trailer);
    }

    grid
}

fn application_dimensions() -> SheetDimensions {
    let mut row_heights: BTreeMap<u32, f64> = ROW_HEIGHTS.into_iter().collect();
    for row in FIRST_TRAVELER_ROW..FIRST_TRAVELER_ROW + APPLICATION_TRAVELER_ROWS as u32 {
        row_heights.insert(row, TRAVELER_ROW_HEIGHT);
    }
    let column_widths = (1..=APPLICATION_COLUMNS)
        .map(|col| {
            let width = if col <= 4 {
                NARROW_COLUMN_WIDTH
            } else {
                WIDE_COLUMN_WIDTH
            };
            (col, width)
        })
        .collect();

    SheetDimensions {
        row_heights,
        column_widths,
    }
}

/// Lays out, styles and sets up printing for a trip application.
pub fn synthesize_application(
    form: &ApplicationForm,
    organization: &Organization,
    issued_on: NaiveDate,
) -> SheetDocument {
    let grid = layout_application(form, organization, issued_on);
    let block = CellRange::new(1, 1, APPLICATION_ROWS, APPLICATION_COLUMNS);
    let styles = block
        .cells()
        .map(|at| (at, application_cell_style(at, grid.role_at(at))))
        .collect();

    SheetDocument {
        name: SHEET_NAME.to_string(),
        grid,
        styles,
        default_style: CellStyle::regular(11.0),
        dimensions: application_dimensions(),
        page: PageSetup {
            margins: Margins {
                left: 0.7,
                right: 0.7,
                top: 0.8,
                bottom: 0.8,
                header: 0.3,
                footer: 0.3,
            },
            fit_to_width: 1,
            fit_to_height: 1,
            print_area: block,
            row_breaks: Vec::new(),
            center_horizontally: true,
            center_vertically: true,
            repeat_rows: Some((1, 1)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Traveler;

    fn form(travelers: usize) -> ApplicationForm {
        ApplicationForm {
            project_manager: "최태섭".to_string(),
            project_name: "해상풍력 환경 모니터링".to_string(),
            destination: "제주".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 22).unwrap(),
            purpose: "해양 조사".to_string(),
            company_car: "스타렉스".to_string(),
            public_transport: String::new(),
            travelers: (0..travelers)
                .map(|i| Traveler {
                    position: "선임연구원".to_string(),
                    name: format!("출장자{i}"),
                    account: "급여 계좌".to_string(),
                    note: String::new(),
                })
                .collect(),
        }
    }

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn text<'a>(grid: &'a ReportGrid, a1: &str) -> Option<&'a str> {
        grid.content_at(a1).and_then(CellContent::as_text)
    }

    #[test]
    fn test_fixed_fields() {
        let grid = layout_application(&form(1), &Organization::default(), issued());

        assert_eq!(text(&grid, "A1"), Some("출 장 신 청 서"));
        assert_eq!(text(&grid, "B4"), Some("㈜엔이비"));
        assert_eq!(text(&grid, "F4"), Some("최태섭"));
        assert_eq!(text(&grid, "B6"), Some("2025.05.20 ~ 05.22(2박 3일)"));
        assert_eq!(text(&grid, "F6"), Some("제주"));
        assert_eq!(text(&grid, "D8"), Some("스타렉스"));
        assert_eq!(text(&grid, "F8"), None);
        assert_eq!(text(&grid, "A21"), Some("2025년 05월 01일"));
        assert_eq!(text(&grid, "A22"), Some("주 식 회 사 엔 이 비"));
    }

    #[test]
    fn test_traveler_rows_are_always_merged() {
        let grid = layout_application(&form(2), &Organization::default(), issued());

        assert_eq!(text(&grid, "A12"), Some("선임연구원"));
        assert_eq!(text(&grid, "D13"), Some("출장자1"));
        assert_eq!(text(&grid, "E12"), Some("급여 계좌"));
        assert_eq!(text(&grid, "A14"), None);

        for row in 12..=19 {
            let a = CellRange::row_span(row, 1, 3);
            let e = CellRange::row_span(row, 5, 6);
            assert!(grid.merges().contains(&a), "row {row} A:C not merged");
            assert!(grid.merges().contains(&e), "row {row} E:F not merged");
        }
    }

    #[test]
    fn test_blank_fields_keep_their_merge() {
        let grid = layout_application(&form(1), &Organization::default(), issued());
        assert!(grid.merges().iter().any(|m| m.to_string() == "F8:G9"));
    }

    #[test]
    fn test_document_page_setup() {
        let document = synthesize_application(&form(1), &Organization::default(), issued());

        assert_eq!(document.page.print_area.to_string(), "A1:G22");
        assert_eq!(document.page.repeat_rows, Some((1, 1)));
        assert!(document.page.center_vertically);
        assert_eq!(document.dimensions.row_heights.get(&7), Some(&160.0));
        assert_eq!(document.dimensions.row_heights.get(&15), Some(&32.0));
        assert_eq!(document.dimensions.column_widths.get(&4), Some(&15.0));
        assert_eq!(document.dimensions.column_widths.get(&5), Some(&19.0));
    }
}
