//! Layout of the expense report ("출장복명서").
//!
//! The report has a fixed 12-row header, a variable data block starting at
//! row 13 (cost groups first, then travelers), a totals row, the submission
//! trailer, and the extra-duty block that closes the first printed page.
//!
//! Header merges are emitted even when a value is blank, so the form keeps
//! its shape regardless of what was filled in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::{CostGroup, group_additional_costs};
use crate::config::Organization;
use crate::models::{AdditionalCostEntry, EmployeeTripEntry, ExtraDutyDays, TripMetadata};

use super::grid::{CellContent, CellRange, CellRef, CellRole, ReportGrid};
use super::page::{Margins, PageSetup, SheetDimensions, auto_dimensions};
use super::style::{CellStyle, ReportBands, report_cell_style};
use super::writer::SheetDocument;

/// First row of the data block.
pub const FIRST_DATA_ROW: u32 = 13;
/// Columns A through L.
pub const REPORT_COLUMNS: u16 = 12;
/// The styled block is never shorter than this.
pub const MIN_STYLED_ROWS: u32 = 50;
/// Payment label printed on every traveler row.
pub const ACCOUNT_TRANSFER: &str = "계좌이체";

const REPORT_MARGIN_INCH: f64 = 0.65;
const SHEET_NAME: &str = "출장복명서";

const HEADER_ROW_HEIGHTS: [(u32, f64); 12] = [
    (1, 40.0),
    (2, 18.0),
    (3, 50.0),
    (4, 18.0),
    (5, 25.0),
    (6, 18.0),
    (7, 18.0),
    (8, 60.0),
    (9, 15.0),
    (10, 20.0),
    (11, 18.0),
    (12, 18.0),
];
const DATA_ROW_HEIGHT: f64 = 20.0;
const TRAILER_ROW_HEIGHT: f64 = 22.0;

const EXTRA_DUTY_LABELS: [&str; 3] = [
    "휴일출장 (토,일요일,공휴일)",
    "특수(선박탑승,해양조사)",
    "위험(다이빙,해저조사)",
];
const EXTRA_DUTY_NOTE: &str = "*특수, 위험 출장시\n사진파일 첨부.\n*추가수당은 지급신청서에 기입하지 않음.";
const PHOTO_NOTICE: &str = "* 2페이지에 선박 승선 증빙 사진 첨부";

/// Row positions of the variable part of a report, all derived from the
/// row after the last data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportGeometry {
    /// The last cost or traveler row, if any.
    pub last_data_row: Option<u32>,
    /// The blank spare row after the data block.
    pub data_end_row: u32,
    /// The "합계" row.
    pub totals_row: u32,
    /// First of the three trailer rows.
    pub trailer_row: u32,
    /// First of the three extra-duty rows.
    pub extra_duty_row: u32,
    /// The last row of the first printed page.
    pub page_break_row: u32,
    /// The photo notice row on page two, when one is printed.
    pub notice_row: Option<u32>,
}

impl ReportGeometry {
    /// Derives every position from `cursor`, the row after the data block.
    ///
    /// # Example
    ///
    /// ```
    /// use trip_paperwork::synthesis::ReportGeometry;
    ///
    /// let geometry = ReportGeometry::from_cursor(16, false);
    /// assert_eq!(geometry.last_data_row, Some(15));
    /// assert_eq!(geometry.totals_row, 17);
    /// assert_eq!(geometry.extra_duty_row, 22);
    /// assert_eq!(geometry.page_break_row, 25);
    /// ```
    pub fn from_cursor(cursor: u32, with_notice: bool) -> Self {
        let extra_duty_row = cursor + 6;
        let page_break_row = extra_duty_row + 3;
        Self {
            last_data_row: (cursor > FIRST_DATA_ROW).then(|| cursor - 1),
            data_end_row: cursor,
            totals_row: cursor + 1,
            trailer_row: cursor + 2,
            extra_duty_row,
            page_break_row,
            notice_row: with_notice.then_some(page_break_row + 1),
        }
    }

    /// The last row covered by styling and the print area.
    pub fn last_styled_row(&self) -> u32 {
        self.notice_row
            .unwrap_or(self.page_break_row)
            .max(MIN_STYLED_ROWS)
    }

    fn bands(&self) -> ReportBands {
        ReportBands {
            first_data_row: FIRST_DATA_ROW,
            data_end_row: self.data_end_row,
            page_break_row: self.page_break_row,
        }
    }
}

/// A laid-out expense report before styling.
#[derive(Debug, Clone)]
pub struct ExpenseReportLayout {
    /// Cells and merges.
    pub grid: ReportGrid,
    /// Row positions of the variable part.
    pub geometry: ReportGeometry,
    /// The cost groups, in the order they were written.
    pub groups: Vec<CostGroup>,
}

fn place(grid: &mut ReportGrid, range: &str, content: impl Into<CellContent>, role: CellRole) {
    match CellRange::parse(range) {
        Ok(range) => grid.place(range, Some(content.into()), role),
        Err(error) => tracing::warn!(range, error = %error, "Skipping invalid range"),
    }
}

fn layout_header(grid: &mut ReportGrid, trip: Option<&TripMetadata>, organization: &Organization) {
    let (manager, project, departure, arrival, destination, purpose) = match trip {
        Some(t) => (
            t.project_manager.clone(),
            t.project_name.clone(),
            t.departure_label(),
            t.return_label(),
            t.destination.clone(),
            t.purpose.clone(),
        ),
        None => Default::default(),
    };

    place(grid, "A1:L1", "출 장 복 명 서", CellRole::Title);

    place(grid, "G2:H2", "담당자", CellRole::Signature);
    place(grid, "I2:J2", "책임연구원", CellRole::Signature);
    place(grid, "K2:L2", "대표이사", CellRole::Signature);
    for range in ["G3:H3", "I3:J3", "K3:L3"] {
        if let Ok(range) = CellRange::parse(range) {
            grid.place(range, None, CellRole::Signature);
        }
    }

    place(grid, "A4:B4", "소       속", CellRole::Header);
    place(grid, "C4:F4", organization.short_name.as_str(), CellRole::Field);
    place(grid, "G4:H4", "과제책임자", CellRole::Header);
    place(grid, "I4:L4", manager, CellRole::Field);
    place(grid, "A5:B5", "연구과제명", CellRole::Header);
    place(grid, "C5:L5", project, CellRole::Field);
    place(grid, "A6:B6", "출발시간", CellRole::Header);
    place(grid, "C6:F6", departure, CellRole::Field);
    place(grid, "A7:B7", "도착시간", CellRole::Header);
    place(grid, "C7:F7", arrival, CellRole::Field);
    place(grid, "G6:H7", "출장지", CellRole::Header);
    place(grid, "I6:L7", destination, CellRole::Field);
    place(grid, "A8:B8", "출장결과", CellRole::Header);
    place(grid, "C8:L8", purpose, CellRole::Field);

    place(grid, "A9:L9", "(단위:원)", CellRole::UnitLabel);
    place(grid, "A10:L10", "지 급 신 청", CellRole::Header);

    place(grid, "A11:A12", "성명", CellRole::Header);
    place(grid, "B11:B12", "결제구분", CellRole::Header);
    place(grid, "D11:E12", "직책", CellRole::Header);
    place(grid, "F11:H11", "일비", CellRole::Header);
    place(grid, "F12", "일", CellRole::Header);
    place(grid, "G12", "일당", CellRole::Header);
    place(grid, "H12", "금액", CellRole::Header);
    place(grid, "I11:K11", "식비", CellRole::Header);
    place(grid, "I12", "일", CellRole::Header);
    place(grid, "J12", "일당", CellRole::Header);
    place(grid, "K12", "금액", CellRole::Header);
    place(grid, "L11:L12", "소계", CellRole::Header);
}

fn layout_cost_group(grid: &mut ReportGrid, group: &CostGroup) {
    let row = grid.advance();
    grid.write(CellRef::new(row, 1), group.item.as_str(), CellRole::DataRow);
    grid.write(CellRef::new(row, 2), group.payment_method_text(), CellRole::DataRow);
    let amount = match group.summation_formula() {
        Some(formula) => CellContent::Formula(formula),
        None => CellContent::Number(group.total()),
    };
    grid.write(CellRef::new(row, 12), amount, CellRole::DataRow);
}

fn layout_employee(grid: &mut ReportGrid, entry: &EmployeeTripEntry) {
    let row = grid.advance();
    let at = |col: u16| CellRef::new(row, col);

    grid.write(at(1), entry.employee_name.as_str(), CellRole::DataRow);
    grid.write(at(2), ACCOUNT_TRANSFER, CellRole::DataRow);
    grid.place(
        CellRange::row_span(row, 4, 5),
        Some(entry.position.as_str().into()),
        CellRole::DataRow,
    );
    grid.write(at(6), entry.trip_days, CellRole::DataRow);
    grid.write(at(7), entry.daily_allowance_rate, CellRole::DataRow);
    grid.write(at(8), CellContent::Formula(format!("=F{row}*G{row}")), CellRole::DataRow);
    grid.write(at(9), entry.trip_days, CellRole::DataRow);
    grid.write(at(10), entry.meal_rate, CellRole::DataRow);
    grid.write(at(11), CellContent::Formula(format!("=I{row}*J{row}")), CellRole::DataRow);
    grid.write(at(12), CellContent::Formula(format!("=H{row}+K{row}")), CellRole::DataRow);
}

fn extra_duty_value(days: u8) -> String {
    if days > 0 {
        format!("{days}일")
    } else {
        "0".to_string()
    }
}

fn layout_closing(
    grid: &mut ReportGrid,
    geometry: &ReportGeometry,
    extra_duty: ExtraDutyDays,
    organization: &Organization,
    issued_on: NaiveDate,
) {
    let totals = geometry.totals_row;
    grid.write(CellRef::new(totals, 1), "합계", CellRole::Totals);
    let sum = match geometry.last_data_row {
        Some(last) => CellContent::Formula(format!("=SUM(L{FIRST_DATA_ROW}:L{last})")),
        None => CellContent::Number(Decimal::ZERO),
    };
    grid.write(CellRef::new(totals, 12), sum, CellRole::Totals);

    let trailer = [
        "위와 같이 출장 복명서를 제출합니다.".to_string(),
        issued_on.format("%Y년 %m월 %d일").to_string(),
        organization.formal_name.clone(),
    ];
    for (offset, line) in (0u32..).zip(trailer) {
        let row = geometry.trailer_row + offset;
        grid.place(
            CellRange::row_span(row, 1, REPORT_COLUMNS),
            Some(line.into()),
            CellRole::Trailer,
        );
    }

    let e = geometry.extra_duty_row;
    grid.place(
        CellRange::new(e, 1, e + 2, 2),
        Some("추가수당\n(해당시)".into()),
        CellRole::ExtraDuty,
    );
    let counts = [extra_duty.holiday(), extra_duty.special(), extra_duty.dangerous()];
    for (offset, (label, days)) in (0u32..).zip(EXTRA_DUTY_LABELS.iter().zip(counts)) {
        let row = e + offset;
        grid.place(
            CellRange::row_span(row, 3, 6),
            Some((*label).into()),
            CellRole::ExtraDuty,
        );
        grid.place(
            CellRange::row_span(row, 7, 8),
            Some(extra_duty_value(days).into()),
            CellRole::ExtraDuty,
        );
    }
    grid.place(
        CellRange::new(e, 10, e + 2, 12),
        Some(EXTRA_DUTY_NOTE.into()),
        CellRole::ExtraDuty,
    );

    if let Some(row) = geometry.notice_row {
        grid.place(
            CellRange::row_span(row, 1, REPORT_COLUMNS),
            Some(PHOTO_NOTICE.into()),
            CellRole::Notice,
        );
    }
    grid.set_page_break(geometry.page_break_row);
}

/// Lays out an expense report.
///
/// Header metadata and extra-duty counts come from the first traveler.
/// Cost groups are written before travelers, and every computed amount is a
/// formula so the sheet recalculates when edited.
pub fn layout_expense_report(
    employees: &[EmployeeTripEntry],
    costs: &[AdditionalCostEntry],
    organization: &Organization,
    issued_on: NaiveDate,
) -> ExpenseReportLayout {
    let trip = employees.first().map(|entry| &entry.trip);
    let mut grid = ReportGrid::new(FIRST_DATA_ROW);

    layout_header(&mut grid, trip, organization);

    let groups = group_additional_costs(costs);
    for group in &groups {
        layout_cost_group(&mut grid, group);
    }
    for entry in employees {
        layout_employee(&mut grid, entry);
    }

    let extra_duty = trip.map(|t| t.extra_duty).unwrap_or_default();
    let geometry =
        ReportGeometry::from_cursor(grid.cursor(), extra_duty.requires_photo_attachment());
    layout_closing(&mut grid, &geometry, extra_duty, organization, issued_on);

    ExpenseReportLayout {
        grid,
        geometry,
        groups,
    }
}

fn report_dimensions(geometry: &ReportGeometry, last_row: u32) -> SheetDimensions {
    let auto = auto_dimensions(REPORT_COLUMNS, REPORT_MARGIN_INCH);
    let header: BTreeMap<u32, f64> = HEADER_ROW_HEIGHTS.into_iter().collect();

    let row_heights = (1..=last_row)
        .map(|row| {
            let height = if let Some(height) = header.get(&row) {
                *height
            } else if (FIRST_DATA_ROW..=geometry.totals_row).contains(&row) {
                DATA_ROW_HEIGHT
            } else if (geometry.trailer_row..geometry.trailer_row + 3).contains(&row) {
                TRAILER_ROW_HEIGHT
            } else {
                auto.row_height
            };
            (row, height)
        })
        .collect();
    let column_widths = (1..=REPORT_COLUMNS)
        .map(|col| (col, auto.column_width))
        .collect();

    SheetDimensions {
        row_heights,
        column_widths,
    }
}

/// Lays out, styles and paginates an expense report.
pub fn synthesize_expense_report(
    employees: &[EmployeeTripEntry],
    costs: &[AdditionalCostEntry],
    organization: &Organization,
    issued_on: NaiveDate,
) -> SheetDocument {
    let layout = layout_expense_report(employees, costs, organization, issued_on);
    let geometry = layout.geometry;
    let last_row = geometry.last_styled_row().max(layout.grid.last_row());
    let bands = geometry.bands();

    let styles = CellRange::new(1, 1, last_row, REPORT_COLUMNS)
        .cells()
        .map(|at| (at, report_cell_style(at, layout.grid.role_at(at), &bands)))
        .collect();

    SheetDocument {
        name: SHEET_NAME.to_string(),
        dimensions: report_dimensions(&geometry, last_row),
        page: PageSetup {
            margins: Margins::uniform(REPORT_MARGIN_INCH),
            fit_to_width: 1,
            fit_to_height: 2,
            print_area: CellRange::new(1, 1, last_row, REPORT_COLUMNS),
            row_breaks: vec![geometry.page_break_row],
            center_horizontally: true,
            center_vertically: false,
            repeat_rows: None,
        },
        grid: layout.grid,
        styles,
        default_style: CellStyle::regular(10.0),
    }
}
