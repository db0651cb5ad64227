//! Cell styles and their translation to xlsx formats.
//!
//! A style is chosen per cell from its row, column and [`CellRole`]; the
//! dispatch tables for the two documents live here so both synthesizers
//! share one vocabulary.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

use super::grid::{CellRef, CellRole};

/// Horizontal alignment. Every cell is vertically centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Cell border treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    /// No border.
    None,
    /// Thin border on all four sides.
    Thin,
    /// Thin border with a thick bottom edge, closing the first page.
    ThickBottom,
}

/// The visual style of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    /// Font size in points.
    pub font_size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Horizontal alignment.
    pub align: HorizontalAlign,
    /// Border treatment.
    pub border: BorderStyle,
}

impl CellStyle {
    /// A regular-weight, centered, bordered style at `font_size`.
    pub const fn regular(font_size: f64) -> Self {
        Self {
            font_size,
            bold: false,
            align: HorizontalAlign::Center,
            border: BorderStyle::Thin,
        }
    }

    /// The same style in bold.
    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// The same style right-aligned.
    pub const fn right_aligned(self) -> Self {
        Self {
            align: HorizontalAlign::Right,
            ..self
        }
    }

    /// The same style with another border.
    pub const fn with_border(self, border: BorderStyle) -> Self {
        Self { border, ..self }
    }

    /// Builds the xlsx format for this style. Text always wraps.
    pub fn to_format(&self, font_name: &str) -> Format {
        let align = match self.align {
            HorizontalAlign::Center => FormatAlign::Center,
            HorizontalAlign::Right => FormatAlign::Right,
        };
        let mut format = Format::new()
            .set_font_name(font_name)
            .set_font_size(self.font_size)
            .set_align(align)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        if self.bold {
            format = format.set_bold();
        }
        match self.border {
            BorderStyle::None => format,
            BorderStyle::Thin => format.set_border(FormatBorder::Thin),
            BorderStyle::ThickBottom => format
                .set_border(FormatBorder::Thin)
                .set_border_bottom(FormatBorder::Thick),
        }
    }
}

/// Row bands of an expense report that carry distinct borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportBands {
    /// First cost or employee row.
    pub first_data_row: u32,
    /// The blank spare row closing the data block.
    pub data_end_row: u32,
    /// The last row of the first printed page.
    pub page_break_row: u32,
}

/// Style of an expense-report cell.
pub fn report_cell_style(at: CellRef, role: Option<CellRole>, bands: &ReportBands) -> CellStyle {
    let border = if at.row == 1 || (at.row <= 3 && at.col <= 6) {
        BorderStyle::None
    } else if (bands.first_data_row..=bands.data_end_row).contains(&at.row) {
        BorderStyle::Thin
    } else if at.row == bands.page_break_row {
        BorderStyle::ThickBottom
    } else if at.row > bands.page_break_row {
        BorderStyle::None
    } else {
        BorderStyle::Thin
    };

    let base = match role {
        Some(CellRole::Title) => CellStyle::regular(24.0).bold(),
        Some(CellRole::UnitLabel) => CellStyle::regular(8.0).right_aligned(),
        Some(CellRole::Trailer) => CellStyle::regular(16.0).bold(),
        _ => CellStyle::regular(10.0),
    };
    base.with_border(border)
}

/// Style of a trip-application cell.
pub fn application_cell_style(at: CellRef, role: Option<CellRole>) -> CellStyle {
    let border = match at.row {
        1 => BorderStyle::None,
        2..=3 if at.col >= 4 => BorderStyle::Thin,
        2..=3 => BorderStyle::None,
        4..=19 => BorderStyle::Thin,
        _ => BorderStyle::None,
    };

    let base = match role {
        Some(CellRole::Title) => CellStyle::regular(20.0).bold(),
        Some(CellRole::Header) => CellStyle::regular(10.0).bold(),
        Some(CellRole::SectionHeader) => CellStyle::regular(13.0).bold(),
        Some(CellRole::Trailer) => CellStyle::regular(14.0).bold(),
        _ => CellStyle::regular(11.0),
    };
    base.with_border(border)
}
