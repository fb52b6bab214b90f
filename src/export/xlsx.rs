// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::excel_date::parse_to_excel_date;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

const HEADER_ROW: u32 = 2;

/// Built-in report table: title line, styled header, banded rows,
/// frozen header and auto column widths. Returns the workbook bytes.
pub fn render_table(
    title: &str,
    headers: &[String],
    rows: &[Vec<String>],
    date_format: &str,
) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let title_format = Format::new().set_bold().set_font_size(14);
    worksheet.write_with_format(0, 0, title, &title_format)?;

    if headers.is_empty() {
        worksheet.write(HEADER_ROW, 0, "No data available")?;
        return Ok(workbook.save_to_buffer()?);
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(HEADER_ROW, col as u16, header.as_str(), &header_format)?;
    }

    worksheet.set_freeze_panes(HEADER_ROW + 1, 0)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(h.as_str())).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in rows.iter().enumerate() {
        let row = HEADER_ROW + 1 + row_index as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate().take(headers.len()) {
            write_cell(worksheet, row, col as u16, value, band_color, date_format)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Dates and times become Excel serials, decimals become numbers, the rest text.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    date_format: &str,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s, date_format) {
        worksheet.write_with_format(row, col, serial, &base.set_num_format(num_format))?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>() {
        worksheet.write_with_format(row, col, num, &base.set_align(FormatAlign::Right))?;
        return Ok(());
    }

    worksheet.write_with_format(row, col, s, &base)?;
    Ok(())
}
