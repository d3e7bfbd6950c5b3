use crate::canvas::{Canvas, FontStyle, TableSpec, TextAlign, line_height};
use crate::error::Error;

use super::PdfCanvas;

const CELL_PADDING: f32 = 1.5; // mm
const HEAD_TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// Scale width hints down proportionally when they exceed the space between
/// the margins. Hints that already fit are used as given.
fn fit_columns(hints: &[f32], available: f32) -> Vec<f32> {
    let total: f32 = hints.iter().sum();
    if total <= available || total <= 0.0 {
        return hints.to_vec();
    }
    let scale = available / total;
    hints.iter().map(|w| w * scale).collect()
}

struct RowLayout {
    height: f32,
    cell_lines: Vec<Vec<String>>,
}

impl RowLayout {
    fn from_lines(cell_lines: Vec<Vec<String>>, line_h: f32) -> Self {
        let max_lines = cell_lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        RowLayout {
            height: max_lines as f32 * line_h + 2.0 * CELL_PADDING,
            cell_lines,
        }
    }

    /// Split after the first `n` lines of every cell.
    fn split_at(&self, n: usize, line_h: f32) -> (RowLayout, RowLayout) {
        let (now, later): (Vec<Vec<String>>, Vec<Vec<String>>) = self
            .cell_lines
            .iter()
            .map(|lines| {
                let cut = n.min(lines.len());
                (lines[..cut].to_vec(), lines[cut..].to_vec())
            })
            .unzip();
        (
            RowLayout::from_lines(now, line_h),
            RowLayout::from_lines(later, line_h),
        )
    }
}

fn layout_row(
    canvas: &PdfCanvas,
    cells: &[String],
    col_widths: &[f32],
    font_size: f32,
    font: FontStyle,
) -> RowLayout {
    let line_h = line_height(font_size);
    let cell_lines: Vec<Vec<String>> = cells
        .iter()
        .zip(col_widths)
        .map(|(text, w)| {
            let text_w = (w - 2.0 * CELL_PADDING).max(0.0);
            canvas.wrap_text(text, text_w, font_size, font)
        })
        .collect();
    RowLayout::from_lines(cell_lines, line_h)
}

fn draw_row(
    canvas: &mut PdfCanvas,
    layout: &RowLayout,
    col_widths: &[f32],
    left: f32,
    row_top: f32,
    font_size: f32,
    font: FontStyle,
    fill: Option<[u8; 3]>,
    text_color: Option<[u8; 3]>,
) -> Result<(), Error> {
    let row_w: f32 = col_widths.iter().sum();
    if let Some(color) = fill {
        canvas.fill_rect(left, row_top, row_w, layout.height, color);
    }
    // Baseline of the first line sits one cap height below the top padding.
    let baseline = row_top + CELL_PADDING + line_height(font_size) * 0.8;
    let mut cell_x = left;
    for (lines, w) in layout.cell_lines.iter().zip(col_widths) {
        canvas.place_text(
            lines,
            (cell_x + CELL_PADDING, baseline),
            font_size,
            font,
            TextAlign::Left,
            text_color,
        )?;
        cell_x += w;
    }
    Ok(())
}

pub(super) fn draw_table(
    canvas: &mut PdfCanvas,
    table: &TableSpec,
    start_y: f32,
) -> Result<f32, Error> {
    let ncols = table.head.len();
    if table.column_widths.len() != ncols {
        return Err(Error::Render(format!(
            "table has {ncols} column(s) but {} width hint(s)",
            table.column_widths.len()
        )));
    }
    if let Some((ri, row)) = table.body.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(Error::Render(format!(
            "table row {} has {} cell(s), expected {ncols}",
            ri + 1,
            row.len()
        )));
    }
    if !start_y.is_finite() {
        return Err(Error::Render(format!("invalid table start position {start_y}")));
    }

    let (page_width, page_height) = canvas.page_size();
    let col_widths = fit_columns(&table.column_widths, page_width - 2.0 * table.margin);
    let left = table.margin;
    let page_top = table.margin;
    let page_bottom = page_height - table.margin;

    let head = layout_row(canvas, &table.head, &col_widths, table.font_size, FontStyle::Bold);
    let rows: Vec<RowLayout> = table
        .body
        .iter()
        .map(|row| layout_row(canvas, row, &col_widths, table.font_size, FontStyle::Regular))
        .collect();

    let line_h = line_height(table.font_size);
    // Rows taller than this never fit on one page and are split by lines.
    let full_page = page_bottom - page_top - head.height;
    let min_row = line_h + 2.0 * CELL_PADDING;
    if full_page < min_row {
        return Err(Error::Render(format!(
            "page of {page_height}mm leaves no room for a table row"
        )));
    }

    // The header never ends up alone at the bottom of a page.
    let first_block = head.height
        + rows
            .first()
            .map_or(0.0, |r| if r.height > full_page { min_row } else { r.height });
    let mut slot_top = start_y;
    if slot_top > page_top && slot_top + first_block > page_bottom {
        canvas.add_page();
        slot_top = page_top;
    }

    draw_row(
        canvas,
        &head,
        &col_widths,
        left,
        slot_top,
        table.font_size,
        FontStyle::Bold,
        table.head_fill,
        Some(HEAD_TEXT_COLOR),
    )?;
    slot_top += head.height;

    for (ri, row) in rows.iter().enumerate() {
        let fill = if ri % 2 == 1 { table.alternate_fill } else { None };
        let mut split;
        let mut part = row;
        loop {
            let room = page_bottom - slot_top;
            if part.height <= room {
                break;
            }
            let at_page_top = (slot_top - (page_top + head.height)).abs() < 0.01;
            let fit = ((room - 2.0 * CELL_PADDING) / line_h + 1e-4).floor().max(0.0) as usize;
            if part.height > full_page && fit > 0 {
                let (now, later) = part.split_at(fit, line_h);
                log::debug!(
                    "TABLE row={} split after {} line(s) on page {}",
                    ri,
                    fit,
                    canvas.page_count()
                );
                draw_row(
                    canvas,
                    &now,
                    &col_widths,
                    left,
                    slot_top,
                    table.font_size,
                    FontStyle::Regular,
                    fill,
                    None,
                )?;
                split = later;
                part = &split;
            } else if at_page_top {
                break;
            } else {
                log::debug!(
                    "TABLE row={} row_h={:.2} breaks to page {}",
                    ri,
                    part.height,
                    canvas.page_count() + 1
                );
            }
            canvas.add_page();
            slot_top = page_top;
            draw_row(
                canvas,
                &head,
                &col_widths,
                left,
                slot_top,
                table.font_size,
                FontStyle::Bold,
                table.head_fill,
                Some(HEAD_TEXT_COLOR),
            )?;
            slot_top += head.height;
        }

        draw_row(
            canvas,
            part,
            &col_widths,
            left,
            slot_top,
            table.font_size,
            FontStyle::Regular,
            fill,
            None,
        )?;
        slot_top += part.height;
    }

    Ok(slot_top)
}
