mod cursor;
mod sections;

use crate::canvas::{Canvas, FontStyle, TextAlign};
use crate::error::Error;
use crate::model::{ReportConfig, ReportRequest, ReportSummary};

use cursor::LayoutState;

const FOOTER_FONT_SIZE: f32 = 8.0;
/// Footer baseline, measured up from the bottom edge of the page.
const FOOTER_OFFSET: f32 = 10.0;

/// Lay out `request` onto `canvas`, then stamp page footers.
///
/// The canvas is owned by the caller for the duration of the call and should
/// be fresh: the body starts at the top of its last page. On error the
/// canvas contents are incomplete and must be discarded.
pub fn generate<C: Canvas>(
    request: &ReportRequest,
    canvas: &mut C,
    config: &ReportConfig,
) -> Result<ReportSummary, Error> {
    let mut state = LayoutState::new(canvas)?;
    let counts = sections::compose(request, config, &mut state, canvas)?;
    let page_count = stamp_footers(canvas, &config.product_label)?;

    Ok(ReportSummary {
        page_count,
        evidence_rows: counts.evidence_rows,
        timeline_entries: counts.timeline_entries,
        raw_items: counts.raw_items,
    })
}

/// Second pass: only now is the final page count known.
fn stamp_footers<C: Canvas>(canvas: &mut C, product_label: &str) -> Result<usize, Error> {
    let (page_width, page_height) = canvas.page_size();
    let total = canvas.page_count();
    for page in 1..=total {
        canvas.set_active_page(page)?;
        canvas.write_text(
            &[footer_text(page, total, product_label)],
            page_width / 2.0,
            page_height - FOOTER_OFFSET,
            FOOTER_FONT_SIZE,
            FontStyle::Regular,
            TextAlign::Center,
        )?;
    }
    Ok(total)
}

fn footer_text(page: usize, total: usize, product_label: &str) -> String {
    format!("Page {page} of {total} - {product_label}")
}
