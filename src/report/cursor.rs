use crate::canvas::{Canvas, FontStyle, TableSpec, TextAlign, line_height};
use crate::error::Error;

pub(crate) const MARGIN_TOP: f32 = 20.0;
pub(crate) const MARGIN_BOTTOM: f32 = 20.0;
pub(crate) const MARGIN_LEFT: f32 = 20.0;

/// Running write position for one generation run. Every page break in the
/// report body goes through [`LayoutState::reserve`].
pub(crate) struct LayoutState {
    pub(crate) y: f32,
    pub(crate) page_width: f32,
    pub(crate) page_height: f32,
    pub(crate) page_index: usize, // 1-based
}

impl LayoutState {
    pub(crate) fn new(canvas: &mut impl Canvas) -> Result<Self, Error> {
        let (page_width, page_height) = canvas.page_size();
        if !(page_width > 2.0 * MARGIN_LEFT && page_height > MARGIN_TOP + MARGIN_BOTTOM) {
            return Err(Error::Render(format!(
                "page of {page_width}x{page_height}mm leaves no room inside the margins"
            )));
        }
        if canvas.page_count() == 0 {
            canvas.add_page();
        }
        Ok(LayoutState {
            y: MARGIN_TOP,
            page_width,
            page_height,
            page_index: canvas.page_count(),
        })
    }

    pub(crate) fn bottom(&self) -> f32 {
        self.page_height - MARGIN_BOTTOM
    }

    pub(crate) fn content_width(&self) -> f32 {
        self.page_width - 2.0 * MARGIN_LEFT
    }

    fn at_page_top(&self) -> bool {
        (self.y - MARGIN_TOP).abs() < 0.01
    }

    /// Break to a new page when `height` does not fit below the cursor. A
    /// cursor already at the top of a page never breaks again.
    pub(crate) fn reserve(&mut self, canvas: &mut impl Canvas, height: f32) -> bool {
        if self.at_page_top() || self.y + height <= self.bottom() {
            return false;
        }
        canvas.add_page();
        self.page_index = canvas.page_count();
        log::debug!(
            "page break at y={:.1} for {height:.1}mm, now on page {}",
            self.y,
            self.page_index
        );
        self.y = MARGIN_TOP;
        true
    }

    pub(crate) fn advance(&mut self, height: f32) {
        self.y += height;
    }

    /// How many lines of `line_h` fit between the cursor and the bottom margin.
    fn lines_that_fit(&self, line_h: f32) -> usize {
        if line_h <= 0.0 {
            return usize::MAX;
        }
        ((self.bottom() - self.y) / line_h + 1e-4).floor().max(0.0) as usize
    }
}

/// Wrap `text` to `max_width` and write it at the cursor. Lines that do not
/// fit on the current page continue at the top of the next one. Returns the
/// cursor `y` after the block.
pub(crate) fn wrapped_text(
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
    text: &str,
    x: f32,
    max_width: f32,
    font_size: f32,
    font: FontStyle,
) -> Result<f32, Error> {
    let lines = canvas.wrap_text(text, max_width, font_size, font);
    let line_h = line_height(font_size);
    let mut rest = &lines[..];
    while !rest.is_empty() {
        state.reserve(canvas, line_h);
        let fit = state.lines_that_fit(line_h).clamp(1, rest.len());
        let (now, later) = rest.split_at(fit);
        canvas.write_text(now, x, state.y, font_size, font, TextAlign::Left)?;
        state.advance(now.len() as f32 * line_h);
        rest = later;
    }
    Ok(state.y)
}

pub(crate) const KEY_VALUE_FONT_SIZE: f32 = 10.0;

/// `"<label>: <value>"` across the full content width.
pub(crate) fn key_value(
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
    label: &str,
    value: &str,
) -> Result<f32, Error> {
    let width = state.content_width();
    wrapped_text(
        state,
        canvas,
        &format!("{label}: {value}"),
        MARGIN_LEFT,
        width,
        KEY_VALUE_FONT_SIZE,
        FontStyle::Regular,
    )
}

/// A single unwrapped line followed by a fixed gap of `advance_by`.
pub(crate) fn single_line(
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
    text: &str,
    x: f32,
    font_size: f32,
    font: FontStyle,
    align: TextAlign,
    advance_by: f32,
) -> Result<f32, Error> {
    state.reserve(canvas, line_height(font_size));
    canvas.write_text(&[text.to_string()], x, state.y, font_size, font, align)?;
    state.advance(advance_by);
    Ok(state.y)
}

/// Hand the table to the canvas and adopt whatever page and `y` it ends on.
pub(crate) fn table(
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
    spec: &TableSpec,
) -> Result<f32, Error> {
    let pages_before = canvas.page_count();
    let y_after = canvas.draw_table(spec, state.y)?;
    state.page_index = canvas.page_count();
    state.y = y_after;
    if state.page_index > pages_before {
        log::debug!(
            "table of {} row(s) spilled onto {} more page(s)",
            spec.body.len(),
            state.page_index - pages_before
        );
    }
    Ok(state.y)
}
