use crate::error::Error;

/// Text lines advance by this fraction of the font size (pt), in mm.
pub const LINE_HEIGHT_FACTOR: f32 = 0.4;

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Mono,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    /// `x` is the centre of the line.
    Center,
}

/// A literal two-dimensional table plus the hints the table primitive needs.
#[derive(Clone, Debug)]
pub struct TableSpec {
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    /// Width hints in mm, one per column.
    pub column_widths: Vec<f32>,
    /// Page margin kept around the table, including on continuation pages.
    pub margin: f32,
    pub font_size: f32,
    pub head_fill: Option<[u8; 3]>,
    pub alternate_fill: Option<[u8; 3]>,
}

/// Drawing and paging capability the report layout runs against.
///
/// Units are millimetres with the origin at the top-left corner of the page;
/// `y` grows downwards and is the baseline of the first text line. Page
/// indices passed to [`Canvas::set_active_page`] are 1-based.
pub trait Canvas {
    fn page_size(&self) -> (f32, f32);

    /// Split `text` into the lines it occupies at `max_width`. The measured
    /// line count of a block is the length of the returned vector.
    fn wrap_text(&self, text: &str, max_width: f32, font_size: f32, font: FontStyle)
    -> Vec<String>;

    fn write_text(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        font_size: f32,
        font: FontStyle,
        align: TextAlign,
    ) -> Result<(), Error>;

    /// Append a blank page and make it the active one.
    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    fn set_active_page(&mut self, index: usize) -> Result<(), Error>;

    /// Draw `table` starting at `start_y` on the active page, breaking onto new
    /// pages as needed. Returns the `y` just below the last row; the active
    /// page is left on the page where the table ended.
    fn draw_table(&mut self, table: &TableSpec, start_y: f32) -> Result<f32, Error>;
}
