mod layout;
mod table;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::canvas::{Canvas, FontStyle, TableSpec, TextAlign, line_height};
use crate::error::Error;
use crate::fonts::{FontEntry, FontSet};
use crate::model::PageSize;

use layout::{build_lines, mm_to_pt, render_lines};

/// [`Canvas`] backed by `pdf-writer`, drawing with the standard Helvetica and
/// Courier faces. Pages are held as open content streams until [`finish`]
/// so that earlier pages can still be written to.
///
/// [`finish`]: PdfCanvas::finish
pub struct PdfCanvas {
    page_width: f32,  // mm
    page_height: f32, // mm
    pages: Vec<Content>,
    active: usize, // 0-based
    fonts: FontSet,
    title: String,
    compress: bool,
}

impl PdfCanvas {
    /// A canvas with one blank page.
    pub fn new(page_size: PageSize) -> Self {
        let (page_width, page_height) = page_size.dimensions_mm();
        PdfCanvas {
            page_width,
            page_height,
            pages: vec![Content::new()],
            active: 0,
            fonts: FontSet::standard(),
            title: String::new(),
            compress: true,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    fn font(&self, style: FontStyle) -> &FontEntry {
        self.fonts.get(style)
    }

    /// Convert a top-down mm `y` into PDF user space.
    fn pdf_y(&self, y: f32) -> f32 {
        mm_to_pt(self.page_height - y)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, [r, g, b]: [u8; 3]) {
        let (px, py) = (mm_to_pt(x), self.pdf_y(y + h));
        let content = &mut self.pages[self.active];
        content.save_state();
        content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        content.rect(px, py, mm_to_pt(w), mm_to_pt(h));
        content.fill_nonzero();
        content.restore_state();
    }

    fn place_text(
        &mut self,
        lines: &[String],
        (x, y): (f32, f32),
        font_size: f32,
        font: FontStyle,
        align: TextAlign,
        color: Option<[u8; 3]>,
    ) -> Result<(), Error> {
        if !x.is_finite() || !y.is_finite() || !font_size.is_finite() || font_size <= 0.0 {
            return Err(Error::Render(format!(
                "cannot place text at ({x}, {y}) with font size {font_size}"
            )));
        }
        let baseline = self.pdf_y(y);
        let pitch = mm_to_pt(line_height(font_size));
        let entry = self.fonts.get(font);
        let content = &mut self.pages[self.active];
        if let Some([r, g, b]) = color {
            content.save_state();
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        }
        render_lines(content, lines, entry, font_size, mm_to_pt(x), baseline, pitch, align);
        if color.is_some() {
            content.restore_state();
        }
        Ok(())
    }

    /// Serialise every page into a complete PDF file.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();

        let font_pairs: Vec<(&str, Ref)> = self
            .fonts
            .all()
            .into_iter()
            .map(|entry| {
                let font_ref = alloc();
                pdf.type1_font(font_ref)
                    .base_font(Name(entry.base_font.as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                (entry.pdf_name, font_ref)
            })
            .collect();

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, c) in self.pages.into_iter().enumerate() {
            let raw = c.finish();
            if self.compress {
                let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
                pdf.stream(content_ids[i], &compressed)
                    .filter(Filter::FlateDecode);
            } else {
                pdf.stream(content_ids[i], raw.as_slice());
            }
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        let media_box = Rect::new(
            0.0,
            0.0,
            mm_to_pt(self.page_width),
            mm_to_pt(self.page_height),
        );
        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(media_box)
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }

        {
            let mut info = pdf.document_info(info_id);
            if !self.title.is_empty() {
                info.title(TextStr(&self.title));
            }
            info.producer(TextStr(concat!("forensic-report ", env!("CARGO_PKG_VERSION"))));
        }

        log::debug!(
            "PdfCanvas::finish: {n} page(s) in {:.1}ms",
            t0.elapsed().as_secs_f64() * 1000.0
        );

        Ok(pdf.finish())
    }
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    fn wrap_text(
        &self,
        text: &str,
        max_width: f32,
        font_size: f32,
        font: FontStyle,
    ) -> Vec<String> {
        build_lines(text, self.font(font), font_size, mm_to_pt(max_width.max(0.0)))
    }

    fn write_text(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        font_size: f32,
        font: FontStyle,
        align: TextAlign,
    ) -> Result<(), Error> {
        self.place_text(lines, (x, y), font_size, font, align, None)
    }

    fn add_page(&mut self) {
        self.pages.push(Content::new());
        self.active = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_active_page(&mut self, index: usize) -> Result<(), Error> {
        if index == 0 || index > self.pages.len() {
            return Err(Error::Render(format!(
                "page {index} does not exist (document has {} page(s))",
                self.pages.len()
            )));
        }
        self.active = index - 1;
        Ok(())
    }

    fn draw_table(&mut self, table: &TableSpec, start_y: f32) -> Result<f32, Error> {
        table::draw_table(self, table, start_y)
    }
}
