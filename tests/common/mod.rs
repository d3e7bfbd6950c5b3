#![allow(dead_code)]

use std::path::{Path, PathBuf};

use forensic_report::{
    Canvas, Entity, Error, FontStyle, ReportOptions, ReportRequest, Risk, SearchResult, TableSpec,
    TextAlign,
};

pub const FOOTER_SUFFIX: &str = " - EOFDR Copilot Forensic Report";

#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    pub page: usize,
    pub lines: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub font: FontStyle,
    pub align: TextAlign,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableOp {
    pub start_page: usize,
    pub end_page: usize,
    pub start_y: f32,
    pub end_y: f32,
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Text(TextOp),
    Table(TableOp),
}

/// Canvas with fixed-pitch metrics that records everything written to it.
/// Every character is `font_size * 0.2` mm wide; table rows are `ROW_HEIGHT`.
pub struct RecordingCanvas {
    pub width: f32,
    pub height: f32,
    pub pages: usize,
    pub active: usize,
    pub ops: Vec<Op>,
    /// `write_text` fails when a line contains this marker.
    pub fail_on: Option<String>,
}

pub const ROW_HEIGHT: f32 = 6.0;

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_size(210.0, 297.0)
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        RecordingCanvas {
            width,
            height,
            pages: 1,
            active: 1,
            ops: Vec::new(),
            fail_on: None,
        }
    }

    pub fn texts(&self) -> Vec<&TextOp> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t) => Some(t),
                Op::Table(_) => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&TableOp> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Table(t) => Some(t),
                Op::Text(_) => None,
            })
            .collect()
    }

    /// Body text, i.e. everything but the page footers.
    pub fn body_texts(&self) -> Vec<&TextOp> {
        self.texts()
            .into_iter()
            .filter(|t| !t.lines.iter().any(|l| l.ends_with(FOOTER_SUFFIX)))
            .collect()
    }

    pub fn footers(&self) -> Vec<&TextOp> {
        self.texts()
            .into_iter()
            .filter(|t| t.lines.iter().any(|l| l.ends_with(FOOTER_SUFFIX)))
            .collect()
    }

    pub fn all_lines(&self) -> Vec<String> {
        self.texts()
            .iter()
            .flat_map(|t| t.lines.iter().cloned())
            .collect()
    }

    pub fn has_line(&self, line: &str) -> bool {
        self.texts().iter().any(|t| t.lines.iter().any(|l| l == line))
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn wrap_text(
        &self,
        text: &str,
        max_width: f32,
        font_size: f32,
        _font: FontStyle,
    ) -> Vec<String> {
        let per_line = ((max_width / (font_size * 0.2)).floor() as usize).max(1);
        let mut lines = Vec::new();
        for source in text.split('\n') {
            let chars: Vec<char> = source.chars().collect();
            if chars.is_empty() {
                lines.push(String::new());
                continue;
            }
            for chunk in chars.chunks(per_line) {
                lines.push(chunk.iter().collect());
            }
        }
        lines
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
        if let Some(marker) = &self.fail_on {
            if lines.iter().any(|l| l.contains(marker.as_str())) {
                return Err(Error::Render(format!("cannot draw {marker}")));
            }
        }
        self.ops.push(Op::Text(TextOp {
            page: self.active,
            lines: lines.to_vec(),
            x,
            y,
            font_size,
            font,
            align,
        }));
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages += 1;
        self.active = self.pages;
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn set_active_page(&mut self, index: usize) -> Result<(), Error> {
        if index == 0 || index > self.pages {
            return Err(Error::Render(format!("no page {index}")));
        }
        self.active = index;
        Ok(())
    }

    fn draw_table(&mut self, table: &TableSpec, start_y: f32) -> Result<f32, Error> {
        let start_page = self.active;
        let bottom = self.height - table.margin;
        let mut y = start_y;
        if y + 2.0 * ROW_HEIGHT > bottom {
            self.add_page();
            y = table.margin;
        }
        y += ROW_HEIGHT; // header
        for _ in &table.body {
            if y + ROW_HEIGHT > bottom {
                self.add_page();
                y = table.margin + ROW_HEIGHT;
            }
            y += ROW_HEIGHT;
        }
        self.ops.push(Op::Table(TableOp {
            start_page,
            end_page: self.active,
            start_y,
            end_y: y,
            head: table.head.clone(),
            body: table.body.clone(),
        }));
        Ok(y)
    }
}

pub fn result(id: &str, timestamp: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        sender: format!("sender-{id}"),
        receiver: format!("receiver-{id}"),
        app: "WhatsApp".to_string(),
        timestamp: timestamp.to_string(),
        text: format!("message body for {id}"),
        entities: vec![Entity {
            kind: "BTC".to_string(),
            value: format!("wallet-{id}"),
            risk: Risk::High,
        }],
    }
}

pub fn request(results: Vec<SearchResult>, timeline: bool, raw_dump: bool) -> ReportRequest {
    ReportRequest {
        query: "payments to crypto wallets".to_string(),
        mode: "natural".to_string(),
        query_id: "q_mock_1".to_string(),
        dataset: "mock_device".to_string(),
        total_results: results.len() as u64,
        selected_results: results,
        options: ReportOptions {
            include_timeline: timeline,
            include_raw_dump: raw_dump,
        },
        generated_at: "2025-01-16 09:00:00".to_string(),
    }
}

/// `n` results one minute apart.
pub fn many_results(n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| {
            result(
                &format!("r{}", i + 1),
                &format!("2025-01-15T{:02}:{:02}:00Z", 10 + i / 60, i % 60),
            )
        })
        .collect()
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new("tests/fixtures").join(name)
}

/// Output directory for generated artifacts: tests/output/<test>/
pub fn output_dir(test: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(test);
    std::fs::create_dir_all(&dir).expect("create output dir");
    dir
}
