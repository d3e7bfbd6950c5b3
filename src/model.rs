use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    #[default]
    Low,
    Medium,
    High,
    /// Any other label; risk never drives layout.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub risk: Risk,
}

/// One selected evidence record, as produced by the search results view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub app: String,
    /// ISO-8601; kept verbatim so unparseable values survive into the report.
    pub timestamp: String,
    pub text: String,
    pub entities: Vec<Entity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportOptions {
    pub include_timeline: bool,
    #[serde(alias = "includeRawJson")]
    pub include_raw_dump: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_timeline: true,
            include_raw_dump: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportRequest {
    pub query: String,
    pub mode: String,
    pub query_id: String,
    pub dataset: String,
    pub total_results: u64,
    pub selected_results: Vec<SearchResult>,
    pub options: ReportOptions,
    /// Pre-formatted label, printed as-is.
    pub generated_at: String,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            mode: String::new(),
            query_id: String::new(),
            dataset: "unknown".to_string(),
            total_results: 0,
            selected_results: Vec::new(),
            options: ReportOptions::default(),
            generated_at: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// (width, height) in millimetres.
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub page_size: PageSize,
    pub title: String,
    pub product_label: String,
    pub compress_streams: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            title: "EOFDR Copilot - Forensic Report".to_string(),
            product_label: "EOFDR Copilot Forensic Report".to_string(),
            compress_streams: true,
        }
    }
}

/// What one `generate` call produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportSummary {
    pub page_count: usize,
    pub evidence_rows: usize,
    pub timeline_entries: usize,
    pub raw_items: usize,
}
