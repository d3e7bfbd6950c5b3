mod canvas;
mod error;
mod fonts;
mod model;
mod pdf;
mod report;

pub use canvas::{Canvas, FontStyle, LINE_HEIGHT_FACTOR, TableSpec, TextAlign, line_height};
pub use error::Error;
pub use model::{
    Entity, PageSize, ReportConfig, ReportOptions, ReportRequest, ReportSummary, Risk,
    SearchResult,
};
pub use pdf::PdfCanvas;
pub use report::generate;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;

pub fn parse_request(input: &[u8]) -> Result<ReportRequest, Error> {
    Ok(serde_json::from_slice(input)?)
}

pub fn load_request(path: &Path) -> Result<ReportRequest, Error> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    parse_request(&bytes)
}

/// `forensic-report-<queryId>-<YYYY-MM-DD>.pdf`. Characters that cannot
/// appear in a file name (path separators included) become `_`, so the
/// artifact always lands directly in the output directory.
pub fn artifact_file_name(query_id: &str, date: NaiveDate) -> String {
    let id: String = query_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("forensic-report-{}-{}.pdf", id, date.format("%Y-%m-%d"))
}

/// Compose the report on a fresh [`PdfCanvas`] and serialise it.
pub fn render_report(request: &ReportRequest, config: &ReportConfig) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let mut canvas = PdfCanvas::new(config.page_size)
        .with_title(&config.title)
        .with_compression(config.compress_streams);
    let summary = generate(request, &mut canvas, config)?;
    let t_layout = t0.elapsed();

    let bytes = canvas.finish()?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, assemble={:.1}ms, total={:.1}ms ({} page(s), {} row(s), output {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        summary.page_count,
        summary.evidence_rows,
        bytes.len(),
    );

    Ok(bytes)
}

/// Render the report and write it into `dir` under [`artifact_file_name`].
/// Nothing is written unless rendering succeeds; a failed write removes the
/// partial file.
pub fn save_report(
    request: &ReportRequest,
    config: &ReportConfig,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, Error> {
    let bytes = render_report(request, config)?;
    let t0 = Instant::now();

    let path = dir.join(artifact_file_name(&request.query_id, date));
    if let Err(e) = std::fs::write(&path, &bytes) {
        if path.exists() {
            std::fs::remove_file(&path).ok();
        }
        return Err(Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        )));
    }

    log::info!(
        "Timing: write={:.1}ms ({})",
        t0.elapsed().as_secs_f64() * 1000.0,
        path.display()
    );
    Ok(path)
}
