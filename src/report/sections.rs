use chrono::{DateTime, NaiveDateTime, Utc};

use crate::canvas::{Canvas, FontStyle, TableSpec, TextAlign};
use crate::error::Error;
use crate::model::{ReportConfig, ReportRequest, SearchResult};

use super::cursor::{
    KEY_VALUE_FONT_SIZE, LayoutState, MARGIN_LEFT, key_value, single_line, table, wrapped_text,
};

const TITLE_FONT_SIZE: f32 = 20.0;
const HEADING_FONT_SIZE: f32 = 14.0;
const TABLE_FONT_SIZE: f32 = 8.0;

/// Fixed lookahead before a section heading; not tied to the height of the
/// section's first line.
const HEADING_LOOKAHEAD: f32 = 50.0;
const TIMELINE_ITEM_LOOKAHEAD: f32 = 20.0;
const RAW_ITEM_LOOKAHEAD: f32 = 30.0;

const EVIDENCE_COLUMNS: [&str; 7] = ["#", "Sender", "Receiver", "App", "Timestamp", "Text", "Entities"];
const EVIDENCE_COLUMN_WIDTHS: [f32; 7] = [15.0, 30.0, 30.0, 25.0, 35.0, 40.0, 50.0];
const TEXT_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Default)]
pub(super) struct SectionCounts {
    pub(super) evidence_rows: usize,
    pub(super) timeline_entries: usize,
    pub(super) raw_items: usize,
}

/// Compose every section in document order. Optional sections are skipped
/// entirely when their option is off.
pub(super) fn compose(
    request: &ReportRequest,
    config: &ReportConfig,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<SectionCounts, Error> {
    let mut counts = SectionCounts::default();

    title(config, state, canvas)?;
    metadata(request, state, canvas)?;
    query_info(request, state, canvas)?;
    counts.evidence_rows = evidence_table(request, state, canvas)?;
    if request.options.include_timeline {
        counts.timeline_entries = timeline(request, state, canvas)?;
    }
    if request.options.include_raw_dump {
        counts.raw_items = raw_dump(request, state, canvas)?;
    }

    log::debug!(
        "composed {} evidence row(s), {} timeline entr(ies), {} raw item(s) over {} page(s)",
        counts.evidence_rows,
        counts.timeline_entries,
        counts.raw_items,
        state.page_index
    );
    Ok(counts)
}

/// Heading of a body section, moved to a fresh page when less than the fixed
/// lookahead remains.
fn heading(state: &mut LayoutState, canvas: &mut impl Canvas, text: &str) -> Result<(), Error> {
    state.reserve(canvas, HEADING_LOOKAHEAD);
    heading_line(state, canvas, text)
}

fn heading_line(state: &mut LayoutState, canvas: &mut impl Canvas, text: &str) -> Result<(), Error> {
    single_line(
        state,
        canvas,
        text,
        MARGIN_LEFT,
        HEADING_FONT_SIZE,
        FontStyle::Bold,
        TextAlign::Left,
        10.0,
    )?;
    Ok(())
}

fn title(
    config: &ReportConfig,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<(), Error> {
    let center = state.page_width / 2.0;
    single_line(
        state,
        canvas,
        &config.title,
        center,
        TITLE_FONT_SIZE,
        FontStyle::Bold,
        TextAlign::Center,
        15.0,
    )?;
    Ok(())
}

fn metadata(
    request: &ReportRequest,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<(), Error> {
    key_value(state, canvas, "Generated", &request.generated_at)?;
    key_value(state, canvas, "Query ID", &request.query_id)?;
    key_value(state, canvas, "Dataset", &request.dataset)?;
    key_value(state, canvas, "Total Results", &request.total_results.to_string())?;
    key_value(
        state,
        canvas,
        "Selected Items",
        &request.selected_results.len().to_string(),
    )?;
    state.advance(10.0);
    Ok(())
}

fn query_info(
    request: &ReportRequest,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<(), Error> {
    heading_line(state, canvas, "Search Query")?;
    key_value(state, canvas, "Query", &format!("\"{}\"", request.query))?;
    key_value(state, canvas, "Mode", &request.mode)?;
    state.advance(15.0);
    Ok(())
}

fn evidence_table(
    request: &ReportRequest,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<usize, Error> {
    heading(state, canvas, "Selected Evidence Items")?;

    let spec = TableSpec {
        head: EVIDENCE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        body: request
            .selected_results
            .iter()
            .enumerate()
            .map(|(i, result)| evidence_row(i + 1, result))
            .collect(),
        column_widths: EVIDENCE_COLUMN_WIDTHS.to_vec(),
        margin: MARGIN_LEFT,
        font_size: TABLE_FONT_SIZE,
        head_fill: Some([31, 41, 55]),
        alternate_fill: Some([248, 249, 250]),
    };
    table(state, canvas, &spec)?;
    state.advance(15.0);
    Ok(spec.body.len())
}

fn evidence_row(number: usize, result: &SearchResult) -> Vec<String> {
    vec![
        number.to_string(),
        result.sender.clone(),
        result.receiver.clone(),
        result.app.clone(),
        format_timestamp(&result.timestamp),
        text_preview(&result.text),
        result
            .entities
            .iter()
            .map(|e| format!("{}: {}", e.kind, e.value))
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

fn text_preview(text: &str) -> String {
    match text.char_indices().nth(TEXT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn timeline(
    request: &ReportRequest,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<usize, Error> {
    heading(state, canvas, "Timeline Analysis")?;

    let ordered = chronological(&request.selected_results);
    let width = state.content_width();
    for (i, result) in ordered.iter().enumerate() {
        state.reserve(canvas, TIMELINE_ITEM_LOOKAHEAD);
        wrapped_text(
            state,
            canvas,
            &format!("{}. {}", i + 1, format_timestamp(&result.timestamp)),
            MARGIN_LEFT,
            width,
            KEY_VALUE_FONT_SIZE,
            FontStyle::Regular,
        )?;
        wrapped_text(
            state,
            canvas,
            &format!("   {}: {} -> {}", result.app, result.sender, result.receiver),
            MARGIN_LEFT + 5.0,
            width - 5.0,
            KEY_VALUE_FONT_SIZE,
            FontStyle::Regular,
        )?;
        state.advance(5.0);
    }
    Ok(ordered.len())
}

/// Results ordered by timestamp, ties kept in input order. Timestamps that do
/// not parse go last.
fn chronological(results: &[SearchResult]) -> Vec<&SearchResult> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &SearchResult)> = results
        .iter()
        .map(|r| (parse_timestamp(&r.timestamp), r))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    keyed.into_iter().map(|(_, r)| r).collect()
}

fn raw_dump(
    request: &ReportRequest,
    state: &mut LayoutState,
    canvas: &mut impl Canvas,
) -> Result<usize, Error> {
    heading(state, canvas, "Raw Data (JSON)")?;

    let width = state.content_width();
    for (i, result) in request.selected_results.iter().enumerate() {
        state.reserve(canvas, RAW_ITEM_LOOKAHEAD);
        single_line(
            state,
            canvas,
            &format!("Item {}:", i + 1),
            MARGIN_LEFT,
            KEY_VALUE_FONT_SIZE,
            FontStyle::Bold,
            TextAlign::Left,
            8.0,
        )?;
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| Error::Render(format!("cannot serialise item {}: {e}", i + 1)))?;
        wrapped_text(
            state,
            canvas,
            &json,
            MARGIN_LEFT,
            width,
            KEY_VALUE_FONT_SIZE,
            FontStyle::Mono,
        )?;
        state.advance(10.0);
    }
    Ok(request.selected_results.len())
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, or the input unchanged when it does not parse.
fn format_timestamp(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => {
            log::warn!("unparseable timestamp {ts:?}, printing as-is");
            ts.to_string()
        }
    }
}
