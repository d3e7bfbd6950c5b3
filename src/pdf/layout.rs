use pdf_writer::{Content, Name, Str};

use crate::canvas::TextAlign;
use crate::fonts::{FontEntry, to_winansi_bytes};

const PT_PER_MM: f32 = 72.0 / 25.4;

pub(super) fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

fn finish_line(text: &mut String, width: &mut f32) -> String {
    *width = 0.0;
    std::mem::take(text)
}

/// Greedy word wrap. Explicit newlines always break, leading indentation of
/// each source line is kept, runs of inner whitespace collapse to one space,
/// and a word wider than the line is split between characters.
pub(super) fn build_lines(
    text: &str,
    entry: &FontEntry,
    font_size: f32,
    max_width: f32, // points
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let space_w = entry.space_width(font_size);

    for source in text.split('\n') {
        let source = source.trim_end_matches('\r');
        let indent_len = source.len() - source.trim_start().len();
        let mut current = source[..indent_len].to_string();
        let mut current_w = entry.word_width(&current, font_size);
        let mut has_word = false;

        for word in source.split_whitespace() {
            let ww = entry.word_width(word, font_size);

            if has_word && current_w + space_w + ww > max_width {
                lines.push(finish_line(&mut current, &mut current_w));
                has_word = false;
            }
            if has_word {
                current.push(' ');
                current_w += space_w;
            }

            if current_w + ww <= max_width {
                current.push_str(word);
                current_w += ww;
            } else {
                for ch in word.chars() {
                    let cw = entry.char_width_1000(ch) * font_size / 1000.0;
                    if current_w + cw > max_width && !current.trim().is_empty() {
                        lines.push(finish_line(&mut current, &mut current_w));
                    }
                    current.push(ch);
                    current_w += cw;
                }
            }
            has_word = true;
        }

        lines.push(finish_line(&mut current, &mut current_w));
    }

    lines
}

/// Emit `lines` as text objects. `x` and `first_baseline_y` are PDF user-space
/// points (origin bottom-left); each following line sits `line_pitch` lower.
pub(super) fn render_lines(
    content: &mut Content,
    lines: &[String],
    entry: &FontEntry,
    font_size: f32,
    x: f32,
    first_baseline_y: f32,
    line_pitch: f32,
    align: TextAlign,
) {
    for (line_num, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let y = first_baseline_y - line_num as f32 * line_pitch;
        let line_x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - entry.word_width(line, font_size) / 2.0,
        };
        content
            .begin_text()
            .set_font(Name(entry.pdf_name.as_bytes()), font_size)
            .next_line(line_x, y)
            .show(Str(&to_winansi_bytes(line)))
            .end_text();
    }
}
