use crate::config::{BoxSize, LayoutConfig};
use crate::theme::Theme;

const ELLIPSIS: char = '…';

/// Wrap a course name into the lines that fit inside a node box.
///
/// Lines beyond the box height are dropped and the last kept line ends in an
/// ellipsis.
pub(super) fn wrap_label(text: &str, theme: &Theme, config: &LayoutConfig, size: BoxSize) -> Vec<String> {
    let font_size = theme.font_size.max(1.0);
    let max_width = (size.width - config.label_padding * 2.0).max(font_size);
    let line_height = font_size * config.label_line_height.max(1.0);
    let max_lines = (((size.height - config.label_padding).max(line_height)) / line_height).floor() as usize;
    let max_lines = max_lines.max(1);

    let mut lines = wrap_line(text.trim(), max_width, font_size);
    if lines.is_empty() {
        lines.push(String::new());
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, max_width, font_size);
        }
    }
    lines
}

pub(super) fn wrap_line(line: &str, max_width: f32, font_size: f32) -> Vec<String> {
    if text_width(line, font_size) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, font_size) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn with_ellipsis(line: &str, max_width: f32, font_size: f32) -> String {
    let mut out: String = line.to_string();
    let ellipsis_width = char_width_factor(ELLIPSIS) * font_size;
    while !out.is_empty() && text_width(&out, font_size) + ellipsis_width > max_width {
        out.pop();
    }
    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

pub(super) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Approximate advance per character, as a fraction of the font size, for the
/// default sans-serif stack.
pub(super) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '|' | '!' | '\'' => 0.26,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' => 0.9,
        'A'..='Z' => 0.66,
        '0'..='9' => 0.6,
        _ => 0.568,
    }
}
