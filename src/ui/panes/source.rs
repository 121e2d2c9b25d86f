//! Source code pane rendering with syntax highlighting
//!
//! Shows the Pascal program with line numbers, reserved words and literals
//! coloured, `{ ... }` comments dimmed (they may span lines), the line of the
//! current step highlighted, and the failing line marked once the history
//! reaches a runtime error.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one line; `in_comment` carries an open `{` across lines
fn highlight_source_line(line: &str, in_comment: &mut bool) -> Line<'static> {
    let mut spans = Vec::new();
    let mut word = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if *in_comment || c == '{' {
            flush_word(&mut spans, &mut word);
            let mut comment = String::new();
            if !*in_comment {
                comment.push(c);
                *in_comment = true;
            } else if c == '}' {
                spans.push(Span::styled("}", Style::default().fg(DEFAULT_THEME.comment)));
                *in_comment = false;
                continue;
            } else {
                comment.push(c);
            }
            for next in chars.by_ref() {
                comment.push(next);
                if next == '}' {
                    *in_comment = false;
                    break;
                }
            }
            spans.push(Span::styled(comment, Style::default().fg(DEFAULT_THEME.comment)));
            continue;
        }

        if c.is_ascii_alphanumeric() || (c == '.' && is_number(&word)) {
            word.push(c);
            continue;
        }

        flush_word(&mut spans, &mut word);
        let style = match c {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    flush_word(&mut spans, &mut word);
    Line::from(spans)
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let style = get_word_style(word);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_word_style(word: &str) -> Style {
    match word {
        "PROGRAM" | "VAR" | "BEGIN" | "END" | "DIV" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "INTEGER" | "REAL" => Style::default().fg(DEFAULT_THEME.type_name),
        w if w.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to; centred on first render
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    let focus_line = error_line.unwrap_or(current_line);
    if focus_line > 0 && focus_line <= total_lines {
        scroll_state.offset = (focus_line - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    // Comment state depends on every line above, so highlight them all
    let mut in_comment = false;
    let highlighted: Vec<Line> = lines
        .iter()
        .map(|line| highlight_source_line(line, &mut in_comment))
        .collect();

    let visible_lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, mut content)| {
            let line_num = idx + 1;
            let number = format!("{:4} ", line_num);

            let num_style = if error_line == Some(line_num) {
                // White on red for the failing line
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content.spans {
                    span.style = error_style;
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if line_num == current_line {
                for span in &mut content.spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(number, num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_words_and_literals() {
        let mut in_comment = false;
        let line = highlight_source_line("x := 3.14 DIV y;", &mut in_comment);
        assert_eq!(
            texts(&line),
            vec!["x", " ", ":", "=", " ", "3.14", " ", "DIV", " ", "y", ";"]
        );
        assert_eq!(line.spans[5].style.fg, Some(DEFAULT_THEME.number));
        assert_eq!(line.spans[7].style.fg, Some(DEFAULT_THEME.keyword));
        assert!(!in_comment);
    }

    #[test]
    fn test_comment_spans_lines() {
        let mut in_comment = false;
        let first = highlight_source_line("a := 1; { start", &mut in_comment);
        assert!(in_comment);
        assert_eq!(texts(&first).last().map(String::as_str), Some("{ start"));

        let second = highlight_source_line("end } b", &mut in_comment);
        assert!(!in_comment);
        assert_eq!(texts(&second), vec!["end }", " ", "b"]);
        assert_eq!(second.spans[0].style.fg, Some(DEFAULT_THEME.comment));
    }

    #[test]
    fn test_program_name_dot_not_part_of_number() {
        let mut in_comment = false;
        let line = highlight_source_line("END.", &mut in_comment);
        assert_eq!(texts(&line), vec!["END", "."]);
    }
}
