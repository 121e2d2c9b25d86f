//! Variables pane: the store as it stood after the current step

use crate::memory::store::VariableStore;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One row per binding, sorted by name; `changed` is drawn highlighted
fn variable_lines(store: &VariableStore, changed: Option<&str>) -> Vec<Line<'static>> {
    if store.is_empty() {
        return vec![Line::from(Span::styled(
            "  (no variables assigned yet)",
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let width = store
        .sorted()
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    store
        .sorted()
        .into_iter()
        .map(|(name, value)| {
            let is_changed = changed == Some(name);
            let marker = if is_changed { "▶ " } else { "  " };
            let base = if is_changed {
                Style::default()
                    .bg(DEFAULT_THEME.changed_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(marker, base.fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{:<width$}", name), base.fg(DEFAULT_THEME.fg)),
                Span::styled(" = ", base.fg(DEFAULT_THEME.comment)),
                Span::styled(value.to_string(), base.fg(DEFAULT_THEME.number)),
                Span::styled(
                    format!("  {}", value.kind_name()),
                    base.fg(DEFAULT_THEME.type_name),
                ),
            ])
        })
        .collect()
}

/// Render the variables pane.
///
/// `description` is the statement that produced this state and is shown in the
/// bottom border.
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    store: &VariableStore,
    changed: Option<&str>,
    description: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Variables ({}) ", store.len()))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", description),
            Style::default().fg(DEFAULT_THEME.secondary),
        )))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = variable_lines(store, changed);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let visible: Vec<Line> = lines.into_iter().skip(*scroll).take(visible_height).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::Value;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_rows_sorted_and_changed_marked() {
        let mut store = VariableStore::new();
        store.set("number", Value::Integer(2));
        store.set("a", Value::Real(2.5));

        let lines = variable_lines(&store, Some("number"));
        assert_eq!(text(&lines[0]), "  a      = 2.5  REAL");
        assert_eq!(text(&lines[1]), "▶ number = 2  INTEGER");
        assert_eq!(lines[1].spans[1].style.bg, Some(DEFAULT_THEME.changed_bg));
    }

    #[test]
    fn test_empty_store_placeholder() {
        let lines = variable_lines(&VariableStore::new(), None);
        assert_eq!(lines.len(), 1);
        assert!(text(&lines[0]).contains("no variables"));
    }
}
