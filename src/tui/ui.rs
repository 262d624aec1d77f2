//! Rendering for the heading switcher.

use crate::suggest::{ItemKind, RenderHint, SuggestionItem};
use crate::tui::picker::Picker;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::UnicodeWidthStr;

const INSTRUCTIONS: [(&str, &str); 3] = [
    ("↑↓", "to navigate"),
    ("↵", "to jump to heading"),
    ("esc", "to dismiss"),
];

pub fn render(frame: &mut Frame, picker: &mut Picker) {
    let [input_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_input(frame, picker, input_area);
    render_list(frame, picker, list_area);
    render_footer(frame, footer_area);
}

fn render_input(frame: &mut Frame, picker: &Picker, area: Rect) {
    let line = if picker.query.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(
                "Go to heading...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(picker.query.as_str()),
            Span::styled("▌", Style::default().fg(Color::White)),
        ])
    };

    let title = format!(
        " Headings ({}/{}) ",
        picker.visible.len(),
        picker.session().list.len()
    );
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, picker: &mut Picker, area: Rect) {
    let session = picker.session();
    let searching = picker.is_searching();
    // Borders plus the highlight symbol.
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = picker
        .visible
        .iter()
        .filter_map(|&index| {
            let item = session.list.get(index)?;
            let hint = session.list.render_hint(
                index,
                searching,
                session.default_index,
                session.highlight_default,
            )?;
            let path = if searching {
                session.list.ancestor_path(index)
            } else {
                String::new()
            };
            Some(ListItem::new(suggestion_line(item, hint, &path, width)))
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Line::from(Span::styled(
            "No matching headings",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))])
    } else {
        List::new(items)
    };

    let list = list
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut picker.list_state);
}

fn suggestion_line(
    item: &SuggestionItem,
    hint: RenderHint,
    path: &str,
    width: usize,
) -> Line<'static> {
    let label = item.label().to_string();
    let mut text_style = Style::default();
    if hint.is_default {
        text_style = text_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    match (hint.kind, hint.level) {
        (ItemKind::File, _) | (_, None) => {
            let style = text_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            Line::from(vec![
                Span::styled(label, style),
                Span::styled("  (file)", Style::default().fg(Color::DarkGray)),
            ])
        }
        (ItemKind::Heading, Some(level)) if hint.searching => {
            let tag = format!("H{} ", level);
            let used = tag.width() + label.width() + 2;
            let mut spans = vec![
                Span::styled(tag, Style::default().fg(Color::DarkGray)),
                Span::styled(label, text_style),
            ];
            if !path.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    truncate(path, width.saturating_sub(used)),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
            Line::from(spans)
        }
        (ItemKind::Heading, Some(level)) => Line::from(vec![
            Span::styled(
                format!("{} ", "#".repeat(level)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(label, text_style),
        ]),
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (key, purpose) in INSTRUCTIONS {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}  ", purpose),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Shorten `text` to at most `max` display columns, ending in `…` when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
