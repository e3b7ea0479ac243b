use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::{App, Focus};

/// Render the feed list sidebar.
///
/// While a fetch cycle is in flight the whole list is a loading
/// placeholder; results land all at once when the cycle completes.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Feeds;

    let items: Vec<ListItem> = if app.refresh_in_flight() {
        vec![ListItem::new("Loading feeds...")]
    } else {
        match app.feed_set.as_deref() {
            Some(set) if !set.is_empty() => set
                .iter()
                .enumerate()
                .map(|(i, (_, result))| {
                    let style = if i == app.selected_feed {
                        Style::default().bg(Color::DarkGray).fg(Color::White)
                    } else {
                        Style::default()
                    };

                    let line = if result.is_unavailable() {
                        Line::from(vec![
                            Span::styled("⚠ ", Style::default().fg(Color::Red)),
                            Span::styled(result.title().to_string(), style),
                        ])
                    } else {
                        Line::from(Span::styled(result.title().to_string(), style))
                    };

                    ListItem::new(line)
                })
                .collect(),
            _ => vec![ListItem::new("No feeds yet, press 'a' to add one")],
        }
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = format!("Feeds ({})", app.feed_count());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(list, area);
}
