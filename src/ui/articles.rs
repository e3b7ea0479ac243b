use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::{App, Focus};
use crate::util::truncate_to_width;

/// Render the article list for the opened feed.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Articles;

    let items: Vec<ListItem> = if app.opened_feed.is_none() {
        vec![ListItem::new("Select a feed")]
    } else if app.articles.is_empty() {
        vec![ListItem::new("No articles")]
    } else {
        app.articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let title_style = if i == app.selected_article {
                    Style::default().bg(Color::DarkGray).fg(Color::White)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };

                // Leave a couple of columns for the borders.
                let max_title = area.width.saturating_sub(4) as usize;
                let title = truncate_to_width(&article.title, max_title).into_owned();

                ListItem::new(vec![
                    Line::from(Span::styled(title, title_style)),
                    Line::from(Span::styled(
                        article.published.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = match app.opened_slot() {
        Some((_, result)) => format!("Articles - {}", result.title()),
        None => "Articles".to_string(),
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(list, area);
}
