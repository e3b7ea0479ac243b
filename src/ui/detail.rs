use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Render the article detail panel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Article");

    let Some(article) = app.detail_article() else {
        let placeholder = Paragraph::new("Select an article to view its content")
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(placeholder, area);
        return;
    };

    let meta_style = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Feed: {}", article.feed_title),
            meta_style,
        )),
        Line::from(Span::styled(
            format!("Published: {}", article.published),
            meta_style,
        )),
        Line::from(Span::styled(format!("Link: {}", article.link), meta_style)),
        Line::from(""),
    ];
    for summary_line in article.summary_text.lines() {
        lines.push(Line::from(summary_line.to_string()));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    f.render_widget(paragraph, area);
}
