use std::borrow::Cow;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Render the status bar: transient notifications first, then refresh
/// progress, then context-sensitive key hints.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.refresh_in_flight() {
        Cow::Borrowed("Refreshing feeds...")
    } else if app.add_dialog.is_some() {
        Cow::Borrowed("Type to edit | Tab switch field | Enter submit | Esc cancel")
    } else {
        Cow::Borrowed("[a]dd [r]efresh [Tab]switch [j/k]move [Enter]select [o]pen [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
