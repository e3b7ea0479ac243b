//! View layout and render dispatch.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{AddFeedState, App, DialogField};

use super::{articles, detail, feeds, status};

/// Minimum terminal dimensions required for the three-panel layout.
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 10;

pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(rows[0]);

    feeds::render(f, app, panels[0]);
    articles::render(f, app, panels[1]);
    detail::render(f, app, panels[2]);
    status::render(f, app, rows[1]);

    if let Some(ref state) = app.add_dialog {
        render_add_feed_overlay(f, state);
    }
}

/// Centered overlay for the add-feed dialog.
fn render_add_feed_overlay(f: &mut Frame, state: &AddFeedState) {
    let area = f.area();

    let text = match state {
        AddFeedState::Input { url, name, field } => {
            let (url_cursor, name_cursor) = match field {
                DialogField::Url => ("_", ""),
                DialogField::Name => ("", "_"),
            };
            format!(
                "Feed URL:\n> {}{}\n\nFeed name (optional):\n> {}{}\n\n(Enter) Add  (Tab) Switch field  (Esc) Cancel",
                url, url_cursor, name, name_cursor
            )
        }
        AddFeedState::Submitting { url, .. } => {
            format!("Validating {}...\n\nPlease wait.\n\n(Esc) Dismiss", url)
        }
    };

    let width = 60u16.min(area.width.saturating_sub(4));
    let height = 11u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Add New RSS Feed "),
    );
    f.render_widget(paragraph, overlay);
}
