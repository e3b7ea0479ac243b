//! Keyboard input handling.
//!
//! Routes key presses to the add-feed dialog when it is open, otherwise to
//! the browse view.

use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{AddFeedState, App, AppEvent, DialogField, Focus};
use crate::feed::fetch_all;
use crate::util::validate_url_for_open;

use super::Action;

/// Lines the detail panel moves per page-scroll key.
const DETAIL_SCROLL_STEP: u16 = 5;

pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if app.add_dialog.is_some() {
        handle_dialog_input(app, code, event_tx);
        return Action::Continue;
    }
    handle_browse_input(app, code, modifiers, event_tx)
}

/// Starts a fetch cycle on a fresh background task.
///
/// The full subscription list is handed to one worker which fetches
/// sequentially and posts a single `RefreshComplete` back; nothing streams
/// mid-cycle. A request while a cycle is in flight is a no-op with a
/// notification.
pub(super) fn trigger_refresh(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(generation) = app.begin_refresh() else {
        app.set_status("Refresh already in progress");
        return;
    };

    let client = app.client.clone();
    let subscriptions = app.subscriptions.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let feeds = fetch_all(&client, &subscriptions).await;
        if tx
            .send(AppEvent::RefreshComplete { generation, feeds })
            .await
            .is_err()
        {
            tracing::debug!("Fetch cycle result dropped (UI torn down)");
        }
    });
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('a') => {
            app.add_dialog = Some(AddFeedState::Input {
                url: String::new(),
                name: String::new(),
                field: DialogField::Url,
            });
        }
        KeyCode::Char('r') => trigger_refresh(app, event_tx),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Feeds => Focus::Articles,
                Focus::Articles => Focus::Feeds,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Enter => match app.focus {
            Focus::Feeds => {
                app.open_selected_feed();
                app.focus = Focus::Articles;
            }
            Focus::Articles => {
                if !app.articles.is_empty() {
                    app.detail = Some(app.selected_article);
                    app.detail_scroll = 0;
                }
            }
        },
        KeyCode::Char('o') => open_selected_article(app),
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.detail_scroll = app.detail_scroll.saturating_add(DETAIL_SCROLL_STEP);
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.detail_scroll = app.detail_scroll.saturating_sub(DETAIL_SCROLL_STEP);
        }
        KeyCode::PageDown => {
            app.detail_scroll = app.detail_scroll.saturating_add(DETAIL_SCROLL_STEP);
        }
        KeyCode::PageUp => {
            app.detail_scroll = app.detail_scroll.saturating_sub(DETAIL_SCROLL_STEP);
        }
        KeyCode::Esc => {
            app.detail = None;
            app.detail_scroll = 0;
        }
        _ => {}
    }
    Action::Continue
}

/// Opens the highlighted article's link in the system browser.
fn open_selected_article(app: &mut App) {
    let Some(article) = app.selected_article() else {
        return;
    };
    let link = article.link.clone();
    if let Err(e) = validate_url_for_open(&link) {
        app.set_status(e);
    } else if let Err(e) = open::that(&link) {
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status("Opening article in browser...");
    }
}

/// Input while the add-feed dialog is open. The dialog state is taken out
/// of the app, transformed, and put back, so `App` methods stay usable in
/// every branch.
fn handle_dialog_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(state) = app.add_dialog.take() else {
        return;
    };

    match state {
        AddFeedState::Input {
            mut url,
            mut name,
            field,
        } => match code {
            KeyCode::Esc => {} // dialog dismissed
            KeyCode::Tab => {
                let field = match field {
                    DialogField::Url => DialogField::Name,
                    DialogField::Name => DialogField::Url,
                };
                app.add_dialog = Some(AddFeedState::Input { url, name, field });
            }
            KeyCode::Enter => match field {
                // Enter on the URL field moves on to the name field.
                DialogField::Url => {
                    app.add_dialog = Some(AddFeedState::Input {
                        url,
                        name,
                        field: DialogField::Name,
                    });
                }
                DialogField::Name => {
                    if url.trim().is_empty() {
                        app.set_status("Please enter a feed URL");
                        app.add_dialog = Some(AddFeedState::Input { url, name, field });
                    } else {
                        submit_add_feed(app, url, name, event_tx);
                    }
                }
            },
            KeyCode::Backspace => {
                match field {
                    DialogField::Url => url.pop(),
                    DialogField::Name => name.pop(),
                };
                app.add_dialog = Some(AddFeedState::Input { url, name, field });
            }
            KeyCode::Char(c) => {
                match field {
                    DialogField::Url => url.push(c),
                    DialogField::Name => name.push(c),
                };
                app.add_dialog = Some(AddFeedState::Input { url, name, field });
            }
            _ => {
                app.add_dialog = Some(AddFeedState::Input { url, name, field });
            }
        },
        AddFeedState::Submitting { url, name } => match code {
            // Dismissing the dialog does not cancel the add; its outcome
            // arrives later as a status notification.
            KeyCode::Esc => {}
            _ => app.add_dialog = Some(AddFeedState::Submitting { url, name }),
        },
    }
}

/// Spawns validation + append on a background task. The dialog shows the
/// submitting state until `AddFeedDone` comes back.
fn submit_add_feed(app: &mut App, url: String, name: String, event_tx: &mpsc::Sender<AppEvent>) {
    app.add_dialog = Some(AddFeedState::Submitting {
        url: url.clone(),
        name: name.clone(),
    });

    let store = app.store.clone();
    let client = app.client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = store.add(&client, &url, &name).await;
        if tx.send(AppEvent::AddFeedDone { url, result }).await.is_err() {
            tracing::debug!("Add-feed result dropped (UI torn down)");
        }
    });
}
