//! Background task event processing.

use tokio::sync::mpsc;

use crate::app::{AddFeedState, App, AppEvent, DialogField};
use crate::store::{AddOutcome, StoreError};

use super::input::trigger_refresh;

pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::RefreshComplete { generation, feeds } => {
            let count = feeds.len();
            if app.complete_refresh(generation, feeds) {
                app.set_status(format!("Loaded {} feeds", count));
            }
        }
        AppEvent::AddFeedDone { url, result } => handle_add_feed_done(app, url, result, event_tx),
    }
}

fn handle_add_feed_done(
    app: &mut App,
    url: String,
    result: Result<AddOutcome, StoreError>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match result {
        Ok(AddOutcome::Added) => {
            app.add_dialog = None;
            app.reload_subscriptions();
            trigger_refresh(app, event_tx);
            app.set_status("Feed added successfully!");
        }
        Ok(AddOutcome::AlreadyExists) => {
            app.set_status("Feed already exists!");
            back_to_input(app);
        }
        Ok(AddOutcome::Invalid) => {
            app.set_status("Invalid RSS feed URL. Please provide a valid RSS feed.");
            back_to_input(app);
        }
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to save subscription");
            app.set_status(format!("Failed to save feed: {}", e));
            back_to_input(app);
        }
    }
}

/// Re-opens the dialog's input form with the attempted values so the user
/// can correct them. No-op if the dialog was dismissed while submitting.
fn back_to_input(app: &mut App) {
    if let Some(AddFeedState::Submitting { url, name }) = app.add_dialog.take() {
        app.add_dialog = Some(AddFeedState::Input {
            url,
            name,
            field: DialogField::Url,
        });
    }
}
