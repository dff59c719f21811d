//! Execution of UI actions against the chat API.

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::api::ChatApi;
use crate::protocol::{BackendAction, GuiEvent};

/// Run a single action and send the resulting event to the UI.
///
/// `Shutdown` is handled by the main loop and ignored here.
pub async fn handle_backend_action(action: BackendAction, api: &ChatApi, event_tx: &Sender<GuiEvent>) {
    let event = match action {
        BackendAction::Ask {
            message,
            system,
            pending,
        } => match api.ask(&message, system.as_deref()).await {
            Ok(response) => {
                debug!(
                    tokens_input = ?response.tokens_input,
                    tokens_output = ?response.tokens_output,
                    "ask completed"
                );
                GuiEvent::AskCompleted { pending, response }
            }
            Err(e) => {
                warn!(error = %e, "ask failed");
                GuiEvent::AskFailed {
                    pending,
                    error: e.to_string(),
                }
            }
        },

        BackendAction::FetchHistory { limit } => match api.fetch_history(limit).await {
            Ok(items) => {
                debug!(count = items.len(), "history loaded");
                GuiEvent::HistoryLoaded(items)
            }
            Err(e) => {
                warn!(error = %e, "history fetch failed");
                GuiEvent::HistoryFailed(e.to_string())
            }
        },

        BackendAction::UpdateMessage { id, text } => match api.update_message(id, &text).await {
            Ok(item) => GuiEvent::MessageUpdated(item),
            Err(e) => {
                warn!(id, error = %e, "message update failed");
                GuiEvent::EditFailed(e.to_string())
            }
        },

        BackendAction::EditRegenerate { id, text } => {
            match api.edit_and_regenerate(id, &text).await {
                Ok(resp) => GuiEvent::EditRegenerated {
                    updated: resp.updated,
                    assistant: resp.assistant,
                },
                Err(e) => {
                    warn!(id, error = %e, "edit and regenerate failed");
                    GuiEvent::EditFailed(e.to_string())
                }
            }
        }

        BackendAction::DeleteHistory => match api.delete_history().await {
            Ok(()) => GuiEvent::HistoryCleared,
            Err(e) => {
                warn!(error = %e, "history delete failed");
                GuiEvent::ClearFailed(e.to_string())
            }
        },

        BackendAction::Shutdown => return,
    };

    // The UI may already be gone during shutdown
    let _ = event_tx.send(event);
}
