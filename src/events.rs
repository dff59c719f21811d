//! Backend event processing (replies, history loads, edit and reset results).

use tracing::warn;

use crate::input_state::InputState;
use crate::protocol::{BackendAction, GuiEvent};
use crate::state::{ChatState, FetchReason};

/// Apply one backend event to the state.
///
/// Returns the follow-up actions the caller must send (history re-fetches
/// after successful actions).
pub fn process_single_event(
    state: &mut ChatState,
    input: &mut InputState,
    event: GuiEvent,
) -> Vec<BackendAction> {
    let mut followups = Vec::new();

    match event {
        GuiEvent::AskCompleted { pending, response } => {
            state.complete_send(pending, &response.reply);
            input.clear();
            followups.extend(state.request_history(FetchReason::AfterAction));
        }

        GuiEvent::AskFailed { pending, error } => {
            state.fail_send(pending, error);
        }

        GuiEvent::HistoryLoaded(items) => {
            state.apply_server_history(items);
            followups.extend(state.take_queued_fetch());
        }

        GuiEvent::HistoryFailed(error) => {
            state.history_failed(error);
            followups.extend(state.take_queued_fetch());
        }

        GuiEvent::MessageUpdated(item) => {
            state.apply_message_updated(item);
            followups.extend(state.request_history(FetchReason::AfterAction));
        }

        GuiEvent::EditRegenerated { updated, assistant } => {
            state.apply_edit_regenerated(updated, assistant);
            followups.extend(state.request_history(FetchReason::AfterAction));
        }

        GuiEvent::EditFailed(error) => {
            state.edit_failed(error);
        }

        GuiEvent::HistoryCleared => {
            state.history_cleared();
            followups.extend(state.request_history(FetchReason::AfterAction));
        }

        GuiEvent::ClearFailed(error) => {
            state.reset_failed(error);
        }

        GuiEvent::Error(msg) => {
            warn!(error = %msg, "backend error");
            state.error = Some(msg);
        }
    }

    followups
}
