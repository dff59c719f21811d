use crate::api::{AskResponse, HistoryItem};

/// Ids of the optimistic entries created for one send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingExchange {
    pub user_id: i64,
    pub assistant_id: i64,
}

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendAction {
    /// Ask the assistant; the reply fills the placeholder of `pending`
    Ask {
        message: String,
        system: Option<String>,
        pending: PendingExchange,
    },
    /// Load the most recent history items
    FetchHistory { limit: u32 },
    /// Replace the text of a user message
    UpdateMessage { id: i64, text: String },
    /// Replace the text of a user message and regenerate the reply
    EditRegenerate { id: i64, text: String },
    /// Delete the whole conversation
    DeleteHistory,
    /// Stop the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    /// The assistant replied
    AskCompleted {
        pending: PendingExchange,
        response: AskResponse,
    },
    /// The ask request failed
    AskFailed {
        pending: PendingExchange,
        error: String,
    },
    /// Server history (oldest first)
    HistoryLoaded(Vec<HistoryItem>),
    /// History could not be fetched
    HistoryFailed(String),
    /// A user message was updated in place
    MessageUpdated(HistoryItem),
    /// A user message was edited and a new reply generated
    EditRegenerated {
        updated: HistoryItem,
        assistant: HistoryItem,
    },
    /// Update or edit+regenerate failed
    EditFailed(String),
    /// History was deleted on the server
    HistoryCleared,
    /// Deleting history failed
    ClearFailed(String),
    /// Backend-level failure not tied to a request
    Error(String),
}
