//! Dialog action types - dialogs return actions instead of mutating state directly.

/// Actions that dialogs can return to the main application.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogAction {
    /// The user confirmed deleting the whole conversation
    ConfirmReset,
}
