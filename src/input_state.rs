//! Input state management for message composition.
//!
//! Tracks the text being composed and whether an IME composition is active,
//! and decides what an Enter key press should do.

/// What to do with an Enter key press in the message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Submit the message.
    Submit,
    /// Swallow the key press without sending or inserting a newline.
    Suppress,
    /// Let the text box handle it (Shift+Enter inserts a newline).
    PassThrough,
}

/// A single Enter key press as seen by the input panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterPress {
    pub shift: bool,
    pub repeat: bool,
}

#[derive(Default)]
pub struct InputState {
    /// Current message being composed
    pub message_input: String,

    /// An IME composition (pre-edit) is in progress
    pub composing: bool,
}

impl InputState {
    /// Create a new InputState with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track IME pre-edit state. An empty pre-edit ends the composition.
    pub fn on_preedit(&mut self, text: &str) {
        self.composing = !text.is_empty();
    }

    /// The composition was committed or the IME was turned off.
    pub fn end_composition(&mut self) {
        self.composing = false;
    }

    /// Decide what an Enter press does. `busy` is true while a send or reset
    /// is in progress.
    pub fn on_enter(&self, press: EnterPress, busy: bool) -> EnterOutcome {
        if press.shift {
            return EnterOutcome::PassThrough;
        }
        if self.composing || press.repeat || busy {
            return EnterOutcome::Suppress;
        }
        EnterOutcome::Submit
    }

    /// Esc clears the draft.
    pub fn clear(&mut self) {
        self.message_input.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.message_input.trim().is_empty()
    }
}
