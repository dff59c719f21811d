//! Core application state, separated from UI logic.
//!
//! `ChatState` holds everything that represents the conversation as the
//! client sees it: the history (server-confirmed plus optimistic entries),
//! request flags, the visible error and the inline edit draft. Methods that
//! start a request return the `BackendAction` to send instead of sending it,
//! so the state machine can be driven without a backend.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Instant;

use crate::api::{HistoryItem, Role};
use crate::config::Settings;
use crate::protocol::{BackendAction, PendingExchange};
use crate::validation;

/// Placeholder shown in the assistant slot while waiting for a reply.
pub const REPLY_PLACEHOLDER: &str = "(AI is replying…)";
/// Text left in the assistant slot when the ask failed.
pub const REPLY_FAILED: &str = "(Could not get a reply)";
/// Error shown when a history fetch fails without a message.
pub const HISTORY_FAILED: &str = "failed to fetch history";

/// An inline edit of a user message in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: i64,
    pub text: String,
}

/// Why a history fetch is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// Periodic poll; dropped when a fetch is already in flight.
    Poll,
    /// Follow-up to a user action; queued behind an in-flight fetch so the
    /// result reflects the action.
    AfterAction,
}

pub struct ChatState {
    /// Conversation, oldest first.
    pub history: Vec<HistoryItem>,

    /// A send or reset is waiting for the server.
    pub loading: bool,

    /// Optimistic ids of the send awaiting its reply.
    pub pending: Option<PendingExchange>,

    /// The single visible error line.
    pub error: Option<String>,

    /// A history fetch is in flight.
    pub history_in_flight: bool,

    /// Another fetch should start once the in-flight one finishes.
    pub refetch_queued: bool,

    /// Inline edit of a user message.
    pub edit: Option<EditDraft>,

    /// The edit draft has been submitted and awaits the server.
    pub saving_edit: bool,

    /// The message list should scroll back to the newest entry.
    pub scroll_to_top: bool,

    /// Status toast messages with creation time (auto-expire).
    pub status_messages: Vec<(String, Instant)>,

    pub history_limit: u32,
    pub max_message_chars: usize,
    pub system_prompt: Option<String>,
}

impl ChatState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            history: Vec::new(),
            loading: false,
            pending: None,
            error: None,
            history_in_flight: false,
            refetch_queued: false,
            edit: None,
            saving_edit: false,
            scroll_to_top: false,
            status_messages: Vec::new(),
            history_limit: settings.history_limit,
            max_message_chars: settings.max_message_chars,
            system_prompt: settings.system_prompt.clone(),
        }
    }

    /// History newest first, as displayed.
    pub fn display(&self) -> impl Iterator<Item = &HistoryItem> {
        self.history.iter().rev()
    }

    pub fn is_sending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a new message may be submitted right now.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.is_sending()
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    /// Start sending `input`: append the optimistic pair and return the ask.
    ///
    /// Blank input and a send already in progress are silently ignored.
    pub fn begin_send(&mut self, input: &str, now: DateTime<Utc>) -> Option<BackendAction> {
        if input.trim().is_empty() || self.is_sending() {
            return None;
        }
        let message = match validation::validate_message(input, self.max_message_chars) {
            Ok(m) => m.to_string(),
            Err(e) => {
                self.error = Some(e);
                return None;
            }
        };

        self.error = None;
        self.loading = true;

        let user_id = -now.timestamp_millis();
        let pending = PendingExchange {
            user_id,
            assistant_id: user_id - 1,
        };
        let ts = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.history
            .push(HistoryItem::new(pending.user_id, Role::User, message.clone(), ts.clone()));
        self.history.push(HistoryItem::new(
            pending.assistant_id,
            Role::Assistant,
            REPLY_PLACEHOLDER,
            ts,
        ));
        self.pending = Some(pending);

        Some(BackendAction::Ask {
            message,
            system: self.system_prompt.clone(),
            pending,
        })
    }

    /// Fill the placeholder with the reply.
    pub fn complete_send(&mut self, pending: PendingExchange, reply: &str) {
        self.set_text(pending.assistant_id, reply);
        self.finish_send(pending);
    }

    pub fn fail_send(&mut self, pending: PendingExchange, error: String) {
        self.set_text(pending.assistant_id, REPLY_FAILED);
        self.error = Some(non_empty_or(error, "failed"));
        self.finish_send(pending);
    }

    fn finish_send(&mut self, pending: PendingExchange) {
        if self.pending == Some(pending) {
            self.pending = None;
        }
        self.loading = false;
        self.scroll_to_top = true;
    }

    fn set_text(&mut self, id: i64, text: &str) {
        if let Some(item) = self.history.iter_mut().find(|h| h.id == id) {
            item.text = text.to_string();
        }
    }

    // ------------------------------------------------------------------
    // History polling
    // ------------------------------------------------------------------

    /// Request a history fetch unless one is already in flight.
    pub fn request_history(&mut self, reason: FetchReason) -> Option<BackendAction> {
        if self.history_in_flight {
            if reason == FetchReason::AfterAction {
                self.refetch_queued = true;
            }
            return None;
        }
        self.history_in_flight = true;
        Some(BackendAction::FetchHistory {
            limit: self.history_limit,
        })
    }

    /// Reconcile server history with local optimistic entries.
    ///
    /// An empty server response never wipes optimistic entries (the server
    /// may run without storage). Otherwise the server wins, except that the
    /// entries of a send still awaiting its reply stay at the end. The server
    /// stores the user message before the reply exists, so once it shows up
    /// only the placeholder is kept.
    pub fn apply_server_history(&mut self, server: Vec<HistoryItem>) {
        self.history_in_flight = false;

        let has_optimistic = self.history.iter().any(HistoryItem::is_optimistic);
        if server.is_empty() && has_optimistic {
            return;
        }

        let mut merged = server;
        if let Some(pending) = self.pending {
            let user_stored = self
                .history
                .iter()
                .find(|h| h.id == pending.user_id)
                .is_some_and(|sent| self.server_has_new_user_message(&merged, &sent.text));
            merged.extend(
                self.history
                    .iter()
                    .filter(|h| {
                        h.id == pending.assistant_id || (h.id == pending.user_id && !user_stored)
                    })
                    .cloned(),
            );
        }
        self.history = merged;

        // The message being edited may have been deleted on the server
        if let Some(draft) = &self.edit {
            if !self.saving_edit && !self.history.iter().any(|h| h.id == draft.id) {
                self.edit = None;
            }
        }
    }

    /// Whether `server` holds a user message with `text` newer than the last
    /// confirmed entry known locally.
    fn server_has_new_user_message(&self, server: &[HistoryItem], text: &str) -> bool {
        let start = self
            .history
            .iter()
            .rev()
            .find(|h| !h.is_optimistic())
            .and_then(|last| server.iter().position(|h| h.id == last.id))
            .map_or(0, |pos| pos + 1);
        server[start..]
            .iter()
            .any(|h| h.role == Role::User && h.text == text)
    }

    pub fn history_failed(&mut self, error: String) {
        self.history_in_flight = false;
        self.error = Some(non_empty_or(error, HISTORY_FAILED));
    }

    /// Take the queued follow-up fetch, if any. Call after a fetch finished.
    pub fn take_queued_fetch(&mut self) -> Option<BackendAction> {
        if !self.refetch_queued {
            return None;
        }
        self.refetch_queued = false;
        self.request_history(FetchReason::AfterAction)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Open the inline editor for a confirmed user message.
    pub fn start_edit(&mut self, item: &HistoryItem) -> bool {
        if item.role != Role::User || item.is_optimistic() || self.saving_edit {
            return false;
        }
        self.edit = Some(EditDraft {
            id: item.id,
            text: item.text.clone(),
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        if !self.saving_edit {
            self.edit = None;
        }
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.edit.as_ref().is_some_and(|d| d.id == id)
    }

    /// Submit the draft. `regenerate` also replaces the assistant's reply.
    pub fn save_edit(&mut self, regenerate: bool) -> Option<BackendAction> {
        if self.saving_edit {
            return None;
        }
        let draft = self.edit.as_ref()?;
        let text = match validation::validate_edit(&draft.text) {
            Ok(t) => t.to_string(),
            Err(e) => {
                self.error = Some(e);
                return None;
            }
        };
        let id = draft.id;
        self.saving_edit = true;
        self.error = None;
        Some(if regenerate {
            BackendAction::EditRegenerate { id, text }
        } else {
            BackendAction::UpdateMessage { id, text }
        })
    }

    pub fn apply_message_updated(&mut self, item: HistoryItem) {
        self.saving_edit = false;
        self.edit = None;
        if let Some(existing) = self.history.iter_mut().find(|h| h.id == item.id) {
            *existing = item;
        }
        self.push_status("Message updated");
    }

    /// Patch the local copy: everything after the edited message is gone and
    /// the new reply follows it.
    pub fn apply_edit_regenerated(&mut self, updated: HistoryItem, assistant: HistoryItem) {
        self.saving_edit = false;
        self.edit = None;
        if let Some(pos) = self.history.iter().position(|h| h.id == updated.id) {
            self.history.truncate(pos);
            self.history.push(updated);
            self.history.push(assistant);
        }
        self.push_status("Reply regenerated");
    }

    pub fn edit_failed(&mut self, error: String) {
        self.saving_edit = false;
        self.error = Some(non_empty_or(error, "update/regenerate failed"));
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Delete the conversation on the server. Refused while loading.
    pub fn begin_reset(&mut self) -> Option<BackendAction> {
        if self.loading || self.is_sending() {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(BackendAction::DeleteHistory)
    }

    pub fn history_cleared(&mut self) {
        self.loading = false;
        self.history.clear();
        self.edit = None;
        self.push_status("History cleared");
    }

    pub fn reset_failed(&mut self, error: String) {
        self.loading = false;
        self.error = Some(non_empty_or(error, "failed to delete history"));
    }

    // ------------------------------------------------------------------
    // Status toasts
    // ------------------------------------------------------------------

    pub fn push_status(&mut self, msg: impl Into<String>) {
        self.status_messages.push((msg.into(), Instant::now()));
    }

    /// Purge status messages older than the given duration.
    pub fn purge_old_status_messages(&mut self, max_age_secs: u64) {
        self.status_messages
            .retain(|(_, created)| created.elapsed().as_secs() < max_age_secs);
    }
}

fn non_empty_or(msg: String, fallback: &str) -> String {
    if msg.trim().is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state() -> ChatState {
        ChatState::new(&Settings::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn item(id: i64, role: Role, text: &str) -> HistoryItem {
        HistoryItem::new(id, role, text, "2025-03-01T12:00:00")
    }

    #[test]
    fn test_begin_send_appends_optimistic_pair() {
        let mut s = state();
        s.error = Some("old".into());
        let action = s.begin_send("  hello  ", now()).unwrap();

        let pending = s.pending.unwrap();
        assert!(pending.user_id < 0);
        assert_eq!(pending.assistant_id, pending.user_id - 1);
        assert_eq!(
            action,
            BackendAction::Ask {
                message: "hello".into(),
                system: None,
                pending,
            }
        );
        assert!(s.loading);
        assert!(s.error.is_none());
        assert_eq!(s.history.len(), 2);
        assert_eq!(s.history[0].text, "hello");
        assert_eq!(s.history[1].text, REPLY_PLACEHOLDER);
        assert!(s.history.iter().all(HistoryItem::is_optimistic));
    }

    #[test]
    fn test_blank_or_concurrent_send_is_ignored() {
        let mut s = state();
        assert!(s.begin_send("   ", now()).is_none());
        assert!(s.history.is_empty());

        assert!(s.begin_send("first", now()).is_some());
        assert!(s.begin_send("second", now()).is_none());
        assert_eq!(s.history.len(), 2);
    }

    #[test]
    fn test_too_long_message_sets_error() {
        let mut s = state();
        assert!(s.begin_send(&"x".repeat(201), now()).is_none());
        assert!(s.error.is_some());
        assert!(!s.loading);
        assert!(s.history.is_empty());
    }

    #[test]
    fn test_complete_and_fail_send() {
        let mut s = state();
        s.begin_send("hi", now());
        let pending = s.pending.unwrap();
        s.complete_send(pending, "hello there");
        assert_eq!(s.history[1].text, "hello there");
        assert!(s.can_send());
        assert!(s.scroll_to_top);

        s.begin_send("again", now() + chrono::Duration::seconds(1));
        let pending = s.pending.unwrap();
        s.fail_send(pending, "HTTP 500".into());
        assert_eq!(s.history[3].text, REPLY_FAILED);
        assert_eq!(s.error.as_deref(), Some("HTTP 500"));
        assert!(s.can_send());
    }

    #[test]
    fn test_request_history_guard() {
        let mut s = state();
        assert_eq!(
            s.request_history(FetchReason::Poll),
            Some(BackendAction::FetchHistory { limit: 30 })
        );
        assert!(s.request_history(FetchReason::Poll).is_none());
        assert!(!s.refetch_queued);

        assert!(s.request_history(FetchReason::AfterAction).is_none());
        assert!(s.refetch_queued);

        s.apply_server_history(vec![]);
        assert!(!s.history_in_flight);
        assert!(s.take_queued_fetch().is_some());
        assert!(s.history_in_flight);
        assert!(s.take_queued_fetch().is_none());
    }

    #[test]
    fn test_empty_server_keeps_optimistic_entries() {
        let mut s = state();
        s.begin_send("hi", now());
        let pending = s.pending.unwrap();
        s.complete_send(pending, "reply");
        s.request_history(FetchReason::AfterAction);
        s.apply_server_history(vec![]);
        assert_eq!(s.history.len(), 2);
        assert_eq!(s.history[1].text, "reply");
    }

    #[test]
    fn test_server_history_replaces_settled_optimistic_entries() {
        let mut s = state();
        s.begin_send("hi", now());
        let pending = s.pending.unwrap();
        s.complete_send(pending, "reply");
        s.apply_server_history(vec![item(1, Role::User, "hi"), item(2, Role::Assistant, "reply")]);
        assert_eq!(s.history.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_pending_entries_survive_poll() {
        let mut s = state();
        s.history = vec![item(1, Role::User, "old")];
        s.begin_send("new", now());
        s.apply_server_history(vec![item(1, Role::User, "old"), item(2, Role::Assistant, "ok")]);
        assert_eq!(s.history.len(), 4);
        assert_eq!(s.history[3].text, REPLY_PLACEHOLDER);
    }

    #[test]
    fn test_poll_after_server_stored_message_shows_it_once() {
        let mut s = state();
        s.history = vec![item(1, Role::User, "old")];
        s.begin_send("hello", now());
        s.request_history(FetchReason::Poll);
        s.apply_server_history(vec![item(1, Role::User, "old"), item(2, Role::User, "hello")]);

        let texts: Vec<&str> = s.history.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["old", "hello", REPLY_PLACEHOLDER]);
        assert_eq!(s.history[1].id, 2);

        // The reply still lands in the placeholder
        let pending = s.pending.unwrap();
        s.complete_send(pending, "hi!");
        assert_eq!(s.history[2].text, "hi!");
    }

    #[test]
    fn test_older_message_with_same_text_keeps_optimistic_entry() {
        let mut s = state();
        s.history = vec![item(1, Role::User, "hello"), item(2, Role::Assistant, "hey")];
        s.begin_send("hello", now());
        s.apply_server_history(vec![item(1, Role::User, "hello"), item(2, Role::Assistant, "hey")]);

        let ids: Vec<i64> = s.history.iter().map(|h| h.id).collect();
        let pending = s.pending.unwrap();
        assert_eq!(ids, vec![1, 2, pending.user_id, pending.assistant_id]);
    }

    #[test]
    fn test_display_is_newest_first() {
        let mut s = state();
        s.history = vec![item(1, Role::User, "a"), item(2, Role::Assistant, "b")];
        let ids: Vec<i64> = s.display().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_start_edit_only_for_confirmed_user_messages() {
        let mut s = state();
        assert!(!s.start_edit(&item(2, Role::Assistant, "b")));
        assert!(!s.start_edit(&item(-7, Role::User, "tmp")));
        assert!(s.start_edit(&item(1, Role::User, "a")));
        assert!(s.is_editing(1));
        assert_eq!(s.edit.as_ref().unwrap().text, "a");
        s.cancel_edit();
        assert!(s.edit.is_none());
    }

    #[test]
    fn test_save_edit_actions() {
        let mut s = state();
        s.start_edit(&item(4, Role::User, "a"));
        s.edit.as_mut().unwrap().text = " fixed ".into();
        assert_eq!(
            s.save_edit(true),
            Some(BackendAction::EditRegenerate {
                id: 4,
                text: "fixed".into()
            })
        );
        assert!(s.save_edit(true).is_none(), "double submit is refused");

        s.edit_failed("not_found".into());
        assert_eq!(s.error.as_deref(), Some("not_found"));
        assert!(s.edit.is_some(), "draft stays open after failure");
        assert_eq!(
            s.save_edit(false),
            Some(BackendAction::UpdateMessage {
                id: 4,
                text: "fixed".into()
            })
        );
    }

    #[test]
    fn test_save_empty_edit_is_rejected() {
        let mut s = state();
        s.start_edit(&item(4, Role::User, "a"));
        s.edit.as_mut().unwrap().text = "   ".into();
        assert!(s.save_edit(false).is_none());
        assert!(s.error.is_some());
        assert!(!s.saving_edit);
    }

    #[test]
    fn test_apply_edit_regenerated_truncates_after_message() {
        let mut s = state();
        s.history = vec![
            item(1, Role::User, "q1"),
            item(2, Role::Assistant, "a1"),
            item(3, Role::User, "q2"),
            item(4, Role::Assistant, "a2"),
        ];
        let first = s.history[0].clone();
        s.start_edit(&first);
        s.save_edit(true);
        s.apply_edit_regenerated(item(1, Role::User, "q1 edited"), item(5, Role::Assistant, "new"));
        let texts: Vec<&str> = s.history.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["q1 edited", "new"]);
        assert!(s.edit.is_none());
        assert!(!s.saving_edit);
    }

    #[test]
    fn test_apply_message_updated() {
        let mut s = state();
        s.history = vec![item(1, Role::User, "q1"), item(2, Role::Assistant, "a1")];
        s.apply_message_updated(item(1, Role::User, "q1!"));
        assert_eq!(s.history[0].text, "q1!");
        assert_eq!(s.history[1].text, "a1");
    }

    #[test]
    fn test_reset_flow() {
        let mut s = state();
        s.history = vec![item(1, Role::User, "q1")];
        assert_eq!(s.begin_reset(), Some(BackendAction::DeleteHistory));
        assert!(s.begin_reset().is_none(), "disabled while loading");
        s.history_cleared();
        assert!(s.history.is_empty());
        assert!(!s.loading);

        s.begin_reset();
        s.reset_failed(String::new());
        assert_eq!(s.error.as_deref(), Some("failed to delete history"));
    }

    #[test]
    fn test_history_failed_default_message() {
        let mut s = state();
        s.request_history(FetchReason::Poll);
        s.history_failed(String::new());
        assert_eq!(s.error.as_deref(), Some(HISTORY_FAILED));
        assert!(!s.history_in_flight);
    }
}
