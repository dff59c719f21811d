//! Core ChatApp struct definition and initialization

use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

use crate::backend::{run_backend, BackendConfig};
use crate::config::{load_settings, save_settings, Settings};
use crate::input_state::InputState;
use crate::poller::{PollTimer, Visibility};
use crate::protocol::{BackendAction, GuiEvent};
use crate::state::{ChatState, FetchReason};
use crate::ui;
use crate::ui::dialogs::ConfirmResetDialog;

pub struct ChatApp {
    // Conversation state (history, flags, edit draft)
    pub state: ChatState,

    // Message composition
    pub input: InputState,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    // History polling
    pub poller: PollTimer,
    pub visibility: Visibility,

    pub settings: Settings,

    // Reset confirmation (None = closed)
    pub reset_dialog: Option<ConfirmResetDialog>,
}

impl ChatApp {
    pub(super) fn get_theme(&self) -> ui::theme::ChatTheme {
        ui::theme::ChatTheme::from_name(&self.settings.theme)
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings();
        info!(api_base = %settings.api_base, "starting chat client");

        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        let backend_config = BackendConfig {
            api_base: settings.api_base.clone(),
            request_timeout: settings.request_timeout(),
        };
        thread::spawn(move || {
            run_backend(action_rx, event_tx, backend_config);
        });

        match settings.theme.as_str() {
            "light" => cc.egui_ctx.set_visuals(egui::Visuals::light()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
        }
        ui::theme::apply_app_style(&cc.egui_ctx, &ui::theme::ChatTheme::from_name(&settings.theme));

        Self::with_channels(settings, action_tx, event_rx)
    }

    /// Build the app around existing channels and kick off the first
    /// history load and the poll timer.
    pub fn with_channels(
        settings: Settings,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        let mut app = Self {
            state: ChatState::new(&settings),
            input: InputState::new(),
            action_tx,
            event_rx,
            poller: PollTimer::new(settings.poll_interval()),
            visibility: Visibility::Visible,
            settings,
            reset_dialog: None,
        };

        app.refresh_history(FetchReason::Poll);
        app.poller.start(Instant::now());
        app
    }

    /// Send an action to the backend.
    pub(crate) fn dispatch(&mut self, action: BackendAction) {
        if let Err(e) = self.action_tx.send(action) {
            warn!(action = ?e.0, "backend is not running");
            self.state.error = Some("The chat backend is not running".to_string());
        }
    }

    pub(crate) fn refresh_history(&mut self, reason: FetchReason) {
        if let Some(action) = self.state.request_history(reason) {
            self.dispatch(action);
        }
    }

    /// Send the composed message, if allowed.
    pub(crate) fn submit_message(&mut self) {
        if let Some(action) = self.state.begin_send(&self.input.message_input, Utc::now()) {
            self.dispatch(action);
        }
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility, now: Instant) {
        if visibility != self.visibility {
            info!(?visibility, "window visibility changed");
            self.visibility = visibility;
            self.poller.set_visibility(visibility, now);
        }
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(BackendAction::Shutdown);
        // Persist settings on exit
        if let Err(e) = save_settings(&self.settings) {
            warn!(error = %e, "failed to save settings");
        }
    }
}
