//! Dialog rendering orchestration

use eframe::egui;

use super::ChatApp;
use crate::ui;
use crate::ui::dialogs::DialogAction;

impl ChatApp {
    /// Render all dialogs and handle their actions
    pub(super) fn render_dialogs(&mut self, ctx: &egui::Context) {
        // Floating status toasts (top-right corner)
        ui::dialogs::render_status_toasts(ctx, &self.state.status_messages);

        let action = self.reset_dialog.as_mut().and_then(|d| d.render(ctx));
        if self.reset_dialog.as_ref().is_some_and(|d| !d.is_open()) {
            self.reset_dialog = None;
        }

        if let Some(action) = action {
            self.handle_dialog_action(action);
        }
    }

    fn handle_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::ConfirmReset => {
                if let Some(action) = self.state.begin_reset() {
                    self.dispatch(action);
                }
            }
        }
    }

    pub(super) fn open_reset_dialog(&mut self) {
        if self.state.can_send() {
            self.reset_dialog = Some(ui::dialogs::ConfirmResetDialog::new());
        }
    }
}
