//! Confirmation before deleting the whole conversation.

use eframe::egui;

use super::DialogAction;

pub struct ConfirmResetDialog {
    /// Whether the dialog is visible
    pub open: bool,
}

impl ConfirmResetDialog {
    pub fn new() -> Self {
        Self { open: true }
    }

    /// Returns `Some(DialogAction::ConfirmReset)` once the user confirms.
    pub fn render(&mut self, ctx: &egui::Context) -> Option<DialogAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let mut still_open = true;

        egui::Window::new("Reset conversation")
            .open(&mut still_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Delete the whole conversation? This cannot be undone.");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        action = Some(DialogAction::ConfirmReset);
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });

                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    self.open = false;
                }
            });

        if !still_open {
            self.open = false;
        }

        action
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Default for ConfirmResetDialog {
    fn default() -> Self {
        Self::new()
    }
}
