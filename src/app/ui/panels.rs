//! Header and message panel rendering

use eframe::egui;

use crate::app::ChatApp;
use crate::ui;
use crate::ui::messages::MessageAction;

impl ChatApp {
    /// Title, input row, and the loading/error lines.
    pub(in crate::app) fn render_header(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(16, 12))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                ui.heading("Codecheck Chat");
                ui.add_space(6.0);

                self.render_input_row(ui);

                if self.state.loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Waiting…").color(theme.text_muted));
                    });
                }
                if let Some(err) = &self.state.error {
                    ui.colored_label(theme.error, format!("Error: {}", err));
                }
            });
    }

    /// Message list, newest first.
    pub(in crate::app) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let theme = self.get_theme();
        let scroll_to_top = std::mem::take(&mut self.state.scroll_to_top);
        // Held outside the state while rendering so the list can borrow it
        let mut edit = self.state.edit.take();

        let action = egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[0])
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui::messages::render_messages(
                    ui,
                    self.state.display(),
                    edit.as_mut(),
                    self.state.saving_edit,
                    &theme,
                    scroll_to_top,
                )
            })
            .inner;
        self.state.edit = edit;

        if let Some(action) = action {
            self.handle_message_action(action);
        }
    }

    fn handle_message_action(&mut self, action: MessageAction) {
        match action {
            MessageAction::StartEdit(item) => {
                self.state.start_edit(&item);
            }
            MessageAction::SaveEdit { regenerate } => {
                if let Some(action) = self.state.save_edit(regenerate) {
                    self.dispatch(action);
                }
            }
            MessageAction::CancelEdit => self.state.cancel_edit(),
        }
    }
}
