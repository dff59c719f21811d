//! Message input row: text box, Send and Reset

use eframe::egui;

use crate::app::ChatApp;
use crate::input_state::{EnterOutcome, EnterPress};

const INPUT_ID: &str = "chat_message_input";

impl ChatApp {
    pub(in crate::app) fn render_input_row(&mut self, ui: &mut egui::Ui) {
        let input_id = egui::Id::new(INPUT_ID);
        let busy = !self.state.can_send();

        // Track IME composition so Enter that confirms a conversion is not a send
        ui.input(|i| {
            for event in &i.events {
                if let egui::Event::Ime(ime) = event {
                    match ime {
                        egui::ImeEvent::Preedit(text) => self.input.on_preedit(text),
                        egui::ImeEvent::Commit(_) | egui::ImeEvent::Disabled => {
                            self.input.end_composition()
                        }
                        _ => {}
                    }
                }
            }
        });

        // Look at Enter before the text box does so a suppressed press does
        // not insert a newline.
        let mut submit = false;
        if ui.memory(|m| m.has_focus(input_id)) {
            let press = ui.input(|i| {
                i.events.iter().find_map(|e| match e {
                    egui::Event::Key {
                        key: egui::Key::Enter,
                        pressed: true,
                        repeat,
                        modifiers,
                        ..
                    } => Some(EnterPress {
                        shift: modifiers.shift,
                        repeat: *repeat,
                    }),
                    _ => None,
                })
            });
            if let Some(press) = press {
                match self.input.on_enter(press, busy) {
                    EnterOutcome::Submit => {
                        ui.input_mut(|i| {
                            i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
                        });
                        submit = true;
                    }
                    EnterOutcome::Suppress => {
                        ui.input_mut(|i| {
                            i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
                        });
                    }
                    EnterOutcome::PassThrough => {}
                }
            }
        }

        let theme = self.get_theme();
        ui.horizontal(|ui| {
            let buttons_width = 150.0;
            let response = ui.add(
                egui::TextEdit::multiline(&mut self.input.message_input)
                    .id(input_id)
                    .desired_rows(2)
                    .desired_width(ui.available_width() - buttons_width)
                    .hint_text("Type a message… (Enter to send, Shift+Enter for newline)"),
            );

            if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.input.clear();
            }

            let can_click_send = !self.input.is_blank() && !self.state.loading;
            if ui
                .add_enabled(
                    can_click_send,
                    egui::Button::new(egui::RichText::new("Send").color(egui::Color32::WHITE))
                        .fill(theme.accent),
                )
                .clicked()
            {
                submit = true;
            }
            if ui
                .add_enabled(!self.state.loading, egui::Button::new("Reset"))
                .on_hover_text("Delete the whole conversation")
                .clicked()
            {
                self.open_reset_dialog();
            }
        });

        if submit {
            self.submit_message();
        }
    }
}
