//! Message list rendering: one card per history item, newest first.

use eframe::egui;

use crate::api::{HistoryItem, Role};
use crate::state::EditDraft;
use crate::ui::theme::ChatTheme;

/// What the user did in the message list this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageAction {
    StartEdit(HistoryItem),
    SaveEdit { regenerate: bool },
    CancelEdit,
}

/// Render the list. `items` must already be in display order.
///
/// `edit` is the open draft, if any; its text is edited in place.
pub fn render_messages<'a>(
    ui: &mut egui::Ui,
    items: impl Iterator<Item = &'a HistoryItem>,
    mut edit: Option<&mut EditDraft>,
    saving_edit: bool,
    theme: &ChatTheme,
    scroll_to_top: bool,
) -> Option<MessageAction> {
    let mut action = None;

    let mut scroll = egui::ScrollArea::vertical()
        .id_salt("message_list")
        .auto_shrink([false, false]);
    if scroll_to_top {
        scroll = scroll.vertical_scroll_offset(0.0);
    }

    scroll.show(ui, |ui| {
        for item in items {
            let fill = match item.role {
                Role::Assistant => theme.surface[3],
                Role::User => theme.surface[2],
            };
            egui::Frame::new()
                .fill(fill)
                .stroke(egui::Stroke::new(1.0, theme.border_medium))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.add_sized(
                            [48.0, 18.0],
                            egui::Label::new(egui::RichText::new(item.role.label()).strong()),
                        );

                        let editing_this = edit.as_ref().is_some_and(|d| d.id == item.id);
                        if editing_this {
                            if let Some(draft) = edit.as_deref_mut() {
                                if let Some(a) = render_edit_row(ui, draft, saving_edit) {
                                    action = Some(a);
                                }
                            }
                        } else if let Some(a) = render_message_body(ui, item, theme) {
                            action = Some(a);
                        }
                    });
                });
            ui.add_space(4.0);
        }
    });

    action
}

fn render_message_body(
    ui: &mut egui::Ui,
    item: &HistoryItem,
    theme: &ChatTheme,
) -> Option<MessageAction> {
    let mut action = None;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if item.role == Role::User {
            let edit_btn = ui
                .add_enabled(!item.is_optimistic(), egui::Button::new("Edit"))
                .on_hover_text("Edit this message");
            if edit_btn.clicked() {
                action = Some(MessageAction::StartEdit(item.clone()));
            }
        }
        ui.label(
            egui::RichText::new(item.display_time())
                .small()
                .color(theme.text_muted),
        );
        ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
            ui.add(egui::Label::new(egui::RichText::new(&item.text).color(theme.text_primary)).wrap());
        });
    });
    action
}

fn render_edit_row(ui: &mut egui::Ui, draft: &mut EditDraft, saving: bool) -> Option<MessageAction> {
    let mut action = None;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if ui.add_enabled(!saving, egui::Button::new("Cancel")).clicked() {
            action = Some(MessageAction::CancelEdit);
        }
        if ui
            .add_enabled(!saving, egui::Button::new("Save & regenerate"))
            .on_hover_text("Save and replace the reply after this message")
            .clicked()
        {
            action = Some(MessageAction::SaveEdit { regenerate: true });
        }
        if ui.add_enabled(!saving, egui::Button::new("Save")).clicked() {
            action = Some(MessageAction::SaveEdit { regenerate: false });
        }
        if saving {
            ui.spinner();
        }
        let response = ui.add_enabled(
            !saving,
            egui::TextEdit::singleline(&mut draft.text).desired_width(ui.available_width()),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = Some(MessageAction::SaveEdit { regenerate: true });
        }
        if (response.has_focus() || response.lost_focus())
            && ui.input(|i| i.key_pressed(egui::Key::Escape))
        {
            action = Some(MessageAction::CancelEdit);
        }
    });
    action
}
