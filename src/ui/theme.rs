//! Color themes and styling for the chat window.
//!
//! `surface[0]` is the window background, `surface[1]` panels, `surface[2]`
//! message cards. Assistant messages sit one level above user messages so the
//! two speakers are told apart at a glance.

use eframe::egui::{Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct ChatTheme {
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub error: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
}

impl ChatTheme {
    pub fn dark() -> Self {
        Self {
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
                Color32::from_rgb(37, 37, 50),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border_medium: Color32::from_rgb(47, 49, 54),
        }
    }

    pub fn light() -> Self {
        Self {
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::WHITE,
                Color32::from_rgb(248, 250, 252),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            error: Color32::from_rgb(220, 20, 60),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_medium: Color32::from_rgb(229, 231, 235),
        }
    }

    /// "light" selects the light theme, anything else the dark one.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(11.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(20.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
    ]
    .into()
}

/// Apply spacing, typography and widget styling. Call once at startup.
pub fn apply_app_style(ctx: &eframe::egui::Context, theme: &ChatTheme) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = configure_text_styles();

    style.spacing.item_spacing = eframe::egui::vec2(8.0, 6.0);
    style.spacing.window_margin = eframe::egui::Margin::same(12);
    style.spacing.button_padding = eframe::egui::vec2(10.0, 5.0);

    style.visuals.widgets.inactive.corner_radius = eframe::egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = eframe::egui::CornerRadius::same(6);
    style.visuals.widgets.active.bg_fill = theme.accent;
    style.visuals.widgets.active.weak_bg_fill = theme.accent;
    style.visuals.widgets.active.corner_radius = eframe::egui::CornerRadius::same(6);

    style.visuals.selection.bg_fill = selection_fill(theme.accent);

    ctx.set_style(style);
}

/// Translucent accent for text selection.
fn selection_fill(accent: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), 100)
}
