//! Main update loop, history polling and window visibility

use eframe::egui;
use std::time::{Duration, Instant};

use super::ChatApp;
use crate::poller::Visibility;
use crate::state::FetchReason;

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process network events
        self.process_events();

        // A minimized window counts as hidden: polling pauses until restored
        let now = Instant::now();
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        let visibility = if minimized {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        self.set_visibility(visibility, now);

        if self.poller.tick(now) {
            self.refresh_history(FetchReason::Poll);
        }

        // Request repaint to keep checking for events and poll ticks
        ctx.request_repaint_after(Duration::from_millis(100));
        // Purge old status messages (toasts) older than 4 seconds
        self.state.purge_old_status_messages(4);

        self.render_header(ctx);
        self.render_central_panel(ctx);
        self.render_dialogs(ctx);
    }
}
