//! Event processing from backend

use super::ChatApp;
use crate::events;

impl ChatApp {
    /// Drain backend events and send any follow-up actions.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            let followups = events::process_single_event(&mut self.state, &mut self.input, event);
            for action in followups {
                self.dispatch(action);
            }
        }
    }
}
