//! Backend main event loop.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::handlers::handle_backend_action;
use super::BackendConfig;
use crate::api::ChatApi;
use crate::protocol::{BackendAction, GuiEvent};

/// How long the loop sleeps when no action is pending.
const IDLE_SLEEP: Duration = Duration::from_millis(20);

/// Run the backend event loop on a tokio runtime.
///
/// Each action runs as its own task so a slow ask never delays a history
/// poll. Returns when the UI drops its sender or sends `Shutdown`.
pub fn run_backend(
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
    config: BackendConfig,
) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    let api = match ChatApi::new(&config.api_base, config.request_timeout) {
        Ok(api) => api,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create HTTP client: {}",
                e
            )));
            return;
        }
    };
    info!(base = %api.base(), "chat backend started");

    rt.block_on(async move {
        loop {
            // Drain actions from the UI (non-blocking)
            loop {
                match action_rx.try_recv() {
                    Ok(BackendAction::Shutdown) => {
                        info!("chat backend shutting down");
                        return;
                    }
                    Ok(action) => {
                        debug!(?action, "dispatching action");
                        let api = api.clone();
                        let tx = event_tx.clone();
                        tokio::spawn(async move {
                            handle_backend_action(action, &api, &tx).await;
                        });
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        info!("UI closed, chat backend exiting");
                        return;
                    }
                }
            }

            tokio::time::sleep(IDLE_SLEEP).await;
        }
    });
}
