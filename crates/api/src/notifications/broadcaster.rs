//! Bus-to-WebSocket fan-out.
//!
//! [`FichaBroadcaster`] subscribes to the event bus and pushes every fiche
//! event to every connected client as a JSON text frame. Fire-and-forget:
//! no delivery guarantee, no replay; clients reconcile with a full re-fetch
//! after reconnecting.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use irs_events::FichaEvent;

use crate::ws::WsManager;

/// Forwards fiche events to all WebSocket clients.
pub struct FichaBroadcaster {
    ws_manager: Arc<WsManager>,
}

impl FichaBroadcaster {
    /// Create a new broadcaster over the given connection manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// Subscribes to the event bus via `receiver` and pushes each event.
    /// The loop exits when the channel closes (i.e. the
    /// [`EventBus`](irs_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<FichaEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Ficha broadcaster lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, ficha broadcaster shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and broadcast it.
    async fn forward(&self, event: &FichaEvent) {
        let frame = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize ficha event");
                return;
            }
        };

        tracing::debug!(ficha_id = event.ficha_id, "Broadcasting ficha event");
        self.ws_manager.broadcast(Message::Text(frame.into())).await;
    }
}
