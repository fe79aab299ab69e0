//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`FichaEvent`]s. Handlers
//! publish after each successful write; the WebSocket broadcaster subscribes
//! and pushes every event to connected clients. Delivery is best-effort: a
//! full buffer drops the oldest events and a bus with no subscribers drops
//! everything, which is acceptable because clients reconcile by re-fetching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use irs_core::types::DbId;

// ---------------------------------------------------------------------------
// FichaEvent
// ---------------------------------------------------------------------------

/// What happened to a fiche.
///
/// The serialized names mirror the notification methods the SPA already
/// listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FichaEventKind {
    #[serde(rename = "FichaCreada")]
    Creada,
    #[serde(rename = "FichaActualizada")]
    Actualizada,
    #[serde(rename = "FichaEliminada")]
    Eliminada,
}

/// One fiche lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FichaEvent {
    /// Event discriminator, serialized as `tipo`.
    #[serde(rename = "tipo")]
    pub kind: FichaEventKind,

    /// Id of the fiche the event concerns.
    #[serde(rename = "idFicha")]
    pub ficha_id: DbId,

    /// Optional id of the user that triggered the event.
    #[serde(rename = "idUsuario")]
    pub actor_user_id: Option<DbId>,

    /// Event-specific payload; the created/updated row for pushes, empty for
    /// deletions.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl FichaEvent {
    /// Create a new event with an empty payload.
    pub fn new(kind: FichaEventKind, ficha_id: DbId) -> Self {
        Self {
            kind,
            ficha_id,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers independently
/// receive every published [`FichaEvent`]. Designed to be shared via
/// `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<FichaEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped.
    pub fn publish(&self, event: FichaEvent) {
        // The SendError only means there are no receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<FichaEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
