//! Event-to-WebSocket forwarding.

mod broadcaster;

pub use broadcaster::FichaBroadcaster;
