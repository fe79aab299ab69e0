//! In-process event fan-out for fiche lifecycle notifications.

pub mod bus;

pub use bus::{EventBus, FichaEvent, FichaEventKind};
