//! Domain core for the incident reporting service.
//!
//! Pure logic only: status classification, statistics aggregation, and the
//! shared error/type vocabulary. Everything here is synchronous and free of
//! I/O so it can be unit-tested with fixed inputs and a fixed clock.

pub mod classification;
pub mod error;
pub mod ficha;
pub mod stats;
pub mod types;
