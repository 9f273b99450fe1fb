//! Booking orchestration
//!
//! Composes the resolver, matcher and webhook verifier with the external
//! provider collaborator to implement the end-to-end booking flows.

pub mod ports;
pub mod service;

pub use service::{SchedulingConfig, SchedulingService};
