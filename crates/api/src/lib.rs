//! HTTP surface for the scheduling broker
//!
//! Hosts the booking endpoint, the confirmation webhook callback, the
//! OAuth handshake, and the email-template admin route. All scheduling
//! decisions live in `slotbroker-core`; this crate only translates
//! between HTTP and the orchestrator.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::Settings;
pub use state::AppState;
