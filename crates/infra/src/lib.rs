//! # Slotbroker Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The calendar provider HTTP client (Calendly REST API)
//! - OAuth authorization-code exchange
//! - The process-wide access token store
//!
//! ## Architecture
//! - Implements traits defined in `slotbroker-core`
//! - Depends on `slotbroker-domain` and `slotbroker-core`
//! - Contains all "impure" code (network I/O)

pub mod errors;
pub mod integrations;
pub mod token_store;

// Re-export commonly used items
pub use integrations::calendly::{CalendlyClient, CalendlyOAuth, OAuthSettings, TokenResponse};
pub use token_store::AccessTokenStore;
