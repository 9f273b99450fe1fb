//! Calendly REST API integration
//!
//! Implements the `SchedulingProvider` port over the hosted Calendly API
//! and the OAuth authorization-code exchange that supplies the access
//! token for it.

pub mod client;
pub mod oauth;

pub use client::CalendlyClient;
pub use oauth::{CalendlyOAuth, OAuthSettings, TokenResponse};
