//! # Slotbroker Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The scheduling resolution engine (time expression resolution,
//!   slot matching, webhook authentication)
//! - Port/adapter interfaces (traits)
//! - The booking orchestration service
//!
//! ## Architecture Principles
//! - Only depends on `slotbroker-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod matching;
pub mod render;
pub mod resolve;
pub mod scheduling;
pub mod webhook;

// Re-export specific items to avoid ambiguity
pub use matching::SlotMatcher;
pub use resolve::{DateExpression, TimeExpressionResolver};
pub use scheduling::ports::{Clock, SchedulingProvider, SystemClock};
pub use scheduling::{SchedulingConfig, SchedulingService};
pub use webhook::{is_registered, WebhookVerifier};
