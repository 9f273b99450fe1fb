//! External service integrations

pub mod calendly;
