//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use slotbroker_domain::SchedulerError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SchedulerError);

impl From<InfraError> for SchedulerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SchedulerError> for InfraError {
    fn from(value: SchedulerError) -> Self {
        Self(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let detail = if err.is_timeout() {
            "request timed out".to_owned()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_decode() {
            format!("failed to decode provider response: {err}")
        } else {
            err.to_string()
        };
        Self(SchedulerError::Provider(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infra_error_round_trips_to_domain() {
        let err = InfraError(SchedulerError::Provider("boom".into()));
        let domain: SchedulerError = err.into();
        assert!(matches!(domain, SchedulerError::Provider(_)));
    }
}
