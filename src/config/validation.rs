//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<_>>
//! - Serde handles the syntactic layer; this module covers semantics

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: u64 },
}

/// Check the configuration for semantic problems, collecting every
/// error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let urls = [
        ("upstreams.pets_url", &config.upstreams.pets_url),
        ("upstreams.applications_url", &config.upstreams.applications_url),
        ("upstreams.history_url", &config.upstreams.history_url),
    ];
    for (field, value) in urls {
        if let Err(err) = Url::parse(value) {
            errors.push(ValidationError::InvalidUrl {
                field,
                reason: err.to_string(),
            });
        }
    }

    if let Err(err) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            reason: err.to_string(),
        });
    }
    if config.observability.metrics_enabled {
        if let Err(err) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                reason: err.to_string(),
            });
        }
    }

    let minimums = [
        ("retry.attempts", u64::from(config.retry.attempts)),
        ("breaker.fail_max", u64::from(config.breaker.fail_max)),
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("cache.ttl_secs", config.cache.ttl_secs),
    ];
    for (field, value) in minimums {
        if value == 0 {
            errors.push(ValidationError::BelowMinimum { field, min: 1 });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_problem() {
        let mut config = GatewayConfig::default();
        config.upstreams.pets_url = "not a url".into();
        config.retry.attempts = 0;
        config.cache.ttl_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_unparseable_bind_address() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::InvalidAddress {
                field: "listener.bind_address",
                ..
            }
        ));
    }
}
