//! Configuration validation.
//!
//! Semantic checks on top of what serde already enforces syntactically.
//! Returns all validation errors, not just the first, so a broken config
//! can be fixed in one pass.

use alloy::primitives::Address;

use crate::config::schema::GateConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "chain.rpc_url".into(),
            message: format!("not a valid URL: '{}'", config.chain.rpc_url),
        });
    }
    for failover in &config.chain.failover_urls {
        if failover.parse::<url::Url>().is_err() {
            errors.push(ValidationError {
                field: "chain.failover_urls".into(),
                message: format!("not a valid URL: '{}'", failover),
            });
        }
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.rpc_timeout_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.verification.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError {
            field: "verification.contract_address".into(),
            message: format!(
                "not a valid contract address: '{}'",
                config.verification.contract_address
            ),
        });
    }
    if config.verification.min_transfer_amount <= 0.0 {
        errors.push(ValidationError {
            field: "verification.min_transfer_amount".into(),
            message: "must be greater than zero".into(),
        });
    }
    if config.verification.role_id == 0 {
        errors.push(ValidationError {
            field: "verification.role_id".into(),
            message: "must be set".into(),
        });
    }

    if config.reconciler.interval_secs == 0 {
        errors.push(ValidationError {
            field: "reconciler.interval_secs".into(),
            message: "must be greater than zero".into(),
        });
    }
    if config.reconciler.max_concurrent_checks == 0 {
        errors.push(ValidationError {
            field: "reconciler.max_concurrent_checks".into(),
            message: "must be greater than zero".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
