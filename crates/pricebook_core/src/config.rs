//! Configuration for the synchronization core.

use std::time::Duration;

/// How strictly `update` validates the gross price.
///
/// Some calling contexts (a full edit form) require a positive gross
/// price; others (quick inline edits) accept absence or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrossPricePolicy {
    /// Absent or zero gross price is accepted and coerced to zero.
    #[default]
    Optional,
    /// The gross price must be a finite number greater than zero.
    Required,
}

/// Configuration for a [`crate::PriceBook`].
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Deadline for every remote request.
    pub remote_timeout: Duration,
    /// Gross-price validation policy for updates.
    pub gross_price_policy: GrossPricePolicy,
}

impl CoreConfig {
    /// Creates the default configuration (15 s remote deadline,
    /// optional gross price).
    #[must_use]
    pub fn new() -> Self {
        Self {
            remote_timeout: Duration::from_secs(15),
            gross_price_policy: GrossPricePolicy::Optional,
        }
    }

    /// Sets the remote request deadline.
    #[must_use]
    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Sets the gross-price validation policy.
    #[must_use]
    pub fn with_gross_price_policy(mut self, policy: GrossPricePolicy) -> Self {
        self.gross_price_policy = policy;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = CoreConfig::new()
            .with_remote_timeout(Duration::from_secs(5))
            .with_gross_price_policy(GrossPricePolicy::Required);

        assert_eq!(config.remote_timeout, Duration::from_secs(5));
        assert_eq!(config.gross_price_policy, GrossPricePolicy::Required);
    }

    #[test]
    fn default_timeout_is_fifteen_seconds() {
        assert_eq!(CoreConfig::default().remote_timeout, Duration::from_secs(15));
    }
}
