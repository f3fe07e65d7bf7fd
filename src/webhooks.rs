// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The registry of webhooks every `LoadBalancerDriver` must declare.
//!
//! The operator invokes drivers through a fixed set of named webhooks. The
//! mutating admission webhook uses [`WebhookRegistry`] to fill in declarations
//! a driver manifest leaves out, so controllers can always look up a timeout
//! for any webhook they call.
//!
//! The registry is passed explicitly to the patch builders rather than read
//! from global state, so mutation is a pure function of its inputs and the
//! required set can be narrowed in tests.

use crate::constants::DEFAULT_WEBHOOK_TIMEOUT_SECS;
use crate::duration::GoDuration;

// ============================================================================
// Webhook Names
// ============================================================================

/// Webhook validating a `LoadBalancer` spec against the driver.
pub const WEBHOOK_VALIDATE_LOAD_BALANCER: &str = "validateLoadBalancer";

/// Webhook creating the external load balancer.
pub const WEBHOOK_CREATE_LOAD_BALANCER: &str = "createLoadBalancer";

/// Webhook converging the external load balancer on its desired attributes.
pub const WEBHOOK_ENSURE_LOAD_BALANCER: &str = "ensureLoadBalancer";

/// Webhook deleting the external load balancer.
pub const WEBHOOK_DELETE_LOAD_BALANCER: &str = "deleteLoadBalancer";

/// Webhook validating a `BackendGroup` spec against the driver.
pub const WEBHOOK_VALIDATE_BACKEND: &str = "validateBackend";

/// Webhook deriving a backend address from a selected pod, service, or static entry.
pub const WEBHOOK_GENERATE_BACKEND_ADDR: &str = "generateBackendAddr";

/// Webhook registering a backend address to the load balancer.
pub const WEBHOOK_ENSURE_BACKEND: &str = "ensureBackend";

/// Webhook deregistering a backend address from the load balancer.
pub const WEBHOOK_DEREGISTER_BACKEND: &str = "deregisterBackend";

/// Every webhook name a driver must declare, in canonical order.
///
/// The order is significant: missing declarations are appended in this order,
/// which keeps admission patches deterministic across repeated runs.
pub const KNOWN_WEBHOOKS: [&str; 8] = [
    WEBHOOK_VALIDATE_LOAD_BALANCER,
    WEBHOOK_CREATE_LOAD_BALANCER,
    WEBHOOK_ENSURE_LOAD_BALANCER,
    WEBHOOK_DELETE_LOAD_BALANCER,
    WEBHOOK_VALIDATE_BACKEND,
    WEBHOOK_GENERATE_BACKEND_ADDR,
    WEBHOOK_ENSURE_BACKEND,
    WEBHOOK_DEREGISTER_BACKEND,
];

/// An order-stable, read-only set of required webhook names plus the default
/// timeout applied to declarations the admission webhook fills in.
///
/// # Example
///
/// ```rust
/// use lbfo::duration::GoDuration;
/// use lbfo::webhooks::WebhookRegistry;
///
/// let registry = WebhookRegistry::default();
/// assert!(registry.contains("createLoadBalancer"));
/// assert_eq!(registry.default_timeout(), GoDuration::from_secs(10));
///
/// // A longer timeout for slow cloud APIs
/// let registry = WebhookRegistry::default().with_timeout(GoDuration::from_secs(30));
/// assert_eq!(registry.default_timeout().to_string(), "30s");
/// ```
#[derive(Clone, Debug)]
pub struct WebhookRegistry {
    names: Vec<String>,
    default_timeout: GoDuration,
}

impl Default for WebhookRegistry {
    /// The full set of [`KNOWN_WEBHOOKS`] with the stock 10s timeout.
    fn default() -> Self {
        Self::new(KNOWN_WEBHOOKS)
    }
}

impl WebhookRegistry {
    /// Build a registry over an explicit set of required names.
    ///
    /// Iteration order of `names` becomes the registry's canonical order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            default_timeout: GoDuration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS),
        }
    }

    /// Override the default timeout applied to filled-in declarations.
    #[must_use]
    pub fn with_timeout(mut self, timeout: GoDuration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Required webhook names, in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether `name` is a required webhook.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    /// Number of required webhooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry is empty (only meaningful in tests).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Timeout applied to webhook declarations the admission webhook fills in.
    #[must_use]
    pub fn default_timeout(&self) -> GoDuration {
        self.default_timeout
    }
}
