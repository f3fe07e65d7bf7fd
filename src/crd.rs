// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for load-balancing management.
//!
//! This module defines the Kubernetes Custom Resource Definitions used by the
//! LBF operator to manage external load balancers declaratively.
//!
//! # Resource Types
//!
//! - [`BackendGroup`] - A group of backends (service ports, pod ports, or
//!   static addresses) registered to a load balancer
//! - [`LoadBalancerDriver`] - A driver deployment that translates LBF webhook
//!   calls into vendor-specific load balancer API calls
//!
//! # Example: Creating a Backend Group
//!
//! ```rust
//! use lbfo::crd::{BackendGroupSpec, PodBackend, PortSelector, SelectPodByLabel};
//! use std::collections::BTreeMap;
//!
//! let spec = BackendGroupSpec {
//!     lb_name: "lb-1".to_string(),
//!     service: None,
//!     pods: Some(PodBackend {
//!         port: PortSelector {
//!             port_number: 8080,
//!             protocol: None, // defaulted to "TCP" by the mutating webhook
//!         },
//!         by_label: Some(SelectPodByLabel {
//!             selector: BTreeMap::from([("app".to_string(), "web".to_string())]),
//!             except: None,
//!         }),
//!         by_name: None,
//!     }),
//!     static_addresses: None,
//!     parameters: None,
//! };
//! ```

use crate::duration::GoDuration;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Condition represents an observation of a resource's current state.
///
/// Conditions are used in status subresources to communicate the state of
/// a resource to users and controllers.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Condition {
    /// Type of condition. Common types include: Ready, Registered, Degraded.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// A port on a backend, with an optional protocol.
///
/// The protocol is left optional so users can omit it; the mutating admission
/// webhook fills in `"TCP"` for populated backends with an unset protocol.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortSelector {
    /// Port number the load balancer forwards traffic to.
    #[schemars(range(min = 1, max = 65535))]
    pub port_number: i32,

    /// Protocol of the port, "TCP" or "UDP". Defaults to "TCP" when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Service-style backend: a named Kubernetes Service and one of its ports.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackend {
    /// Name of the Service whose NodePort is registered to the load balancer.
    #[schemars(regex(pattern = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$"))]
    pub name: String,

    /// The Service port to register.
    pub port: PortSelector,

    /// Only nodes matching these labels are registered as backends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
}

/// Pod selection by label, with an optional exclusion list.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectPodByLabel {
    /// Pods matching all of these labels are selected.
    pub selector: BTreeMap<String, String>,

    /// Pod names excluded even when their labels match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub except: Option<Vec<String>>,
}

/// Pod-style backend: pods selected by label or by name, plus a port.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodBackend {
    /// The pod port to register.
    pub port: PortSelector,

    /// Select pods by label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_label: Option<SelectPodByLabel>,

    /// Select pods by an explicit list of names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_name: Option<Vec<String>>,
}

#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "lbf.firestoned.io",
    version = "v1beta1",
    kind = "BackendGroup",
    namespaced,
    doc = "BackendGroup declares a set of backends (service ports, pod ports, or static addresses) to be registered to a load balancer. Exactly one backend style should be populated."
)]
#[kube(status = "BackendGroupStatus")]
#[serde(rename_all = "camelCase")]
pub struct BackendGroupSpec {
    /// Name of the `LoadBalancer` this group registers backends to.
    ///
    /// The mutating admission webhook copies this value into the
    /// `lbf.firestoned.io/lb-name` label so controllers can select groups
    /// by load balancer.
    pub lb_name: String,

    /// Service-style backends. Mutually exclusive with `pods` and `static`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceBackend>,

    /// Pod-style backends. Mutually exclusive with `service` and `static`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pods: Option<PodBackend>,

    /// Static backend addresses. Mutually exclusive with `service` and `pods`.
    #[serde(skip_serializing_if = "Option::is_none", rename = "static")]
    pub static_addresses: Option<Vec<String>>,

    /// Driver-specific parameters passed through on backend registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
}

/// `BackendGroup` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackendGroupStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Total number of backends selected by this group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backends: Option<i32>,
    /// Number of backends currently registered to the load balancer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_backends: Option<i32>,
}

/// A webhook a driver exposes, with an invocation timeout.
///
/// The mutating admission webhook guarantees every known webhook name is
/// declared on each `LoadBalancerDriver`, appending missing entries with the
/// default timeout.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    /// Name of the webhook (e.g., "createLoadBalancer").
    pub name: String,

    /// Timeout for a single invocation of this webhook (e.g., "10s").
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub timeout: Option<GoDuration>,
}

#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "lbf.firestoned.io",
    version = "v1beta1",
    kind = "LoadBalancerDriver",
    namespaced,
    doc = "LoadBalancerDriver registers a driver deployment that translates LBF webhook calls into vendor-specific load balancer operations."
)]
#[kube(status = "LoadBalancerDriverStatus")]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerDriverSpec {
    /// Type of the driver. Only "Webhook" is currently supported.
    pub driver_type: String,

    /// Base URL the operator invokes driver webhooks against.
    pub url: String,

    /// Per-webhook configuration. Entries for known webhooks that are
    /// missing here are filled in by the mutating admission webhook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<Vec<WebhookConfig>>,
}

/// `LoadBalancerDriver` status
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerDriverStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}
