// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the load-balancing framework operator.
//!
//! This module contains the API identifiers, labels, finalizers, and defaults
//! shared by the admission webhook and the CRD definitions.

// ============================================================================
// API Constants
// ============================================================================

/// API group for all LBF CRDs
pub const API_GROUP: &str = "lbf.firestoned.io";

/// API version for all LBF CRDs
pub const API_VERSION: &str = "v1beta1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "lbf.firestoned.io/v1beta1";

/// Kind name for `BackendGroup` resource
pub const KIND_BACKEND_GROUP: &str = "BackendGroup";

/// Kind name for `LoadBalancerDriver` resource
pub const KIND_LOAD_BALANCER_DRIVER: &str = "LoadBalancerDriver";

// ============================================================================
// Labels
// ============================================================================

/// Label recording which load balancer a `BackendGroup` belongs to.
///
/// The mutating admission webhook keeps this label in sync with
/// `spec.lbName` so controllers can select backend groups by load balancer.
pub const LABEL_LB_NAME: &str = "lbf.firestoned.io/lb-name";

// ============================================================================
// Finalizers
// ============================================================================

/// Finalizer for `BackendGroup` resources.
///
/// Blocks deletion until all backends registered from the group have been
/// deregistered by the controller.
pub const FINALIZER_BACKEND_GROUP: &str = "lbf.firestoned.io/backend-group";

/// Finalizer for `LoadBalancerDriver` resources
pub const FINALIZER_DRIVER: &str = "lbf.firestoned.io/driver";

// ============================================================================
// Defaults
// ============================================================================

/// Default protocol for backend ports when the user leaves it unset
pub const DEFAULT_PORT_PROTOCOL: &str = "TCP";

/// Default timeout, in seconds, for driver webhook invocations
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
