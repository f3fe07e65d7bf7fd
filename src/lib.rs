// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # LBFO - Load-Balancing Framework Operator for Kubernetes
//!
//! LBFO manages external load balancers through Custom Resource Definitions
//! (CRDs) and vendor drivers. This library provides the CRD types and the
//! admission mutation logic the operator's webhook runs before resources are
//! persisted.
//!
//! ## Overview
//!
//! This library provides:
//!
//! - Custom Resource Definitions for backend groups and load balancer drivers
//! - Deterministic JSON Patch synthesis for the mutating admission webhook
//! - The registry of webhooks every driver must declare
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types
//! - [`admission`] - JSON Patch builders for the mutating webhook
//! - [`admission_errors`] - Error types for the mutation phase
//! - [`webhooks`] - Required driver webhook names and default timeouts
//! - [`duration`] - Go-style duration values for webhook timeouts
//! - [`constants`] - API group, labels, finalizers, defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! use lbfo::admission::mutate_backend_group;
//! use lbfo::crd::{BackendGroup, BackendGroupSpec};
//!
//! let group = BackendGroup::new(
//!     "web-backends",
//!     BackendGroupSpec {
//!         lb_name: "lb-1".to_string(),
//!         service: None,
//!         pods: None,
//!         static_addresses: None,
//!         parameters: None,
//!     },
//! );
//!
//! // The webhook handler serializes these into the admission response.
//! let patches = mutate_backend_group(&group).unwrap();
//! ```
//!
//! The webhook HTTP transport, certificate handling, and the controllers that
//! reconcile the mutated resources live in the operator binary, not here.

pub mod admission;
pub mod admission_errors;
pub mod constants;
pub mod crd;
pub mod duration;
pub mod webhooks;

#[cfg(test)]
mod webhooks_tests;
