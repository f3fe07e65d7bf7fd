// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Admission mutation for LBF custom resources.
//!
//! The mutating webhook normalizes resources before they are persisted:
//! `BackendGroup` objects get the lb-name association label, the group
//! finalizer, and a defaulted port protocol; `LoadBalancerDriver` objects get
//! a complete set of webhook declarations. The normalization is expressed as
//! an RFC 6902 JSON Patch computed here and applied by the API server.
//!
//! The webhook transport (TLS, the `AdmissionReview` envelope, patch
//! base64-encoding) lives outside this crate; these modules only compute
//! patch content.
//!
//! - [`patch`] - patch primitives: ops, pointer escaping, path construction
//! - [`mutate`] - per-resource patch builders

pub mod mutate;
pub mod patch;

pub use mutate::{
    mutate_backend_group, mutate_driver, BackendGroupPatchBuilder, DriverPatchBuilder,
};
pub use patch::{Patch, PatchOp};
