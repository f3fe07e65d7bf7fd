// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the admission mutation phase.
//!
//! Mutation is pure computation over an in-memory resource snapshot, so the
//! only failure class is a precondition violation: a field the mutator derives
//! values from is empty when it must not be. Such requests must be rejected by
//! the caller; the mutator never papers over them with an empty patch value.

use thiserror::Error;

/// Errors that can occur while computing admission patches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// `spec.lbName` is empty on a `BackendGroup`.
    ///
    /// The association label value is derived from `spec.lbName`; an empty
    /// value would produce a label patch that breaks load balancer selection,
    /// so the admission request is rejected instead.
    #[error("BackendGroup '{name}' has an empty spec.lbName; cannot derive the {label} label")]
    MissingLbName {
        /// Name of the offending `BackendGroup` (may be empty on CREATE with generateName)
        name: String,
        /// The association label that could not be derived
        label: &'static str,
    },
}
