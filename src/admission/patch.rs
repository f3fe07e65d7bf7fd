// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! RFC 6902 patch primitives for the mutating admission webhook.
//!
//! Admission responses carry a JSON Patch that the API server applies to the
//! submitted object. Everything here is a pure constructor: the builders in
//! [`crate::admission::mutate`] decide *whether* to patch, these functions
//! decide *what the patch looks like*, including JSON Pointer escaping and the
//! choice between `add` and `replace`.
//!
//! Wrong escaping or a wrong op silently corrupts objects in the cluster, so
//! path construction is never left to callers: label paths are built from raw
//! keys through [`escape_segment`].

use crate::constants::DEFAULT_PORT_PROTOCOL;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// JSON Pointer to the labels container.
pub const LABELS_PATH: &str = "/metadata/labels";

/// JSON Pointer to the finalizers list.
pub const FINALIZERS_PATH: &str = "/metadata/finalizers";

/// JSON Pointer to a driver's webhook declaration list.
pub const WEBHOOKS_PATH: &str = "/spec/webhooks";

/// The JSON Patch operations the mutating webhook emits.
///
/// Mutation only ever adds or corrects fields, so `remove`, `move`, `copy`,
/// and `test` are not represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Insert a value at the path (or replace it, for existing object keys).
    Add,
    /// Replace the existing value at the path; the path must already exist.
    Replace,
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOp::Add => write!(f, "add"),
            PatchOp::Replace => write!(f, "replace"),
        }
    }
}

/// A single RFC 6902 patch operation.
///
/// Serializes to the wire form the admission protocol expects:
/// `{"op": "add", "path": "/metadata/labels", "value": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub op: PatchOp,
    pub path: String,
    pub value: Value,
}

/// Escape a raw key for use as a JSON Pointer path segment.
///
/// Per RFC 6901, `~` becomes `~0` and `/` becomes `~1`. `~` must be escaped
/// first; the reverse order would corrupt keys containing both characters
/// (`~/` would become `~0~01` instead of `~0~1`).
///
/// # Example
///
/// ```
/// use lbfo::admission::patch::escape_segment;
///
/// assert_eq!(escape_segment("lbf.firestoned.io/lb-name"), "lbf.firestoned.io~1lb-name");
/// assert_eq!(escape_segment("a~/b"), "a~0~1b");
/// ```
#[must_use]
pub fn escape_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Build the patch that sets a single label.
///
/// With `labels_exist == false` the whole labels container is created with
/// `key` as its only entry. The caller must have verified that the container
/// is actually absent or empty: adding at `/metadata/labels` over a populated
/// container would wipe the user's other labels.
///
/// With `labels_exist == true` the patch targets the escaped key inside the
/// container, as an `add` for a missing key or a `replace` when
/// `needs_replace` says the key holds a stale value.
#[must_use]
pub fn label_patch(labels_exist: bool, needs_replace: bool, key: &str, value: &str) -> Patch {
    if !labels_exist {
        return Patch {
            op: PatchOp::Add,
            path: LABELS_PATH.to_string(),
            value: json!({ key: value }),
        };
    }

    Patch {
        op: if needs_replace {
            PatchOp::Replace
        } else {
            PatchOp::Add
        },
        path: format!("{LABELS_PATH}/{}", escape_segment(key)),
        value: json!(value),
    }
}

/// Build the patch that adds a finalizer.
///
/// With `finalizers_exist == false` the list is created with the finalizer as
/// its only element; otherwise the finalizer is appended through the `-`
/// end-of-array pointer. No duplicate check happens here: the builders skip
/// the call entirely when the finalizer is already present.
#[must_use]
pub fn finalizer_patch(finalizers_exist: bool, finalizer: &str) -> Patch {
    if !finalizers_exist {
        return Patch {
            op: PatchOp::Add,
            path: FINALIZERS_PATH.to_string(),
            value: json!([finalizer]),
        };
    }

    Patch {
        op: PatchOp::Add,
        path: format!("{FINALIZERS_PATH}/-"),
        value: json!(finalizer),
    }
}

/// Which backend style of a `BackendGroup` a port patch targets.
///
/// The two styles are mutually exclusive in the schema; modelling the target
/// as a variant keeps the protocol-defaulting paths fixed and exhaustive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendPort {
    /// `spec.service.port`
    Service,
    /// `spec.pods.port`
    Pods,
}

impl BackendPort {
    /// JSON Pointer to this port's protocol field.
    #[must_use]
    pub const fn protocol_path(self) -> &'static str {
        match self {
            BackendPort::Service => "/spec/service/port/protocol",
            BackendPort::Pods => "/spec/pods/port/protocol",
        }
    }
}

/// Build the patch that defaults an unset port protocol to `"TCP"`.
#[must_use]
pub fn default_protocol_patch(port: BackendPort) -> Patch {
    Patch {
        op: PatchOp::Add,
        path: port.protocol_path().to_string(),
        value: json!(DEFAULT_PORT_PROTOCOL),
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod patch_tests;
