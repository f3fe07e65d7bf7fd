// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared helpers for admission integration tests

use lbfo::admission::Patch;
use serde_json::Value;

/// Apply computed admission patches to a serialized resource, the way the API
/// server applies the webhook's JSON Patch to the submitted object.
///
/// Panics on an invalid patch; that is the failure these tests exist to catch.
pub fn apply_patches(doc: &mut Value, patches: &[Patch]) {
    let wire = serde_json::to_value(patches).expect("patches serialize");
    let patch: json_patch::Patch = serde_json::from_value(wire).expect("valid RFC 6902 patch");
    json_patch::patch(doc, &patch).expect("patch applies to the original object");
}

/// Serialize, patch, and deserialize a resource in one step.
pub fn patched<T>(resource: &T, patches: &[Patch]) -> T
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let mut doc = serde_json::to_value(resource).expect("resource serializes");
    apply_patches(&mut doc, patches);
    serde_json::from_value(doc).expect("patched resource deserializes")
}
