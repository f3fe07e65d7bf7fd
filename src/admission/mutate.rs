// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Patch builders for the mutating admission webhook.
//!
//! Each builder binds one immutable resource snapshot and accumulates an
//! ordered list of [`Patch`] operations. The webhook handler runs the checks
//! in a fixed order and ships the result as the admission response's JSON
//! Patch, so patch order here is patch order on the wire.
//!
//! Every check is idempotent against the snapshot: a condition that already
//! holds emits nothing, so re-admitting a mutated object produces an empty
//! patch list.
//!
//! # Example
//!
//! ```rust
//! use lbfo::admission::mutate::mutate_driver;
//! use lbfo::crd::{LoadBalancerDriver, LoadBalancerDriverSpec};
//! use lbfo::webhooks::WebhookRegistry;
//!
//! let driver = LoadBalancerDriver::new(
//!     "my-driver",
//!     LoadBalancerDriverSpec {
//!         driver_type: "Webhook".to_string(),
//!         url: "http://driver.kube-system.svc".to_string(),
//!         webhooks: None,
//!     },
//! );
//!
//! let patches = mutate_driver(&driver, &WebhookRegistry::default());
//! // list initialization plus one append per known webhook
//! assert_eq!(patches.len(), 9);
//! ```

use crate::admission_errors::AdmissionError;
use crate::constants::{FINALIZER_BACKEND_GROUP, LABEL_LB_NAME};
use crate::crd::{BackendGroup, LoadBalancerDriver, WebhookConfig};
use crate::webhooks::WebhookRegistry;
use kube::ResourceExt;
use serde_json::json;
use std::collections::BTreeSet;
use tracing::{debug, trace};

use super::patch::{
    default_protocol_patch, finalizer_patch, label_patch, BackendPort, Patch, PatchOp,
    WEBHOOKS_PATH,
};

/// Accumulates the patches that normalize one `BackendGroup`.
///
/// One builder per admission request; builders are not reused across
/// resources. Checks append to an internal list which [`finish`] hands back
/// in invocation order.
///
/// [`finish`]: BackendGroupPatchBuilder::finish
pub struct BackendGroupPatchBuilder<'a> {
    group: &'a BackendGroup,
    patches: Vec<Patch>,
}

impl<'a> BackendGroupPatchBuilder<'a> {
    /// Bind a builder to a `BackendGroup` snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionError::MissingLbName`] when `spec.lbName` is empty.
    /// The label value is derived from it, so an empty value is a precondition
    /// violation the webhook must reject rather than patch around.
    pub fn new(group: &'a BackendGroup) -> Result<Self, AdmissionError> {
        if group.spec.lb_name.is_empty() {
            return Err(AdmissionError::MissingLbName {
                name: group.name_any(),
                label: LABEL_LB_NAME,
            });
        }
        Ok(Self {
            group,
            patches: Vec::new(),
        })
    }

    /// Ensure the `lbf.firestoned.io/lb-name` label equals `spec.lbName`.
    ///
    /// Emits nothing when the label is already correct. An absent or empty
    /// labels container is created wholesale; otherwise the single key is
    /// added, or replaced when it holds a different load balancer name.
    pub fn ensure_lb_name_label(&mut self) {
        let labels = self.group.metadata.labels.as_ref();
        let want = self.group.spec.lb_name.as_str();

        match labels.and_then(|l| l.get(LABEL_LB_NAME)) {
            Some(current) if current == want => {
                trace!(label = LABEL_LB_NAME, value = want, "label already correct");
            }
            Some(current) => {
                debug!(
                    label = LABEL_LB_NAME,
                    from = current.as_str(),
                    to = want,
                    "replacing stale lb-name label"
                );
                self.patches
                    .push(label_patch(true, true, LABEL_LB_NAME, want));
            }
            None => {
                // An empty map gets recreated with the one entry; a populated
                // map must only gain the key, or the other labels are lost.
                let labels_exist = labels.is_some_and(|l| !l.is_empty());
                debug!(label = LABEL_LB_NAME, value = want, "adding lb-name label");
                self.patches
                    .push(label_patch(labels_exist, false, LABEL_LB_NAME, want));
            }
        }
    }

    /// Ensure the `BackendGroup` finalizer is present.
    ///
    /// The finalizer keeps the group alive until its backends are
    /// deregistered. Emits nothing when already present.
    pub fn ensure_finalizer(&mut self) {
        let finalizers = self.group.metadata.finalizers.as_ref();
        if finalizers.is_some_and(|f| f.iter().any(|x| x == FINALIZER_BACKEND_GROUP)) {
            trace!(finalizer = FINALIZER_BACKEND_GROUP, "finalizer already set");
            return;
        }

        let finalizers_exist = finalizers.is_some_and(|f| !f.is_empty());
        debug!(finalizer = FINALIZER_BACKEND_GROUP, "adding finalizer");
        self.patches
            .push(finalizer_patch(finalizers_exist, FINALIZER_BACKEND_GROUP));
    }

    /// Default the port protocol of the populated backend style to `"TCP"`.
    ///
    /// Service-style backends are checked strictly before pod-style ones;
    /// only the first populated style with an unset protocol is patched. The
    /// schema makes the styles mutually exclusive, so the precedence only
    /// shows on invalid objects, where it keeps the output deterministic.
    pub fn default_protocol(&mut self) {
        let spec = &self.group.spec;
        if let Some(service) = &spec.service {
            if service.port.protocol.is_none() {
                debug!("defaulting spec.service.port.protocol to TCP");
                self.patches
                    .push(default_protocol_patch(BackendPort::Service));
            }
        } else if let Some(pods) = &spec.pods {
            if pods.port.protocol.is_none() {
                debug!("defaulting spec.pods.port.protocol to TCP");
                self.patches.push(default_protocol_patch(BackendPort::Pods));
            }
        }
    }

    /// The accumulated patches, in invocation order.
    #[must_use]
    pub fn finish(self) -> Vec<Patch> {
        self.patches
    }
}

/// Accumulates the patches that normalize one `LoadBalancerDriver`.
pub struct DriverPatchBuilder<'a> {
    driver: &'a LoadBalancerDriver,
    patches: Vec<Patch>,
}

impl<'a> DriverPatchBuilder<'a> {
    /// Bind a builder to a `LoadBalancerDriver` snapshot.
    #[must_use]
    pub fn new(driver: &'a LoadBalancerDriver) -> Self {
        Self {
            driver,
            patches: Vec::new(),
        }
    }

    /// Ensure every webhook in `registry` is declared on the driver.
    ///
    /// When the declaration list is absent or empty, an empty list is added
    /// first so the subsequent `-` append pointers have a parent array to
    /// land in when the API server applies the patch sequence. Missing
    /// declarations are then appended in registry order, each with the
    /// registry's default timeout.
    pub fn ensure_webhooks(&mut self, registry: &WebhookRegistry) {
        let declared = self.driver.spec.webhooks.as_deref().unwrap_or_default();

        if declared.is_empty() {
            debug!("initializing empty spec.webhooks list");
            self.patches.push(Patch {
                op: PatchOp::Add,
                path: WEBHOOKS_PATH.to_string(),
                value: json!([]),
            });
        }

        let existing: BTreeSet<&str> = declared.iter().map(|w| w.name.as_str()).collect();

        for known in registry.names() {
            if existing.contains(known) {
                trace!(webhook = known, "webhook already declared");
                continue;
            }
            debug!(webhook = known, "appending missing webhook declaration");
            self.patches.push(Patch {
                op: PatchOp::Add,
                path: format!("{WEBHOOKS_PATH}/-"),
                value: json!(WebhookConfig {
                    name: known.to_string(),
                    timeout: Some(registry.default_timeout()),
                }),
            });
        }
    }

    /// The accumulated patches, in invocation order.
    #[must_use]
    pub fn finish(self) -> Vec<Patch> {
        self.patches
    }
}

/// Compute the full normalization patch for a `BackendGroup`.
///
/// Runs the label, finalizer, and protocol checks in that fixed order.
///
/// # Errors
///
/// Returns [`AdmissionError::MissingLbName`] when `spec.lbName` is empty.
pub fn mutate_backend_group(group: &BackendGroup) -> Result<Vec<Patch>, AdmissionError> {
    let mut builder = BackendGroupPatchBuilder::new(group)?;
    builder.ensure_lb_name_label();
    builder.ensure_finalizer();
    builder.default_protocol();
    Ok(builder.finish())
}

/// Compute the full normalization patch for a `LoadBalancerDriver`.
#[must_use]
pub fn mutate_driver(driver: &LoadBalancerDriver, registry: &WebhookRegistry) -> Vec<Patch> {
    let mut builder = DriverPatchBuilder::new(driver);
    builder.ensure_webhooks(registry);
    builder.finish()
}

#[cfg(test)]
#[path = "mutate_tests.rs"]
mod mutate_tests;
