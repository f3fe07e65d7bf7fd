// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end tests for admission mutation: compute patches, apply them the
//! way the API server would, and check the invariants on the result.

mod common;

use common::patched;
use lbfo::admission::{mutate_backend_group, mutate_driver};
use lbfo::constants::{FINALIZER_BACKEND_GROUP, LABEL_LB_NAME};
use lbfo::crd::{
    BackendGroup, BackendGroupSpec, LoadBalancerDriver, LoadBalancerDriverSpec, PodBackend,
    PortSelector, WebhookConfig,
};
use lbfo::duration::GoDuration;
use lbfo::webhooks::{WebhookRegistry, KNOWN_WEBHOOKS};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

fn backend_group(lb_name: &str) -> BackendGroup {
    BackendGroup::new(
        "web-backends",
        BackendGroupSpec {
            lb_name: lb_name.to_string(),
            service: None,
            pods: Some(PodBackend {
                port: PortSelector {
                    port_number: 8080,
                    protocol: None,
                },
                by_label: None,
                by_name: None,
            }),
            static_addresses: None,
            parameters: None,
        },
    )
}

fn driver(webhooks: Option<Vec<WebhookConfig>>) -> LoadBalancerDriver {
    LoadBalancerDriver::new(
        "test-driver",
        LoadBalancerDriverSpec {
            driver_type: "Webhook".to_string(),
            url: "http://driver.kube-system.svc".to_string(),
            webhooks,
        },
    )
}

#[test]
fn backend_group_patches_establish_the_invariant() {
    let group = backend_group("lb-1");
    let patches = mutate_backend_group(&group).unwrap();
    let mutated: BackendGroup = patched(&group, &patches);

    assert_eq!(
        mutated.metadata.labels.as_ref().unwrap().get(LABEL_LB_NAME),
        Some(&"lb-1".to_string())
    );
    assert!(mutated
        .metadata
        .finalizers
        .as_ref()
        .unwrap()
        .contains(&FINALIZER_BACKEND_GROUP.to_string()));
    assert_eq!(
        mutated.spec.pods.as_ref().unwrap().port.protocol.as_deref(),
        Some("TCP")
    );
}

#[test]
fn backend_group_mutation_is_idempotent() {
    let group = backend_group("lb-1");
    let patches = mutate_backend_group(&group).unwrap();
    assert!(!patches.is_empty());

    let mutated: BackendGroup = patched(&group, &patches);
    let second_pass = mutate_backend_group(&mutated).unwrap();
    assert!(
        second_pass.is_empty(),
        "re-admitting a mutated object must produce no patches, got {second_pass:?}"
    );
}

#[test]
fn backend_group_existing_labels_survive_mutation() {
    let mut group = backend_group("lb-1");
    group.metadata.labels = Some(BTreeMap::from([
        ("team".to_string(), "traffic".to_string()),
        ("env".to_string(), "prod".to_string()),
    ]));

    let patches = mutate_backend_group(&group).unwrap();
    let mutated: BackendGroup = patched(&group, &patches);

    let labels = mutated.metadata.labels.unwrap();
    assert_eq!(labels.get("team"), Some(&"traffic".to_string()));
    assert_eq!(labels.get("env"), Some(&"prod".to_string()));
    assert_eq!(labels.get(LABEL_LB_NAME), Some(&"lb-1".to_string()));
}

#[test]
fn backend_group_stale_label_is_corrected_in_place() {
    let mut group = backend_group("lb-1");
    group.metadata.labels = Some(BTreeMap::from([(
        LABEL_LB_NAME.to_string(),
        "lb-old".to_string(),
    )]));

    let patches = mutate_backend_group(&group).unwrap();
    let mutated: BackendGroup = patched(&group, &patches);

    let labels = mutated.metadata.labels.unwrap();
    assert_eq!(labels.len(), 1, "no stray label keys after replace");
    assert_eq!(labels.get(LABEL_LB_NAME), Some(&"lb-1".to_string()));
}

#[test]
fn backend_group_existing_finalizers_survive_mutation() {
    let mut group = backend_group("lb-1");
    group.metadata.finalizers = Some(vec!["other.io/cleanup".to_string()]);

    let patches = mutate_backend_group(&group).unwrap();
    let mutated: BackendGroup = patched(&group, &patches);

    assert_eq!(
        mutated.metadata.finalizers.unwrap(),
        vec![
            "other.io/cleanup".to_string(),
            FINALIZER_BACKEND_GROUP.to_string()
        ]
    );
}

#[test]
fn driver_mutation_completes_the_webhook_set() {
    // Arbitrary subset declared; the rest must be filled in exactly once.
    let declared = vec![
        WebhookConfig {
            name: "createLoadBalancer".to_string(),
            timeout: Some(GoDuration::from_secs(25)),
        },
        WebhookConfig {
            name: "deregisterBackend".to_string(),
            timeout: None,
        },
    ];
    let driver = driver(Some(declared));
    let registry = WebhookRegistry::default();

    let patches = mutate_driver(&driver, &registry);
    let mutated: LoadBalancerDriver = patched(&driver, &patches);

    let webhooks = mutated.spec.webhooks.unwrap();
    let names: Vec<&str> = webhooks.iter().map(|w| w.name.as_str()).collect();
    let unique: BTreeSet<&str> = names.iter().copied().collect();

    assert_eq!(unique.len(), names.len(), "no duplicate webhook names");
    assert_eq!(
        unique,
        KNOWN_WEBHOOKS.iter().copied().collect::<BTreeSet<&str>>(),
        "final set must equal the full required set"
    );

    // User-declared timeouts are untouched; filled-in ones get the default.
    let create = webhooks.iter().find(|w| w.name == "createLoadBalancer").unwrap();
    assert_eq!(create.timeout, Some(GoDuration::from_secs(25)));
    let ensure = webhooks.iter().find(|w| w.name == "ensureBackend").unwrap();
    assert_eq!(ensure.timeout, Some(GoDuration::from_secs(10)));
}

#[test]
fn driver_mutation_is_idempotent() {
    let driver = driver(None);
    let registry = WebhookRegistry::default();

    let patches = mutate_driver(&driver, &registry);
    assert_eq!(patches.len(), 1 + KNOWN_WEBHOOKS.len());

    let mutated: LoadBalancerDriver = patched(&driver, &patches);
    assert!(
        mutate_driver(&mutated, &registry).is_empty(),
        "re-admitting a mutated driver must produce no patches"
    );
}

#[test]
fn driver_append_pointers_apply_against_the_original_object() {
    // The list-initialization patch must come first so the `-` appends have a
    // parent array when the sequence is applied to the pre-mutation object.
    let driver = driver(None);
    let patches = mutate_driver(&driver, &WebhookRegistry::default());
    let mutated: LoadBalancerDriver = patched(&driver, &patches);
    assert_eq!(
        mutated.spec.webhooks.unwrap().len(),
        KNOWN_WEBHOOKS.len()
    );
}
