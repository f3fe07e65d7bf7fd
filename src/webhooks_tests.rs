// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the webhook registry

use crate::duration::GoDuration;
use crate::webhooks::{WebhookRegistry, KNOWN_WEBHOOKS, WEBHOOK_CREATE_LOAD_BALANCER};

#[test]
fn test_default_registry_carries_all_known_webhooks() {
    let registry = WebhookRegistry::default();
    assert_eq!(registry.len(), KNOWN_WEBHOOKS.len());
    for name in KNOWN_WEBHOOKS {
        assert!(registry.contains(name), "registry should contain '{name}'");
    }
}

#[test]
fn test_default_registry_preserves_canonical_order() {
    let registry = WebhookRegistry::default();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, KNOWN_WEBHOOKS, "iteration order must be canonical");
}

#[test]
fn test_default_timeout_is_ten_seconds() {
    assert_eq!(
        WebhookRegistry::default().default_timeout(),
        GoDuration::from_secs(10)
    );
}

#[test]
fn test_with_timeout_overrides_default() {
    let registry = WebhookRegistry::default().with_timeout(GoDuration::from_secs(30));
    assert_eq!(registry.default_timeout(), GoDuration::from_secs(30));
}

#[test]
fn test_custom_registry_order_is_input_order() {
    let registry = WebhookRegistry::new(["b", "a", "c"]);
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn test_contains_is_exact_match() {
    let registry = WebhookRegistry::default();
    assert!(registry.contains(WEBHOOK_CREATE_LOAD_BALANCER));
    assert!(!registry.contains("CreateLoadBalancer"));
    assert!(!registry.contains(""));
}

#[test]
fn test_empty_registry() {
    let registry = WebhookRegistry::new(Vec::<String>::new());
    assert!(registry.is_empty());
    assert_eq!(registry.names().count(), 0);
}
