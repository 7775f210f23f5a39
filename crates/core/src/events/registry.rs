//! Event namespaces
//!
//! Each namespace pairs an emitter with the set of event names that have
//! already been bridged to the host. A name enters the set the first time
//! anything subscribes to it and never leaves: removing every listener
//! keeps the host-level subscription alive, so resubscribing is free.

use std::sync::Arc;

use dashmap::DashSet;

use fxrs_engine::Scope;

use super::emitter::EventEmitter;
use super::logger::EventLogger;

/// One event namespace: bridged names plus listeners
pub struct Namespace {
    scope: Scope,
    bridged: DashSet<String>,
    emitter: EventEmitter,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new(scope: Scope, logger: Arc<EventLogger>) -> Self {
        Self {
            scope,
            bridged: DashSet::new(),
            emitter: EventEmitter::new(scope, logger),
        }
    }

    /// Which namespace this is
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The namespace's emitter
    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    /// Whether `name` already has a host-level subscription
    pub fn is_bridged(&self, name: &str) -> bool {
        self.bridged.contains(name)
    }

    /// Every bridged name, unordered
    pub fn bridged_events(&self) -> Vec<String> {
        self.bridged.iter().map(|name| name.key().clone()).collect()
    }

    /// Claim `name` for bridging
    ///
    /// Returns `true` exactly once per name, to the caller that must create
    /// the host subscription.
    pub(crate) fn claim_bridge(&self, name: &str) -> bool {
        self.bridged.insert(name.to_string())
    }

    /// Give back a claim whose host subscription failed
    pub(crate) fn release_bridge(&self, name: &str) {
        self.bridged.remove(name);
    }
}

/// The two namespaces of a dispatch context
pub struct EventRegistry {
    local: Arc<Namespace>,
    network: Arc<Namespace>,
}

impl EventRegistry {
    /// Create both namespaces sharing one logger
    pub fn new(logger: Arc<EventLogger>) -> Self {
        Self {
            local: Arc::new(Namespace::new(Scope::Local, logger.clone())),
            network: Arc::new(Namespace::new(Scope::Network, logger)),
        }
    }

    /// The in-process namespace
    pub fn local_registry(&self) -> &Arc<Namespace> {
        &self.local
    }

    /// The client/server namespace
    pub fn network_registry(&self) -> &Arc<Namespace> {
        &self.network
    }

    /// Namespace by scope
    pub fn namespace(&self, scope: Scope) -> &Arc<Namespace> {
        match scope {
            Scope::Local => &self.local,
            Scope::Network => &self.network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_granted_once() {
        let ns = Namespace::new(Scope::Local, Arc::new(EventLogger::default()));

        assert!(ns.claim_bridge("hit"));
        assert!(!ns.claim_bridge("hit"));
        assert!(ns.is_bridged("hit"));

        ns.release_bridge("hit");
        assert!(!ns.is_bridged("hit"));
        assert!(ns.claim_bridge("hit"));
    }

    #[test]
    fn test_namespaces_are_independent() {
        let registry = EventRegistry::new(Arc::new(EventLogger::default()));

        registry.local_registry().claim_bridge("x");
        assert!(registry.namespace(Scope::Local).is_bridged("x"));
        assert!(!registry.network_registry().is_bridged("x"));
        assert_eq!(registry.network_registry().scope(), Scope::Network);
    }
}
