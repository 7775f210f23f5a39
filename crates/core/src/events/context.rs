//! Dispatch context
//!
//! Everything the event layer mutates lives in an [`EventContext`]: the host
//! handle, both namespaces and the logger. A process normally has exactly
//! one, installed with [`init`] and used by the free functions in
//! [`events`](super); tests and embedders can build as many isolated
//! contexts as they like.

use std::sync::{Arc, OnceLock};

use fxrs_engine::{HostRuntime, Scope};

use super::logger::EventLogger;
use super::registry::{EventRegistry, Namespace};
use super::types::EventError;

/// Process default context
static CONTEXT: OnceLock<Arc<EventContext>> = OnceLock::new();

/// Host handle, namespaces and logger for one dispatch domain
pub struct EventContext {
    host: Arc<dyn HostRuntime>,
    registry: EventRegistry,
    logger: Arc<EventLogger>,
}

impl EventContext {
    /// Create a context over `host` with default logging
    pub fn new(host: Arc<dyn HostRuntime>) -> Self {
        Self::with_logger(host, EventLogger::default())
    }

    /// Create a context over `host` with the given logger
    pub fn with_logger(host: Arc<dyn HostRuntime>, logger: EventLogger) -> Self {
        let logger = Arc::new(logger);
        Self {
            host,
            registry: EventRegistry::new(logger.clone()),
            logger,
        }
    }

    /// The host runtime
    pub fn host(&self) -> &Arc<dyn HostRuntime> {
        &self.host
    }

    /// The dispatch logger
    pub fn logger(&self) -> &EventLogger {
        &self.logger
    }

    pub(crate) fn shared_logger(&self) -> &Arc<EventLogger> {
        &self.logger
    }

    /// The in-process namespace
    pub fn local_registry(&self) -> &Namespace {
        self.registry.local_registry()
    }

    /// The client/server namespace
    pub fn network_registry(&self) -> &Namespace {
        self.registry.network_registry()
    }

    /// Namespace by scope
    pub fn namespace(&self, scope: Scope) -> &Arc<Namespace> {
        self.registry.namespace(scope)
    }

    /// Enable or disable listener error logging
    pub fn set_log_event_errors(&self, enabled: bool) {
        self.logger.set_log_errors(enabled);
    }

    /// Enable or disable traffic logging
    pub fn set_log_events(&self, enabled: bool) {
        self.logger.set_log_events(enabled);
    }
}

/// Create and install the process default context over `host`
pub fn init(host: Arc<dyn HostRuntime>) -> Result<Arc<EventContext>, EventError> {
    let context = Arc::new(EventContext::new(host));
    install(context.clone())?;
    Ok(context)
}

/// Install an existing context as the process default
pub fn install(context: Arc<EventContext>) -> Result<(), EventError> {
    CONTEXT
        .set(context)
        .map_err(|_| EventError::AlreadyInitialized)?;
    tracing::debug!("Default event context installed");
    Ok(())
}

/// The process default context
pub fn context() -> Result<&'static Arc<EventContext>, EventError> {
    CONTEXT.get().ok_or(EventError::NotInitialized)
}

/// Whether a default context is installed
pub fn is_initialized() -> bool {
    CONTEXT.get().is_some()
}
