//! Process-wide test host
//!
//! Tests that go through the free functions share one `LoopbackHost`
//! installed as both the engine host and the default event context. They
//! must use event names no other test uses.

use std::sync::{Arc, LazyLock};

use fxrs_engine::LoopbackHost;

use crate::events::{self, EventContext};

static LOOPBACK: LazyLock<Arc<LoopbackHost>> = LazyLock::new(|| {
    let host = LoopbackHost::shared();
    // Only this module installs globals, so both calls succeed exactly once
    let _ = fxrs_engine::init_host(host.clone());
    let _ = events::init(host.clone());
    host
});

/// The shared loopback host, installing it on first use
pub(crate) fn global_host() -> &'static Arc<LoopbackHost> {
    &LOOPBACK
}

/// The default event context over the shared loopback host
pub(crate) fn global_context() -> &'static Arc<EventContext> {
    LazyLock::force(&LOOPBACK);
    match events::context() {
        Ok(context) => context,
        Err(err) => panic!("test context missing: {}", err),
    }
}
