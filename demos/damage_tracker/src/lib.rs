//! # Damage Tracker Example
//!
//! Accumulates damage per victim from the host's `entityDamaged` event and
//! relays heavy hits to the server.
//!
//! ## Features Demonstrated
//! - `on_entity_damaged` - Typed host event subscription
//! - `emit_server` with entity arguments - Sent as network ids
//! - `#[event_handler]` - Typed networked handler with `_register` / `_unregister`
//! - `ResourceConfig` - Per-resource TOML settings
//! - Static state management with `LazyLock` and `RwLock`
//!
//! ## Usage
//! ```ignore
//! damage_tracker::init()?;
//!
//! // Later, query totals
//! if let Some(total) = damage_tracker::total_damage(victim) {
//!     println!("{} took {}", victim, total);
//! }
//! ```

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};

use fxrs_core::events::builtin::EntityDamaged;
use fxrs_core::events::{self, Callback, EventError};
use fxrs_core::sdk::EntityHandle;
use fxrs_core::{args, event_handler, Entity, ResourceConfig};

/// Server event carrying `(victim, culprit, damage)` for heavy hits
pub const HEAVY_HIT_EVENT: &str = "damage_tracker:heavy_hit";

/// Server event asking every client to forget its totals
pub const RESET_EVENT: &str = "damage_tracker:reset";

/// Tracker settings, `configs/resources/damage_tracker/damage_tracker.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Hits at or above this are relayed to the server
    pub heavy_hit_threshold: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            heavy_hit_threshold: 50.0,
        }
    }
}

impl ResourceConfig for TrackerConfig {
    const RESOURCE_NAME: &'static str = "damage_tracker";
}

/// Damage totals, keyed by victim handle
static TOTALS: LazyLock<RwLock<HashMap<EntityHandle, f32>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

static CONFIG: LazyLock<RwLock<TrackerConfig>> =
    LazyLock::new(|| RwLock::new(TrackerConfig::default()));

/// Initialize the Damage Tracker.
///
/// Loads settings and subscribes to damage and reset events. Returns the
/// damage callback so callers can unsubscribe it.
pub fn init() -> Result<Callback, EventError> {
    match TrackerConfig::load() {
        Ok(config) => {
            if let Ok(mut current) = CONFIG.write() {
                *current = config;
            }
        }
        Err(e) => tracing::warn!("Damage Tracker: using default settings ({})", e),
    }

    let callback = events::on_entity_damaged(|event| {
        record(&event);
        Ok(())
    })?;
    on_reset_register()?;

    tracing::info!("Damage Tracker initialized!");
    Ok(callback)
}

fn record(event: &EntityDamaged) {
    if let Ok(mut totals) = TOTALS.write() {
        *totals.entry(event.victim).or_default() += event.base_damage;
    }

    let threshold = CONFIG
        .read()
        .map(|c| c.heavy_hit_threshold)
        .unwrap_or(f32::MAX);
    if event.base_damage < threshold {
        return;
    }

    tracing::debug!(
        "Heavy hit: {} hit {} for {}",
        event.culprit,
        event.victim,
        event.base_damage
    );
    let victim = Entity::from_handle(event.victim);
    let culprit = Entity::from_handle(event.culprit);
    if let Err(e) = events::emit_server(
        HEAVY_HIT_EVENT,
        args![victim, culprit, event.base_damage],
    ) {
        tracing::warn!("Failed to relay heavy hit: {}", e);
    }
}

/// Total damage taken by an entity since the last reset
pub fn total_damage(victim: EntityHandle) -> Option<f32> {
    TOTALS.read().ok().and_then(|t| t.get(&victim).copied())
}

/// Forget every total
pub fn clear() {
    if let Ok(mut totals) = TOTALS.write() {
        totals.clear();
    }
}

/// The server asked for a reset; `reason` is optional
#[event_handler("damage_tracker:reset", server)]
fn on_reset(reason: Option<String>) {
    clear();
    tracing::info!(
        "Damage Tracker: totals reset ({})",
        reason.as_deref().unwrap_or("no reason")
    );
}
