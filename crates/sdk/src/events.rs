//! Names of events predefined by the host runtime
//!
//! These strings must match exactly what the host triggers.

/// A resource finished starting. Args: `(resource_name)`
pub const RESOURCE_START: &str = "onResourceStart";

/// A resource stopped. Args: `(resource_name)`
pub const RESOURCE_STOP: &str = "onResourceStop";

/// A resource is about to start. Args: `(resource_name)`
pub const RESOURCE_STARTING: &str = "onResourceStarting";

/// Generic engine game event. Args: `(event_name, data_array)`
pub const GAME_EVENT_TRIGGERED: &str = "gameEventTriggered";

/// The population system is creating an ambient ped.
/// Args: `(x, y, z, model, setters)`
pub const POPULATION_PED_CREATING: &str = "populationPedCreating";

/// An entity took damage. Args: `(victim, culprit, weapon, base_damage)`
pub const ENTITY_DAMAGED: &str = "entityDamaged";

/// Voice chat connected. Args: `(address, reconnecting)`
pub const VOICE_CONNECTED: &str = "mumbleConnected";

/// Voice chat disconnected. Args: `(address)`
pub const VOICE_DISCONNECTED: &str = "mumbleDisconnected";

/// Collected host event names for iteration
pub const HOST_EVENTS: &[&str] = &[
    RESOURCE_START,
    RESOURCE_STOP,
    RESOURCE_STARTING,
    GAME_EVENT_TRIGGERED,
    POPULATION_PED_CREATING,
    ENTITY_DAMAGED,
    VOICE_CONNECTED,
    VOICE_DISCONNECTED,
];
