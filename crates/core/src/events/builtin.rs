//! Typed subscriptions to events the host triggers itself
//!
//! Each host event gets a payload struct decoded from its positional
//! arguments. A payload that does not decode is reported like any other
//! listener failure.
//!
//! ```ignore
//! use fxrs_core::events::builtin::on_resource_start;
//!
//! on_resource_start(|event| {
//!     tracing::info!("{} started", event.resource);
//!     Ok(())
//! })?;
//! ```

use serde_json::Value;

use fxrs_sdk::events as names;
use fxrs_sdk::{EntityHandle, Vector3};

use super::context::{context, EventContext};
use super::types::{decode_arg, ArgumentError, Callback, EventError, ListenerResult};

/// A host-triggered event with a typed payload
pub trait HostEvent: Sized {
    /// Event name as the host triggers it
    const NAME: &'static str;

    /// Decode the payload from the listener arguments
    fn from_args(args: &[Value]) -> Result<Self, ArgumentError>;
}

/// A resource finished starting
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceStart {
    pub resource: String,
}

/// A resource stopped
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceStop {
    pub resource: String,
}

/// A resource is about to start
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceStarting {
    pub resource: String,
}

/// An engine game event
#[derive(Debug, Clone, PartialEq)]
pub struct GameEvent {
    /// Engine event name, e.g. `CEventNetworkEntityDamage`
    pub name: String,
    /// Raw event data, meaning depends on `name`
    pub data: Vec<Value>,
}

/// The population system is creating an ambient ped
#[derive(Debug, Clone, PartialEq)]
pub struct PedCreating {
    pub position: Vector3,
    /// Model hash
    pub model: u32,
}

/// An entity took damage
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDamaged {
    pub victim: EntityHandle,
    /// Null handle when nothing caused the damage
    pub culprit: EntityHandle,
    /// Weapon hash
    pub weapon: u32,
    pub base_damage: f32,
}

/// Voice chat connected
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConnected {
    pub address: String,
    pub reconnecting: bool,
}

/// Voice chat disconnected
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceDisconnected {
    pub address: String,
}

macro_rules! resource_event {
    ($ty:ident, $name:expr) => {
        impl HostEvent for $ty {
            const NAME: &'static str = $name;

            fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
                Ok(Self {
                    resource: decode_arg(args, 0)?,
                })
            }
        }
    };
}

resource_event!(ResourceStart, names::RESOURCE_START);
resource_event!(ResourceStop, names::RESOURCE_STOP);
resource_event!(ResourceStarting, names::RESOURCE_STARTING);

impl HostEvent for GameEvent {
    const NAME: &'static str = names::GAME_EVENT_TRIGGERED;

    fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
        Ok(Self {
            name: decode_arg(args, 0)?,
            data: decode_arg::<Option<Vec<Value>>>(args, 1)?.unwrap_or_default(),
        })
    }
}

impl HostEvent for PedCreating {
    const NAME: &'static str = names::POPULATION_PED_CREATING;

    fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
        Ok(Self {
            position: Vector3::new(
                decode_arg(args, 0)?,
                decode_arg(args, 1)?,
                decode_arg(args, 2)?,
            ),
            model: hash_arg(args, 3)?,
        })
    }
}

impl HostEvent for EntityDamaged {
    const NAME: &'static str = names::ENTITY_DAMAGED;

    fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
        Ok(Self {
            victim: EntityHandle(decode_arg(args, 0)?),
            culprit: EntityHandle(decode_arg::<Option<i32>>(args, 1)?.unwrap_or_default()),
            weapon: hash_arg(args, 2)?,
            base_damage: decode_arg(args, 3)?,
        })
    }
}

impl HostEvent for VoiceConnected {
    const NAME: &'static str = names::VOICE_CONNECTED;

    fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
        Ok(Self {
            address: decode_arg(args, 0)?,
            reconnecting: decode_arg::<Option<bool>>(args, 1)?.unwrap_or(false),
        })
    }
}

impl HostEvent for VoiceDisconnected {
    const NAME: &'static str = names::VOICE_DISCONNECTED;

    fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
        Ok(Self {
            address: decode_arg(args, 0)?,
        })
    }
}

/// Hashes arrive signed or unsigned depending on the host
fn hash_arg(args: &[Value], index: usize) -> Result<u32, ArgumentError> {
    let raw: i64 = decode_arg(args, index)?;
    u32::try_from(raw)
        .or_else(|_| i32::try_from(raw).map(|n| n as u32))
        .map_err(|_| ArgumentError {
            index,
            reason: format!("{} is not a 32-bit hash", raw),
        })
}

fn adapter<E, F>(callback: F) -> Callback
where
    E: HostEvent,
    F: Fn(E) -> ListenerResult + Send + Sync + 'static,
{
    Callback::new(move |args| callback(E::from_args(args)?))
}

impl EventContext {
    /// Subscribe to a host event with a typed payload
    ///
    /// Returns the registered callback, usable with [`off`](Self::off).
    pub fn on_host_event<E, F>(&self, callback: F) -> Result<Callback, EventError>
    where
        E: HostEvent,
        F: Fn(E) -> ListenerResult + Send + Sync + 'static,
    {
        let callback = adapter(callback);
        self.on(E::NAME, callback.clone())?;
        Ok(callback)
    }
}

/// Subscribe to a host event with a typed payload on the default context
pub fn on_host_event<E, F>(callback: F) -> Result<Callback, EventError>
where
    E: HostEvent,
    F: Fn(E) -> ListenerResult + Send + Sync + 'static,
{
    context()?.on_host_event(callback)
}

macro_rules! builtin_subscriptions {
    ($($(#[$meta:meta])* $fn_name:ident => $ty:ty;)*) => {
        $(
            $(#[$meta])*
            pub fn $fn_name<F>(callback: F) -> Result<Callback, EventError>
            where
                F: Fn($ty) -> ListenerResult + Send + Sync + 'static,
            {
                on_host_event::<$ty, F>(callback)
            }
        )*
    };
}

builtin_subscriptions! {
    /// A resource finished starting
    on_resource_start => ResourceStart;
    /// A resource stopped
    on_resource_stop => ResourceStop;
    /// A resource is about to start
    on_resource_starting => ResourceStarting;
    /// An engine game event fired
    on_game_event => GameEvent;
    /// The population system is creating a ped
    on_ped_created => PedCreating;
    /// An entity took damage
    on_entity_damaged => EntityDamaged;
    /// Voice chat connected
    on_voice_connected => VoiceConnected;
    /// Voice chat disconnected
    on_voice_disconnected => VoiceDisconnected;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fxrs_engine::{LoopbackHost, Scope};
    use parking_lot::Mutex;
    use serde_json::json;

    fn setup() -> (Arc<LoopbackHost>, EventContext) {
        let host = LoopbackHost::shared();
        let context = EventContext::new(host.clone());
        (host, context)
    }

    #[test]
    fn test_resource_start_payload() {
        let (host, ctx) = setup();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        ctx.on_host_event(move |event: ResourceStart| {
            sink.lock().push(event.resource);
            Ok(())
        })
        .unwrap();

        host.deliver(Scope::Local, "onResourceStart", vec![json!("garage")]);
        assert_eq!(*seen.lock(), vec!["garage".to_string()]);
        assert_eq!(host.local_subscriptions("onResourceStart"), 1);
    }

    #[test]
    fn test_numeric_resource_name_survives_codec() {
        let (host, ctx) = setup();
        let seen = Arc::new(Mutex::new(None));

        let sink = seen.clone();
        ctx.on_host_event(move |event: ResourceStop| {
            *sink.lock() = Some(event.resource);
            Ok(())
        })
        .unwrap();

        // "2049" parses as JSON; the payload still gets the string back
        host.deliver(Scope::Local, "onResourceStop", vec![json!("2049")]);
        assert_eq!(seen.lock().as_deref(), Some("2049"));
    }

    #[test]
    fn test_entity_damaged_payload() {
        let (host, ctx) = setup();
        let seen = Arc::new(Mutex::new(None));

        let sink = seen.clone();
        ctx.on_host_event(move |event: EntityDamaged| {
            *sink.lock() = Some(event);
            Ok(())
        })
        .unwrap();

        host.deliver(
            Scope::Local,
            "entityDamaged",
            vec![json!(120), json!(0), json!(-1569615261), json!(25.5)],
        );

        assert_eq!(
            *seen.lock(),
            Some(EntityDamaged {
                victim: EntityHandle(120),
                culprit: EntityHandle::NULL,
                weapon: -1569615261i32 as u32,
                base_damage: 25.5,
            })
        );
    }

    #[test]
    fn test_ped_creating_and_game_event() {
        let (host, ctx) = setup();
        let peds = Arc::new(Mutex::new(Vec::new()));
        let games = Arc::new(Mutex::new(Vec::new()));

        let sink = peds.clone();
        ctx.on_host_event(move |event: PedCreating| {
            sink.lock().push(event);
            Ok(())
        })
        .unwrap();
        let sink = games.clone();
        ctx.on_host_event(move |event: GameEvent| {
            sink.lock().push(event);
            Ok(())
        })
        .unwrap();

        host.deliver(
            Scope::Local,
            "populationPedCreating",
            vec![json!(1.0), json!(2.0), json!(3.0), json!(1885233650), json!({})],
        );
        host.deliver(
            Scope::Local,
            "gameEventTriggered",
            vec![json!("CEventNetworkPlayerEnteredVehicle"), json!([128, 64])],
        );

        assert_eq!(peds.lock()[0].position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(peds.lock()[0].model, 1885233650);
        assert_eq!(games.lock()[0].data, vec![json!(128), json!(64)]);
    }

    #[test]
    fn test_bad_payload_is_isolated() {
        let (host, ctx) = setup();
        let seen = Arc::new(Mutex::new(Vec::new()));

        ctx.on_host_event(|_: VoiceDisconnected| Ok(())).unwrap();
        let sink = seen.clone();
        ctx.on(
            "mumbleDisconnected",
            Callback::new(move |args| {
                sink.lock().push(args.to_vec());
                Ok(())
            }),
        )
        .unwrap();

        // Missing address fails the typed listener only
        host.deliver(Scope::Local, "mumbleDisconnected", vec![]);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_typed_callback_can_be_removed() {
        let (host, ctx) = setup();
        let count = Arc::new(Mutex::new(0));

        let sink = count.clone();
        let cb = ctx
            .on_host_event(move |event: VoiceConnected| {
                assert!(event.reconnecting);
                *sink.lock() += 1;
                Ok(())
            })
            .unwrap();

        host.deliver(Scope::Local, "mumbleConnected", vec![json!("10.0.0.1"), json!(true)]);
        assert!(ctx.off("mumbleConnected", &cb));
        host.deliver(Scope::Local, "mumbleConnected", vec![json!("10.0.0.1"), json!(true)]);

        assert_eq!(*count.lock(), 1);
    }
}
