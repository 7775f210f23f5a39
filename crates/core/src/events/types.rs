//! Event system types

use std::fmt;
use std::sync::Arc;

use fxrs_engine::HostError;
use fxrs_sdk::{EntityHandle, NetworkId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::entities::NetworkEntity;
use crate::tasks::TaskQueueError;

/// Error returned by a listener
///
/// Any error type converts into this with `?`.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a listener
pub type ListenerResult = Result<(), ListenerError>;

type ListenerFn = dyn Fn(&[Value]) -> ListenerResult + Send + Sync;

/// A listener function with identity
///
/// Cloning a `Callback` yields the same listener: clones compare equal and
/// can be used to unsubscribe. Two callbacks built from identical closures
/// are distinct.
///
/// # Example
///
/// ```ignore
/// let cb = Callback::new(|args| {
///     tracing::info!("got {:?}", args);
///     Ok(())
/// });
/// events::on("hit", cb.clone())?;
/// events::off("hit", &cb)?;
/// ```
#[derive(Clone)]
pub struct Callback(Arc<ListenerFn>);

impl Callback {
    /// Wrap a listener function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> ListenerResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the listener
    pub fn call(&self, args: &[Value]) -> ListenerResult {
        (self.0)(args)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&format_args!("{:p}", self.addr()))
            .finish()
    }
}

/// An argument to an outbound event
///
/// Entities are kept apart from plain values so they can be replaced by
/// their network id before they reach the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// A plain value, sent as-is (arrays and objects are JSON-encoded)
    Value(Value),
    /// An entity, sent as its network id
    Entity(EntityHandle),
}

impl EventArg {
    /// Serialize any value into an argument
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(EventArg::Value)
    }

    /// Build an entity argument from any entity wrapper
    pub fn entity<E: NetworkEntity + ?Sized>(entity: &E) -> Self {
        EventArg::Entity(entity.handle())
    }
}

macro_rules! impl_value_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for EventArg {
                fn from(value: $ty) -> Self {
                    EventArg::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_value_arg!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String, &str, Vec<Value>);

impl From<Value> for EventArg {
    fn from(value: Value) -> Self {
        EventArg::Value(value)
    }
}

impl From<EntityHandle> for EventArg {
    fn from(handle: EntityHandle) -> Self {
        EventArg::Entity(handle)
    }
}

impl From<NetworkId> for EventArg {
    fn from(id: NetworkId) -> Self {
        EventArg::Value(Value::from(id.raw()))
    }
}

/// Build a `Vec<EventArg>` from heterogeneous values
///
/// ```ignore
/// events::emit_server("hit", args![vehicle, 12, "headshot"])?;
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::events::EventArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::events::EventArg::from($arg)),+]
    };
}

/// Errors from the event API
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// No default event context has been installed
    #[error("Event system not initialized")]
    NotInitialized,

    /// A default event context was already installed
    #[error("Event system already initialized")]
    AlreadyInitialized,

    /// The host rejected the call
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// A deferred emission could not be queued
    #[error("Failed to queue emission: {0}")]
    Queue(#[from] TaskQueueError),
}

/// A positional argument did not have the expected shape
#[derive(Debug, thiserror::Error)]
#[error("argument {index}: {reason}")]
pub struct ArgumentError {
    /// Position of the argument
    pub index: usize,
    /// What went wrong
    pub reason: String,
}

/// Decode the positional argument at `index` into `T`
///
/// A missing argument decodes as `null`, so `Option<T>` parameters accept
/// it. Strings that the argument codec turned into numbers or booleans are
/// accepted back as strings.
pub fn decode_arg<T: DeserializeOwned>(args: &[Value], index: usize) -> Result<T, ArgumentError> {
    let value = args.get(index).cloned().unwrap_or(Value::Null);

    match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => Ok(decoded),
        Err(err) => {
            let textual = match &value {
                Value::Number(_) | Value::Bool(_) => Some(Value::String(value.to_string())),
                _ => None,
            };
            textual
                .and_then(|text| serde_json::from_value::<T>(text).ok())
                .ok_or_else(|| ArgumentError {
                    index,
                    reason: err.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_callback_identity() {
        let a = Callback::new(|_| Ok(()));
        let b = Callback::new(|_| Ok(()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_args_macro() {
        let args = args![1, "two", EntityHandle(3), json!({"k": 4})];
        assert_eq!(
            args,
            vec![
                EventArg::Value(json!(1)),
                EventArg::Value(json!("two")),
                EventArg::Entity(EntityHandle(3)),
                EventArg::Value(json!({"k": 4})),
            ]
        );
        assert!(args![].is_empty());
    }

    #[test]
    fn test_decode_arg() {
        let args = vec![json!(5), json!("name"), json!([1, 2])];

        assert_eq!(decode_arg::<u32>(&args, 0).unwrap(), 5);
        assert_eq!(decode_arg::<String>(&args, 1).unwrap(), "name");
        assert_eq!(decode_arg::<Vec<i32>>(&args, 2).unwrap(), vec![1, 2]);
        assert_eq!(decode_arg::<Option<u32>>(&args, 9).unwrap(), None);

        let err = decode_arg::<u32>(&args, 1).unwrap_err();
        assert_eq!(err.index, 1);
    }

    #[test]
    fn test_decode_arg_restores_strings() {
        // "123" is decoded to a number by the codec; a String parameter still accepts it
        let args = vec![json!(123), json!(true)];
        assert_eq!(decode_arg::<String>(&args, 0).unwrap(), "123");
        assert_eq!(decode_arg::<String>(&args, 1).unwrap(), "true");
    }
}
