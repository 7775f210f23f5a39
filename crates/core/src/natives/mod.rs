//! Typed native wrappers
//!
//! Natives are host functions invoked by name with positional arguments.
//! The wrappers here only convert arguments into host values and the
//! returned value back into a Rust type; all behaviour lives in the host.
//!
//! ```ignore
//! use fxrs_core::natives::{entity, vehicle};
//!
//! let vehicle = vehicle::get_vehicle_ped_is_in(ped, false)?;
//! let coords = entity::get_entity_coords(vehicle)?;
//! ```

use serde_json::Value;

use fxrs_engine::HostError;
use fxrs_sdk::{EntityHandle, NetworkId, Vector3};

/// Declare typed wrappers forwarding to host natives
///
/// ```ignore
/// natives! {
///     /// Doc comment
///     pub fn get_entity_health(entity: EntityHandle) -> i32 = GET_ENTITY_HEALTH;
/// }
/// ```
macro_rules! natives {
    ($(
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($($arg:ident : $ty:ty),* $(,)?) -> $ret:ty = $native:expr;
    )*) => {
        $(
            $(#[$meta])*
            $vis fn $name($($arg: $ty),*) -> Result<$ret, $crate::natives::NativeError> {
                $crate::natives::invoke::<$ret>(
                    $native,
                    vec![$($crate::natives::IntoNativeArg::into_native_arg($arg)),*],
                )
            }
        )*
    };
}

pub mod entity;
pub mod graphics;
pub mod kvp;
pub mod ped;
pub mod resource;
pub mod vehicle;
pub mod world;

/// Errors from native calls
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("{native} returned an unexpected value (expected {expected})")]
    UnexpectedReturn {
        native: &'static str,
        expected: &'static str,
    },
}

/// Values accepted as native arguments
pub trait IntoNativeArg {
    fn into_native_arg(self) -> Value;
}

macro_rules! impl_native_arg {
    ($($ty:ty),*) => {
        $(
            impl IntoNativeArg for $ty {
                fn into_native_arg(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_native_arg!(bool, i32, u32, i64, f32, f64, String, &str);

impl IntoNativeArg for EntityHandle {
    fn into_native_arg(self) -> Value {
        Value::from(self.raw())
    }
}

impl IntoNativeArg for NetworkId {
    fn into_native_arg(self) -> Value {
        Value::from(self.raw())
    }
}

/// Values a native can return
pub trait FromNative: Sized {
    /// Shape reported when conversion fails
    const EXPECTED: &'static str;

    fn from_native(value: Value) -> Option<Self>;
}

impl FromNative for () {
    const EXPECTED: &'static str = "nothing";

    fn from_native(_: Value) -> Option<Self> {
        Some(())
    }
}

impl FromNative for Value {
    const EXPECTED: &'static str = "any value";

    fn from_native(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromNative for bool {
    const EXPECTED: &'static str = "a boolean";

    // Hosts commonly report booleans as 0/1
    fn from_native(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            Value::Number(n) => n.as_f64().map(|n| n != 0.0),
            _ => None,
        }
    }
}

impl FromNative for i32 {
    const EXPECTED: &'static str = "an integer";

    fn from_native(value: Value) -> Option<Self> {
        value.as_i64().and_then(|n| i32::try_from(n).ok())
    }
}

impl FromNative for u32 {
    const EXPECTED: &'static str = "an unsigned integer";

    // Model hashes may come back as signed 32-bit values
    fn from_native(value: Value) -> Option<Self> {
        let n = value.as_i64()?;
        u32::try_from(n)
            .ok()
            .or_else(|| i32::try_from(n).ok().map(|n| n as u32))
    }
}

impl FromNative for f32 {
    const EXPECTED: &'static str = "a number";

    fn from_native(value: Value) -> Option<Self> {
        value.as_f64().map(|n| n as f32)
    }
}

impl FromNative for String {
    const EXPECTED: &'static str = "a string";

    fn from_native(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromNative for Option<String> {
    const EXPECTED: &'static str = "a string or null";

    fn from_native(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            Value::String(s) => Some(Some(s)),
            _ => None,
        }
    }
}

impl FromNative for EntityHandle {
    const EXPECTED: &'static str = "an entity handle";

    fn from_native(value: Value) -> Option<Self> {
        i32::from_native(value).map(EntityHandle)
    }
}

impl FromNative for Vector3 {
    const EXPECTED: &'static str = "a vector";

    /// Accepts `[x, y, z]` or `{"x", "y", "z"}`
    fn from_native(value: Value) -> Option<Self> {
        let component = |v: &Value| v.as_f64().map(|n| n as f32);
        match &value {
            Value::Array(items) => match items.as_slice() {
                [x, y, z] => Some(Vector3::new(component(x)?, component(y)?, component(z)?)),
                _ => None,
            },
            Value::Object(map) => Some(Vector3::new(
                component(map.get("x")?)?,
                component(map.get("y")?)?,
                component(map.get("z")?)?,
            )),
            _ => None,
        }
    }
}

/// Call a native on the installed host and convert its result
pub fn invoke<T: FromNative>(native: &'static str, args: Vec<Value>) -> Result<T, NativeError> {
    let value = fxrs_engine::host()?.invoke_native(native, &args)?;
    T::from_native(value).ok_or(NativeError::UnexpectedReturn {
        native,
        expected: T::EXPECTED,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::testing::global_host;

    #[test]
    fn test_bool_accepts_numbers() {
        assert_eq!(bool::from_native(json!(1)), Some(true));
        assert_eq!(bool::from_native(json!(0)), Some(false));
        assert_eq!(bool::from_native(json!(false)), Some(false));
        assert_eq!(bool::from_native(json!("yes")), None);
    }

    #[test]
    fn test_vector_shapes() {
        let expected = Vector3::new(1.0, 2.0, 3.5);
        assert_eq!(Vector3::from_native(json!([1, 2, 3.5])), Some(expected));
        assert_eq!(
            Vector3::from_native(json!({"x": 1.0, "y": 2.0, "z": 3.5})),
            Some(expected)
        );
        assert_eq!(Vector3::from_native(json!([1, 2])), None);
    }

    #[test]
    fn test_model_hash_wraps_negative() {
        assert_eq!(u32::from_native(json!(-1)), Some(u32::MAX));
        assert_eq!(u32::from_native(json!(3_000_000_000u32)), Some(3_000_000_000));
    }

    #[test]
    fn test_invoke_reports_unexpected_return() {
        global_host().set_native("NATIVES_TEST_STRING", json!("text"));

        let err = invoke::<i32>("NATIVES_TEST_STRING", vec![]).unwrap_err();
        assert!(matches!(
            err,
            NativeError::UnexpectedReturn {
                native: "NATIVES_TEST_STRING",
                expected: "an integer"
            }
        ));
    }

    #[test]
    fn test_invoke_unknown_native() {
        global_host();
        let err = invoke::<()>("NATIVES_TEST_MISSING", vec![]).unwrap_err();
        assert!(matches!(err, NativeError::Host(HostError::UnknownNative(_))));
    }
}
