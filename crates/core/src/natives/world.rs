//! Water and weather natives

use serde_json::Value;

use fxrs_sdk::natives::*;

use super::{invoke, IntoNativeArg, NativeError};

natives! {
    /// Weather type name, e.g. `EXTRASUNNY` or `RAIN`
    pub fn set_weather_type_now(weather: &str) -> () = SET_WEATHER_TYPE_NOW;

    pub fn get_rain_level() -> f32 = GET_RAIN_LEVEL;

    /// Rain intensity 0..1, or -1 to let the weather decide
    pub fn set_rain(level: f32) -> () = SET_RAIN;
}

/// Water surface height at a position, `None` when there is no water
///
/// The host answers with a `[found, height]` pair.
pub fn get_water_height(x: f32, y: f32, z: f32) -> Result<Option<f32>, NativeError> {
    let value: Value = invoke(
        GET_WATER_HEIGHT,
        vec![x.into_native_arg(), y.into_native_arg(), z.into_native_arg()],
    )?;

    let unexpected = NativeError::UnexpectedReturn {
        native: GET_WATER_HEIGHT,
        expected: "a [found, height] pair",
    };
    let Value::Array(pair) = value else {
        return Err(unexpected);
    };
    match pair.as_slice() {
        [Value::Bool(false), _] => Ok(None),
        [Value::Bool(true), height] => height
            .as_f64()
            .map(|h| Some(h as f32))
            .ok_or(unexpected),
        _ => Err(unexpected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::testing::global_host;

    #[test]
    fn test_water_height_pair() {
        let host = global_host();

        host.set_native(GET_WATER_HEIGHT, json!([true, 12.5]));
        assert_eq!(get_water_height(0.0, 0.0, 50.0).unwrap(), Some(12.5));
    }
}
