//! Drawing natives
//!
//! Draw calls only last one frame; call them every tick.

use fxrs_sdk::natives::*;
use fxrs_sdk::Vector3;

natives! {
    pub fn draw_line(
        x1: f32, y1: f32, z1: f32,
        x2: f32, y2: f32, z2: f32,
        red: i32, green: i32, blue: i32, alpha: i32,
    ) -> () = DRAW_LINE;

    /// Screen-space rectangle; coordinates are 0..1 fractions of the screen
    pub fn draw_rect(
        x: f32, y: f32, width: f32, height: f32,
        red: i32, green: i32, blue: i32, alpha: i32,
    ) -> () = DRAW_RECT;

    pub fn set_text_scale(scale: f32, size: f32) -> () = SET_TEXT_SCALE;
}

/// Draw a line between two world positions
pub fn draw_line_between(
    from: Vector3,
    to: Vector3,
    [red, green, blue, alpha]: [u8; 4],
) -> Result<(), super::NativeError> {
    draw_line(
        from.x,
        from.y,
        from.z,
        to.x,
        to.y,
        to.z,
        red.into(),
        green.into(),
        blue.into(),
        alpha.into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::testing::global_host;

    #[test]
    fn test_draw_line_between_flattens_vectors() {
        let host = global_host();
        host.set_native(DRAW_LINE, json!(null));

        draw_line_between(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            [255, 0, 0, 128],
        )
        .unwrap();

        let expected: Vec<_> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
            .iter()
            .map(|v| json!(*v as f32))
            .chain([255, 0, 0, 128].iter().map(|v| json!(*v)))
            .collect();
        assert!(host
            .native_calls()
            .iter()
            .any(|c| c.name == DRAW_LINE && c.args == expected));
    }
}
