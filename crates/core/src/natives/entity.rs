//! Entity natives

use fxrs_sdk::natives::*;
use fxrs_sdk::{EntityHandle, Vector3};

natives! {
    pub fn does_entity_exist(entity: EntityHandle) -> bool = DOES_ENTITY_EXIST;
    pub fn delete_entity(entity: EntityHandle) -> () = DELETE_ENTITY;

    /// World position of the entity's origin
    pub fn get_entity_coords(entity: EntityHandle) -> Vector3 = GET_ENTITY_COORDS;
    pub fn set_entity_coords(entity: EntityHandle, x: f32, y: f32, z: f32) -> () = SET_ENTITY_COORDS;

    /// Heading in degrees, 0..360
    pub fn get_entity_heading(entity: EntityHandle) -> f32 = GET_ENTITY_HEADING;
    pub fn set_entity_heading(entity: EntityHandle, heading: f32) -> () = SET_ENTITY_HEADING;

    pub fn get_entity_health(entity: EntityHandle) -> i32 = GET_ENTITY_HEALTH;
    pub fn set_entity_health(entity: EntityHandle, health: i32) -> () = SET_ENTITY_HEALTH;

    /// Model hash
    pub fn get_entity_model(entity: EntityHandle) -> u32 = GET_ENTITY_MODEL;
    pub fn get_entity_velocity(entity: EntityHandle) -> Vector3 = GET_ENTITY_VELOCITY;

    pub fn network_get_network_id_from_entity(entity: EntityHandle) -> i32 = NETWORK_GET_NETWORK_ID_FROM_ENTITY;
    pub fn network_get_entity_from_network_id(net_id: i32) -> EntityHandle = NETWORK_GET_ENTITY_FROM_NETWORK_ID;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::testing::global_host;

    #[test]
    fn test_coords_forward_handle_and_convert() {
        let host = global_host();
        host.set_native(GET_ENTITY_COORDS, json!([10.0, -4.5, 30.0]));

        let coords = get_entity_coords(EntityHandle(4101)).unwrap();
        assert_eq!(coords, Vector3::new(10.0, -4.5, 30.0));

        let call = host
            .native_calls()
            .into_iter()
            .find(|c| c.name == GET_ENTITY_COORDS && c.args == vec![json!(4101)]);
        assert!(call.is_some());
    }

    #[test]
    fn test_setter_passes_all_arguments() {
        let host = global_host();
        host.set_native(SET_ENTITY_COORDS, json!(null));

        set_entity_coords(EntityHandle(4102), 1.0, 2.0, 3.0).unwrap();

        assert!(host.native_calls().iter().any(|c| {
            c.name == SET_ENTITY_COORDS && c.args == vec![json!(4102), json!(1.0), json!(2.0), json!(3.0)]
        }));
    }
}
