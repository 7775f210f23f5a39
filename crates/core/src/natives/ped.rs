//! Ped natives

use fxrs_sdk::natives::*;
use fxrs_sdk::{EntityHandle, Vector3};

natives! {
    pub fn get_player_ped(player: i32) -> EntityHandle = GET_PLAYER_PED;

    pub fn get_ped_armour(ped: EntityHandle) -> i32 = GET_PED_ARMOUR;
    pub fn set_ped_armour(ped: EntityHandle, amount: i32) -> () = SET_PED_ARMOUR;

    pub fn is_ped_in_any_vehicle(ped: EntityHandle, at_get_in: bool) -> bool = IS_PED_IN_ANY_VEHICLE;
    pub fn is_ped_dead_or_dying(ped: EntityHandle, include_dying: bool) -> bool = IS_PED_DEAD_OR_DYING;

    /// World position of a bone plus a local offset
    pub fn get_ped_bone_coords(
        ped: EntityHandle,
        bone: i32,
        offset_x: f32,
        offset_y: f32,
        offset_z: f32,
    ) -> Vector3 = GET_PED_BONE_COORDS;
}
