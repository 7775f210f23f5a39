//! Vehicle natives

use fxrs_sdk::natives::*;
use fxrs_sdk::EntityHandle;

natives! {
    /// Engine health, -4000..1000
    pub fn get_vehicle_engine_health(vehicle: EntityHandle) -> f32 = GET_VEHICLE_ENGINE_HEALTH;
    pub fn set_vehicle_engine_health(vehicle: EntityHandle, health: f32) -> () = SET_VEHICLE_ENGINE_HEALTH;

    pub fn get_vehicle_number_plate_text(vehicle: EntityHandle) -> String = GET_VEHICLE_NUMBER_PLATE_TEXT;
    pub fn set_vehicle_number_plate_text(vehicle: EntityHandle, text: &str) -> () = SET_VEHICLE_NUMBER_PLATE_TEXT;

    pub fn get_vehicle_door_lock_status(vehicle: EntityHandle) -> i32 = GET_VEHICLE_DOOR_LOCK_STATUS;
    pub fn set_vehicle_doors_locked(vehicle: EntityHandle, status: i32) -> () = SET_VEHICLE_DOORS_LOCKED;

    /// Seats excluding the driver
    pub fn get_vehicle_max_number_of_passengers(vehicle: EntityHandle) -> i32 = GET_VEHICLE_MAX_NUMBER_OF_PASSENGERS;

    /// The vehicle the ped is in, or the last one it was in when
    /// `last_vehicle` is set. Null handle when there is none.
    pub fn get_vehicle_ped_is_in(ped: EntityHandle, last_vehicle: bool) -> EntityHandle = GET_VEHICLE_PED_IS_IN;
}
