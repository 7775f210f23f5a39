//! Host native names
//!
//! Natives are invoked by name; the strings must match the host's native
//! registry exactly.

// Entity
pub const DOES_ENTITY_EXIST: &str = "DOES_ENTITY_EXIST";
pub const DELETE_ENTITY: &str = "DELETE_ENTITY";
pub const GET_ENTITY_COORDS: &str = "GET_ENTITY_COORDS";
pub const SET_ENTITY_COORDS: &str = "SET_ENTITY_COORDS";
pub const GET_ENTITY_HEADING: &str = "GET_ENTITY_HEADING";
pub const SET_ENTITY_HEADING: &str = "SET_ENTITY_HEADING";
pub const GET_ENTITY_HEALTH: &str = "GET_ENTITY_HEALTH";
pub const SET_ENTITY_HEALTH: &str = "SET_ENTITY_HEALTH";
pub const GET_ENTITY_MODEL: &str = "GET_ENTITY_MODEL";
pub const GET_ENTITY_VELOCITY: &str = "GET_ENTITY_VELOCITY";
pub const NETWORK_GET_NETWORK_ID_FROM_ENTITY: &str = "NETWORK_GET_NETWORK_ID_FROM_ENTITY";
pub const NETWORK_GET_ENTITY_FROM_NETWORK_ID: &str = "NETWORK_GET_ENTITY_FROM_NETWORK_ID";

// Vehicle
pub const GET_VEHICLE_ENGINE_HEALTH: &str = "GET_VEHICLE_ENGINE_HEALTH";
pub const SET_VEHICLE_ENGINE_HEALTH: &str = "SET_VEHICLE_ENGINE_HEALTH";
pub const GET_VEHICLE_NUMBER_PLATE_TEXT: &str = "GET_VEHICLE_NUMBER_PLATE_TEXT";
pub const SET_VEHICLE_NUMBER_PLATE_TEXT: &str = "SET_VEHICLE_NUMBER_PLATE_TEXT";
pub const GET_VEHICLE_DOOR_LOCK_STATUS: &str = "GET_VEHICLE_DOOR_LOCK_STATUS";
pub const SET_VEHICLE_DOORS_LOCKED: &str = "SET_VEHICLE_DOORS_LOCKED";
pub const GET_VEHICLE_MAX_NUMBER_OF_PASSENGERS: &str = "GET_VEHICLE_MAX_NUMBER_OF_PASSENGERS";
pub const GET_VEHICLE_PED_IS_IN: &str = "GET_VEHICLE_PED_IS_IN";

// Ped
pub const GET_PLAYER_PED: &str = "GET_PLAYER_PED";
pub const GET_PED_ARMOUR: &str = "GET_PED_ARMOUR";
pub const SET_PED_ARMOUR: &str = "SET_PED_ARMOUR";
pub const IS_PED_IN_ANY_VEHICLE: &str = "IS_PED_IN_ANY_VEHICLE";
pub const IS_PED_DEAD_OR_DYING: &str = "IS_PED_DEAD_OR_DYING";
pub const GET_PED_BONE_COORDS: &str = "GET_PED_BONE_COORDS";

// Graphics
pub const DRAW_LINE: &str = "DRAW_LINE";
pub const DRAW_RECT: &str = "DRAW_RECT";
pub const SET_TEXT_SCALE: &str = "SET_TEXT_SCALE";

// Resource KVP storage
pub const SET_RESOURCE_KVP: &str = "SET_RESOURCE_KVP";
pub const SET_RESOURCE_KVP_INT: &str = "SET_RESOURCE_KVP_INT";
pub const GET_RESOURCE_KVP_STRING: &str = "GET_RESOURCE_KVP_STRING";
pub const GET_RESOURCE_KVP_INT: &str = "GET_RESOURCE_KVP_INT";
pub const DELETE_RESOURCE_KVP: &str = "DELETE_RESOURCE_KVP";

// Resource management
pub const GET_CURRENT_RESOURCE_NAME: &str = "GET_CURRENT_RESOURCE_NAME";
pub const GET_RESOURCE_STATE: &str = "GET_RESOURCE_STATE";
pub const GET_NUM_RESOURCES: &str = "GET_NUM_RESOURCES";
pub const GET_RESOURCE_BY_FIND_INDEX: &str = "GET_RESOURCE_BY_FIND_INDEX";

// Water and weather
pub const GET_WATER_HEIGHT: &str = "GET_WATER_HEIGHT";
pub const SET_WEATHER_TYPE_NOW: &str = "SET_WEATHER_TYPE_NOW";
pub const GET_RAIN_LEVEL: &str = "GET_RAIN_LEVEL";
pub const SET_RAIN: &str = "SET_RAIN";

/// Every native the framework wraps, for availability checks at load
pub const NATIVE_NAMES: &[&str] = &[
    DOES_ENTITY_EXIST,
    DELETE_ENTITY,
    GET_ENTITY_COORDS,
    SET_ENTITY_COORDS,
    GET_ENTITY_HEADING,
    SET_ENTITY_HEADING,
    GET_ENTITY_HEALTH,
    SET_ENTITY_HEALTH,
    GET_ENTITY_MODEL,
    GET_ENTITY_VELOCITY,
    NETWORK_GET_NETWORK_ID_FROM_ENTITY,
    NETWORK_GET_ENTITY_FROM_NETWORK_ID,
    GET_VEHICLE_ENGINE_HEALTH,
    SET_VEHICLE_ENGINE_HEALTH,
    GET_VEHICLE_NUMBER_PLATE_TEXT,
    SET_VEHICLE_NUMBER_PLATE_TEXT,
    GET_VEHICLE_DOOR_LOCK_STATUS,
    SET_VEHICLE_DOORS_LOCKED,
    GET_VEHICLE_MAX_NUMBER_OF_PASSENGERS,
    GET_VEHICLE_PED_IS_IN,
    GET_PLAYER_PED,
    GET_PED_ARMOUR,
    SET_PED_ARMOUR,
    IS_PED_IN_ANY_VEHICLE,
    IS_PED_DEAD_OR_DYING,
    GET_PED_BONE_COORDS,
    DRAW_LINE,
    DRAW_RECT,
    SET_TEXT_SCALE,
    SET_RESOURCE_KVP,
    SET_RESOURCE_KVP_INT,
    GET_RESOURCE_KVP_STRING,
    GET_RESOURCE_KVP_INT,
    DELETE_RESOURCE_KVP,
    GET_CURRENT_RESOURCE_NAME,
    GET_RESOURCE_STATE,
    GET_NUM_RESOURCES,
    GET_RESOURCE_BY_FIND_INDEX,
    GET_WATER_HEIGHT,
    SET_WEATHER_TYPE_NOW,
    GET_RAIN_LEVEL,
    SET_RAIN,
];
