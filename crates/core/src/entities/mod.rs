//! Entity wrappers
//!
//! Thin typed handles over host entities. Each wrapper is a copy of the raw
//! handle; the entity may disappear at any time, so every accessor goes to
//! the host and can fail.
//!
//! # Example
//!
//! ```ignore
//! use fxrs_core::entities::{NetworkEntity, Ped};
//!
//! let ped = Ped::for_player(player)?;
//! if let Some(vehicle) = ped.vehicle()? {
//!     vehicle.set_engine_health(1000.0)?;
//!     events::emit_server("repaired", args![vehicle])?;
//! }
//! ```
//!
//! Wrappers convert into [`EventArg`] and are sent as their network id.

use std::fmt;

use fxrs_engine::HostError;
use fxrs_sdk::{EntityHandle, NetworkId, Vector3};

use crate::events::EventArg;
use crate::natives::{entity, ped, vehicle, NativeError};

/// Anything backed by a host entity handle
pub trait NetworkEntity {
    /// The raw host handle
    fn handle(&self) -> EntityHandle;

    /// Network id of the entity, `None` if it is not networked
    fn network_id(&self) -> Result<Option<NetworkId>, HostError> {
        Ok(fxrs_engine::host()?.network_id(self.handle()))
    }

    fn exists(&self) -> Result<bool, NativeError> {
        if !self.handle().is_valid() {
            return Ok(false);
        }
        entity::does_entity_exist(self.handle())
    }

    fn coords(&self) -> Result<Vector3, NativeError> {
        entity::get_entity_coords(self.handle())
    }

    fn set_coords(&self, position: Vector3) -> Result<(), NativeError> {
        entity::set_entity_coords(self.handle(), position.x, position.y, position.z)
    }

    fn heading(&self) -> Result<f32, NativeError> {
        entity::get_entity_heading(self.handle())
    }

    fn set_heading(&self, heading: f32) -> Result<(), NativeError> {
        entity::set_entity_heading(self.handle(), heading)
    }

    fn health(&self) -> Result<i32, NativeError> {
        entity::get_entity_health(self.handle())
    }

    fn set_health(&self, health: i32) -> Result<(), NativeError> {
        entity::set_entity_health(self.handle(), health)
    }

    fn model(&self) -> Result<u32, NativeError> {
        entity::get_entity_model(self.handle())
    }

    fn velocity(&self) -> Result<Vector3, NativeError> {
        entity::get_entity_velocity(self.handle())
    }

    fn delete(&self) -> Result<(), NativeError> {
        entity::delete_entity(self.handle())
    }

    /// Distance between the origins of two entities
    fn distance_to(&self, other: &dyn NetworkEntity) -> Result<f32, NativeError> {
        Ok(self.coords()?.distance(&other.coords()?))
    }
}

impl NetworkEntity for EntityHandle {
    fn handle(&self) -> EntityHandle {
        *self
    }
}

macro_rules! entity_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(EntityHandle);

        impl $name {
            /// Wrap a raw handle; `None` for the null handle
            pub fn new(handle: EntityHandle) -> Option<Self> {
                handle.is_valid().then_some(Self(handle))
            }

            /// Wrap a raw handle without checking it
            pub fn from_handle(handle: EntityHandle) -> Self {
                Self(handle)
            }
        }

        impl NetworkEntity for $name {
            fn handle(&self) -> EntityHandle {
                self.0
            }
        }

        impl From<$name> for EntityHandle {
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for EventArg {
            fn from(entity: $name) -> Self {
                EventArg::Entity(entity.0)
            }
        }

        impl From<&$name> for EventArg {
            fn from(entity: &$name) -> Self {
                EventArg::Entity(entity.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0.raw())
            }
        }
    };
}

entity_type!(
    /// Any entity
    Entity,
    "Entity"
);
entity_type!(
    /// A pedestrian, player-controlled or not
    Ped,
    "Ped"
);
entity_type!(
    /// A vehicle
    Vehicle,
    "Vehicle"
);
entity_type!(
    /// A world object
    Prop,
    "Prop"
);

impl Ped {
    /// The ped controlled by a player
    pub fn for_player(player: i32) -> Result<Option<Ped>, NativeError> {
        Ok(Ped::new(ped::get_player_ped(player)?))
    }

    pub fn armour(&self) -> Result<i32, NativeError> {
        ped::get_ped_armour(self.0)
    }

    pub fn set_armour(&self, amount: i32) -> Result<(), NativeError> {
        ped::set_ped_armour(self.0, amount)
    }

    pub fn is_in_any_vehicle(&self) -> Result<bool, NativeError> {
        ped::is_ped_in_any_vehicle(self.0, false)
    }

    pub fn is_dead(&self) -> Result<bool, NativeError> {
        ped::is_ped_dead_or_dying(self.0, true)
    }

    /// The vehicle the ped is currently in
    pub fn vehicle(&self) -> Result<Option<Vehicle>, NativeError> {
        Ok(Vehicle::new(vehicle::get_vehicle_ped_is_in(self.0, false)?))
    }

    /// The vehicle the ped was last in
    pub fn last_vehicle(&self) -> Result<Option<Vehicle>, NativeError> {
        Ok(Vehicle::new(vehicle::get_vehicle_ped_is_in(self.0, true)?))
    }

    /// World position of a bone
    pub fn bone_coords(&self, bone: i32) -> Result<Vector3, NativeError> {
        ped::get_ped_bone_coords(self.0, bone, 0.0, 0.0, 0.0)
    }
}

impl Vehicle {
    pub fn engine_health(&self) -> Result<f32, NativeError> {
        vehicle::get_vehicle_engine_health(self.0)
    }

    pub fn set_engine_health(&self, health: f32) -> Result<(), NativeError> {
        vehicle::set_vehicle_engine_health(self.0, health)
    }

    /// Plate text, padded by the host to eight characters
    pub fn plate(&self) -> Result<String, NativeError> {
        vehicle::get_vehicle_number_plate_text(self.0)
    }

    pub fn set_plate(&self, text: &str) -> Result<(), NativeError> {
        vehicle::set_vehicle_number_plate_text(self.0, text)
    }

    pub fn lock_status(&self) -> Result<i32, NativeError> {
        vehicle::get_vehicle_door_lock_status(self.0)
    }

    pub fn set_doors_locked(&self, status: i32) -> Result<(), NativeError> {
        vehicle::set_vehicle_doors_locked(self.0, status)
    }

    /// Seats including the driver's
    pub fn seats(&self) -> Result<i32, NativeError> {
        Ok(vehicle::get_vehicle_max_number_of_passengers(self.0)? + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::args;
    use crate::testing::global_host;
    use fxrs_sdk::natives::{GET_PED_ARMOUR, GET_VEHICLE_PED_IS_IN};

    #[test]
    fn test_null_handle_is_rejected() {
        assert!(Ped::new(EntityHandle::NULL).is_none());
        assert!(Vehicle::new(EntityHandle(5)).is_some());
        assert!(!Entity::from_handle(EntityHandle::NULL).exists().unwrap());
    }

    #[test]
    fn test_wrappers_become_entity_args() {
        let vehicle = Vehicle::from_handle(EntityHandle(33));
        let args = args![vehicle, &Ped::from_handle(EntityHandle(34))];
        assert_eq!(
            args,
            vec![
                EventArg::Entity(EntityHandle(33)),
                EventArg::Entity(EntityHandle(34))
            ]
        );
        assert_eq!(EventArg::entity(&vehicle), EventArg::Entity(EntityHandle(33)));
        assert_eq!(vehicle.to_string(), "Vehicle(33)");
    }

    #[test]
    fn test_network_id_lookup() {
        let host = global_host();
        host.set_network_id(EntityHandle(4301), NetworkId(77));

        let prop = Prop::from_handle(EntityHandle(4301));
        assert_eq!(prop.network_id().unwrap(), Some(NetworkId(77)));
        assert_eq!(
            Prop::from_handle(EntityHandle(4302)).network_id().unwrap(),
            None
        );
    }

    #[test]
    fn test_ped_accessors_go_through_natives() {
        let host = global_host();
        host.set_native(GET_PED_ARMOUR, json!(50));
        host.set_native(GET_VEHICLE_PED_IS_IN, json!(0));

        let ped = Ped::from_handle(EntityHandle(4401));
        assert_eq!(ped.armour().unwrap(), 50);
        // Null vehicle handle means on foot
        assert_eq!(ped.vehicle().unwrap(), None);
    }
}
