//! Host value types
//!
//! Entities are referenced by script handles that are only meaningful on the
//! machine that created them. Networked entities additionally carry a network
//! id which is stable across client and server and is the only form that may
//! be sent over the wire.

use std::fmt;

/// Script handle to an entity (ped, vehicle, object)
///
/// A handle of `0` never refers to a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct EntityHandle(pub i32);

impl EntityHandle {
    /// The null handle
    pub const NULL: Self = Self(0);

    /// Get the raw handle value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check that this is not the null handle
    ///
    /// Note: a non-null handle may still refer to a deleted entity.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl From<i32> for EntityHandle {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Wire-safe identifier of a networked entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NetworkId(pub i32);

impl NetworkId {
    /// Get the raw network id
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

/// Three-component vector returned by position, rotation and velocity natives
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// The zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new vector
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance to another point
    pub fn distance(&self, other: &Vector3) -> f32 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z).length()
    }

    /// Components as an array
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
