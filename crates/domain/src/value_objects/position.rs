//! Positions in the simulated world.
//!
//! Two coordinate flavours exist:
//! - [`BlockPos`] - integer block coordinates, used for anchors (markers and
//!   region centres) and for block events.
//! - [`WorldPos`] - continuous coordinates reported for actors and entities.
//!
//! Anchor lookups always floor a [`WorldPos`] into a [`BlockPos`] before
//! comparing, so stored anchors and queried points agree on one rule.

use serde::{Deserialize, Serialize};

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The block directly beneath this one.
    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    pub fn to_world(self) -> WorldPos {
        WorldPos::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Continuous world coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Block containing this point.
    pub fn floor(self) -> BlockPos {
        BlockPos::new(floor_i32(self.x), floor_i32(self.y), floor_i32(self.z))
    }

    /// Largest horizontal axis distance to `other` (vertical axis ignored).
    pub fn horizontal_chebyshev(self, other: WorldPos) -> f64 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl From<BlockPos> for WorldPos {
    fn from(pos: BlockPos) -> Self {
        pos.to_world()
    }
}

// Saturating float-to-int conversion; positions outside i32 never occur in practice.
fn floor_i32(value: f64) -> i32 {
    value.floor() as i32
}
