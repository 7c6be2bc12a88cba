//! Footprint point sets handed to the presentation port.

use terraclaim_domain::{BlockPos, WorldPos, PROTECTION_RADIUS};

/// Every boundary block of the footprint around `center`, `height_offset`
/// blocks above it. The centre itself is never included.
pub fn preview_ring(center: BlockPos, height_offset: i32) -> Vec<WorldPos> {
    let r = PROTECTION_RADIUS;
    let mut points = Vec::with_capacity((8 * r) as usize);
    for dx in -r..=r {
        for dz in -r..=r {
            if dx.abs() == r || dz.abs() == r {
                points.push(center.offset(dx, height_offset, dz).to_world());
            }
        }
    }
    points
}

/// Sparse outline: four points per step along the edges.
pub fn outline(center: BlockPos, height_offset: i32) -> Vec<WorldPos> {
    let r = PROTECTION_RADIUS;
    (-r..=r)
        .flat_map(|i| {
            [
                center.offset(i, height_offset, -r),
                center.offset(i, height_offset, r),
                center.offset(-r, height_offset, i),
                center.offset(r, height_offset, i),
            ]
        })
        .map(BlockPos::to_world)
        .collect()
}
