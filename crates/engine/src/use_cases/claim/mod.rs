//! Claim use cases.
//!
//! Creating and removing claims through the marker block, and the build
//! gate for every other block placed or broken.

mod break_block;
mod place_block;

pub use break_block::{BreakBlock, BreakInput, BreakOutcome};
pub use place_block::{PlaceBlock, PlacementInput, PlacementOutcome};

/// Container for claim use cases.
pub struct ClaimUseCases {
    pub place: PlaceBlock,
    pub break_block: BreakBlock,
}

impl ClaimUseCases {
    pub fn new(place: PlaceBlock, break_block: BreakBlock) -> Self {
        Self { place, break_block }
    }
}
