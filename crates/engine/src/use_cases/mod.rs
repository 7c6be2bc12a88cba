//! Use cases - the operations the host's events map onto.
//!
//! Each use case is a struct holding the ports and settings it needs and an
//! `execute` method that takes the live [`TerritoryState`](crate::stores::TerritoryState)
//! by reference. None of them keeps state between calls except the
//! notifier, which owns the per-actor boundary states.

pub mod claim;
pub mod inspect;
pub mod lifecycle;
mod notices;
pub mod protection;
pub mod settings;
pub mod territory;
pub mod visuals;

pub use claim::{
    BreakBlock, BreakInput, BreakOutcome, ClaimUseCases, PlaceBlock, PlacementInput,
    PlacementOutcome,
};
pub use inspect::{InspectClaim, InspectInput, InspectOutcome, InspectTarget};
pub use lifecycle::{CompensationRunner, InitialLoad, LifecycleSweep, LifecycleUseCases, SweepReport};
pub use notices::Notices;
pub use protection::{CombatGuard, CombatOutcome, ExplosionGuard, InteractionGuard, ProtectionUseCases};
pub use settings::{
    ApplySettings, MemberEntry, RegionSnapshot, SettingsCommand, SettingsRequest, SettingsSession,
};
pub use territory::TerritoryNotifier;

/// Container for all synchronous use cases.
pub struct UseCases {
    pub claim: ClaimUseCases,
    pub protection: ProtectionUseCases,
    pub lifecycle: LifecycleUseCases,
    pub inspect: InspectClaim,
    pub apply_settings: ApplySettings,
}
