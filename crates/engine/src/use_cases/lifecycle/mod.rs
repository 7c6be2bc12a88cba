//! Lifecycle use cases.
//!
//! Everything the tick drives: deferred compensations, the one-off initial
//! load and the region sweep.

mod compensation;
mod initial_load;
mod sweep;

pub use compensation::CompensationRunner;
pub use initial_load::InitialLoad;
pub use sweep::{LifecycleSweep, SweepReport};

/// Container for lifecycle use cases.
pub struct LifecycleUseCases {
    pub compensation: CompensationRunner,
    pub initial_load: InitialLoad,
    pub sweep: LifecycleSweep,
}

impl LifecycleUseCases {
    pub fn new(
        compensation: CompensationRunner,
        initial_load: InitialLoad,
        sweep: LifecycleSweep,
    ) -> Self {
        Self {
            compensation,
            initial_load,
            sweep,
        }
    }
}
