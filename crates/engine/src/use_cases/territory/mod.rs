//! Territory presence use cases.

mod notifier;

pub use notifier::TerritoryNotifier;
