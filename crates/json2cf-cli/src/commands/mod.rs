//! Command implementations

mod profile;
mod reconcile;
mod sync;

pub use profile::run_profile;
pub use reconcile::run_reconcile;
pub use sync::run_sync;
