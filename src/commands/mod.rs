pub mod dataset;
pub mod reference;
pub mod snapshot;
pub mod zpool;
