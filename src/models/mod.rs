pub mod edit;
pub mod pool;
