//! Scanner integration test modules

pub mod artifacts;
pub mod concurrency;
pub mod discovery;
pub mod isolation;
