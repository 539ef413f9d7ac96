pub mod config;
pub mod errors;
pub mod geometry;
pub mod policy;
pub mod scheduler;
pub mod target;
pub mod trigger;
