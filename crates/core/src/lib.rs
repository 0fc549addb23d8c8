//! Shared models and pure logic for the qbatch PBS/Torque execution plugin.

pub mod args;
pub mod config;
pub mod error;
pub mod jobname;
pub mod model;
pub mod registry;

pub use args::*;
pub use config::*;
pub use error::*;
pub use jobname::*;
pub use model::*;
pub use registry::*;
