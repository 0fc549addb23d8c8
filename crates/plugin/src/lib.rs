//! Batch execution against a PBS/Torque scheduler: command execution,
//! submission with bounded retry, and poll-based completion tracking.

pub mod executor;
pub mod manager;
pub mod pbs;
pub mod quiet;
pub mod scheduler;
pub mod submit;

pub use executor::{CommandOutput, CommandRunner, ProcessRunner};
pub use manager::BatchManager;
pub use pbs::PbsScheduler;
pub use scheduler::Scheduler;
pub use submit::submit_node;

#[cfg(test)]
pub(crate) mod test_support;
