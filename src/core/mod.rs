//! Recon pipeline core: targets, dated workspace, tool catalogue and sequencing.

pub mod diff;
pub mod pipeline;
pub mod runner;
pub mod target;
pub mod tools;
pub mod workspace;

#[cfg(test)]
pub mod mock_runner;
