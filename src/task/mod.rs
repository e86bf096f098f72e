//! Task lifecycle management for Taskmill.
//!
//! This module implements the task aggregate and its orchestration with the
//! asynchronous notification pipeline: the immutable task entity with its
//! validation and transition rules, the use-case layer enforcing business
//! invariants, and the producer side of the due-soon notification queue.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
