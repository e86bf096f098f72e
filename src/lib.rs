//! Taskmill: task lifecycle management with asynchronous due-date
//! notifications.
//!
//! This crate provides the core of a task manager: an immutable task
//! aggregate with validated state transitions, a use-case layer enforcing
//! business invariants, and a decoupled notification pipeline that records
//! due-soon alerts through a timer-driven worker.
//!
//! # Architecture
//!
//! Taskmill follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task aggregate, use-cases, and notification production
//! - [`worker`]: Timer-driven notification queue consumer

pub mod task;
pub mod worker;
