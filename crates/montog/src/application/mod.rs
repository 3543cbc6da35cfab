//! Application layer use cases for montog.
//!
//! Use cases in this layer orchestrate the domain types from `montog-core`
//! and depend only on traits, so the infrastructure can be swapped (or
//! replaced by test doubles) without changing this code.  Nothing here
//! spawns processes or touches the file system.
//!
//! # Sub-modules
//!
//! - **`topology`** – The [`topology::TopologyProbe`] trait and the
//!   "log and fall back to an empty snapshot" policy for probe failures.
//!
//! - **`configuration`** – The [`configuration::ConfigRepository`] trait and
//!   the load-or-synthesize policy that always yields a configuration.
//!
//! - **`switch_arrangement`** – Loads the configuration, resolves an
//!   arrangement and hands the operations to a
//!   [`switch_arrangement::DisplayController`].
//!
//! - **`about`** – Assembles the human-readable report of the detected
//!   monitors and the active configuration.

pub mod about;
pub mod configuration;
pub mod switch_arrangement;
pub mod topology;
