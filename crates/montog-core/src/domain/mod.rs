//! Domain entities for montog.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies.  Everything here can be compiled and tested without an X
//! server, an `xrandr` binary, or a configuration file on disk.
//!
//! Outer layers (the application use cases and the infrastructure adapters in
//! the `montog` crate) depend on the domain, but the domain never depends on
//! them.

/// Arrangement resolution: configuration + name → ordered operations.
pub mod arrangement;

/// Monitor aliases, arrangements and the configuration snapshot.
pub mod config;

/// Default configuration built from a probed topology.
pub mod synthesis;

/// Connected monitors as reported by the display-control tool.
pub mod topology;
