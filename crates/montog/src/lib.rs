//! montog library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does montog do?
//!
//! montog switches the machine between named multi-monitor arrangements with
//! one command.  Each user action runs one load → resolve → execute sequence:
//!
//! 1. Load the configuration document from the search path, or synthesize a
//!    default one from the monitors `xrandr` reports.
//! 2. Resolve the chosen arrangement into an ordered list of per-monitor
//!    operations (see `montog_core::resolve`).
//! 3. Render the operations into a single `xrandr` invocation and run it.

/// Application layer: use cases and the traits they depend on.
pub mod application;

/// Infrastructure layer: process runner, xrandr adapter, file storage and
/// desktop entries.
pub mod infrastructure;
