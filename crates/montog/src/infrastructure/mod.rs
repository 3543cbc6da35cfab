//! Infrastructure layer for montog.
//!
//! Contains OS-facing adapters: the `xrandr` process runner, configuration
//! file storage and the desktop entry files.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `montog_core`, but MUST NOT be imported by the `application` layer.

pub mod desktop;
pub mod settings;
pub mod storage;
pub mod xrandr;
