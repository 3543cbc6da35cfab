//! Storage infrastructure: configuration document persistence.
//!
//! - `paths` resolves the XDG base directories the files live under.
//! - `config` reads the first usable document from the search path, and
//!   renders and writes the annotated document for `about` and `init`.

pub mod config;
pub mod paths;
