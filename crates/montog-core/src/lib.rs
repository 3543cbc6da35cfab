//! # montog-core
//!
//! Shared library for montog containing the display topology model, the
//! configuration data model, the arrangement resolver and the `xrandr`
//! command-line codec.
//!
//! It has zero dependencies on processes, the file system, or UI frameworks.
//!
//! # Architecture overview
//!
//! montog switches between named multi-monitor arrangements with one action.
//! Choosing an arrangement flows through three pure steps that live here:
//!
//! - **`domain`** – The data model.  A [`TopologySnapshot`] records which
//!   monitors are connected right now; a [`Configuration`] maps user-chosen
//!   aliases to monitor ids and names arrangements of those aliases.  The
//!   resolver turns a configuration plus an arrangement name into an ordered
//!   list of [`Operation`]s, and [`synthesize`] builds a default configuration
//!   from a topology when the user has not written one.
//!
//! - **`protocol`** – How montog talks to `xrandr`.  Parses the text printed
//!   by `xrandr --listmonitors` and `xrandr`, and renders operations into the
//!   flat argument list handed to the tool.
//!
//! The `montog` crate supplies the process runner, the configuration file
//! store and the command-line front end.

pub mod domain;
pub mod protocol;

pub use domain::arrangement::{resolve, Operation, Placement, ResolutionError};
pub use domain::config::{Arrangement, ConfigSource, Configuration, MonitorAlias, OrderedMap};
pub use domain::synthesis::synthesize;
pub use domain::topology::{Monitor, TopologySnapshot};
pub use protocol::xrandr::{parse_topology, render_arguments};
