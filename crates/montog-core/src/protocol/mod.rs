//! Text protocol spoken with the display-control tool.
//!
//! montog never talks to the X server directly.  It reads the human-readable
//! listings printed by `xrandr` and hands `xrandr` a flat argument list built
//! from resolved operations.  Both directions live in [`xrandr`].

pub mod xrandr;
