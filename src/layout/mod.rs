//! Graph layout
//!
//! Incremental radial placement: nodes are positioned once, when an
//! expansion first introduces them, and never moved afterwards.

pub mod radial;

pub use radial::{circle_angles, sector_angles, LayoutConfig, Placement, RadialLayout};
