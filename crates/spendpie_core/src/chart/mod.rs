//! Donut chart of the current expense collection.
//!
//! # Responsibility
//! - Lay out expenses as proportional segments.
//! - Diff successive layouts by expense id and tween the geometry.
//! - Assign stable category colors and build the legend and tooltip.
//! - Serialize sampled frames to SVG.
//!
//! # Invariants
//! - Segment geometry is always derived from the collection, never edited
//!   directly.

pub mod arc;
pub mod color;
pub mod diff;
pub mod legend;
pub mod pie;
pub mod renderer;
pub mod svg;
pub mod tooltip;
pub mod transition;
