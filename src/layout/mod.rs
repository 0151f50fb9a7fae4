//! Layout model for computing column bands and viewport management.
//!
//! This module handles:
//! - Resolving effective column widths (override > intrinsic > default)
//! - Reading viewport state (scroll position, client box, DPR) from the host
//! - Computing the virtualized row window for a frame

mod grid_layout;
mod viewport;

pub use grid_layout::{ColumnHit, GridLayout};
pub use viewport::{FixedViewport, RowWindow, ViewportSource, ViewportState};
