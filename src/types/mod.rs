//! Data types shared by the layout model, renderer and hit tester.

mod column;
mod geometry;
mod row;
mod style;

pub use column::*;
pub use geometry::*;
pub use row::*;
pub use style::*;
