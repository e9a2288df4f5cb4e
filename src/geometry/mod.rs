pub mod bounds;
pub mod path;

pub use bounds::{Bounds, BoundsReport, OutsideLabel, ViewBox, check_bounds};
pub use path::{path_coordinates, path_numbers};
