pub mod field;
pub mod geometry_patch;
pub mod report;

pub use field::Field;
pub use geometry_patch::{GeometryPatch, Point, UpdateSet};
pub use report::{PatchEntry, PatchReport, PatchStatus};
