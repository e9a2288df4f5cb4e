//! terrapatch - Merge generated territory geometry into a territory data file

pub mod config;
pub mod domain;
pub mod geometry;
pub mod patcher;
pub mod store;

pub use domain::{Field, GeometryPatch, PatchReport, PatchStatus, Point, UpdateSet};
pub use patcher::{PatchError, PatchOptions, Patched, Patcher, patch};
