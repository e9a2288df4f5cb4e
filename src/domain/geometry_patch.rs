use serde::Deserialize;
use std::collections::BTreeMap;

use super::Field;

/// A 2D point in map (view box) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// New geometric values for one territory
///
/// Every field is optional. A field left as `None` is never touched in the
/// document, so a patch carrying only a centroid rewrites only the centroid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryPatch {
    /// SVG path description, written verbatim. The polygon generator emits
    /// this under the key `d`.
    #[serde(default, alias = "d")]
    pub outline: Option<String>,
    #[serde(default)]
    pub centroid: Option<Point>,
    #[serde(default)]
    pub label_position: Option<Point>,
    #[serde(default)]
    pub troop_position: Option<Point>,
    #[serde(default)]
    pub points_position: Option<Point>,
}

impl GeometryPatch {
    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = Some(outline.into());
        self
    }

    pub fn with_point(mut self, field: Field, point: Point) -> Self {
        match field {
            Field::Centroid => self.centroid = Some(point),
            Field::LabelPosition => self.label_position = Some(point),
            Field::TroopPosition => self.troop_position = Some(point),
            Field::PointsPosition => self.points_position = Some(point),
            Field::Outline => {}
        }
        self
    }

    /// Value for a point-valued field, `None` for `Outline` or when unset
    pub fn point(&self, field: Field) -> Option<Point> {
        match field {
            Field::Centroid => self.centroid,
            Field::LabelPosition => self.label_position,
            Field::TroopPosition => self.troop_position,
            Field::PointsPosition => self.points_position,
            Field::Outline => None,
        }
    }

    /// Fields this patch will attempt to write
    pub fn requested_fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.outline.is_some() {
            fields.push(Field::Outline);
        }
        fields.extend(Field::POINTS.into_iter().filter(|f| self.point(*f).is_some()));
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.requested_fields().is_empty()
    }
}

/// Territory id -> new geometry, iterated in identifier order
pub type UpdateSet = BTreeMap<String, GeometryPatch>;
