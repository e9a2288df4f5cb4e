use geo::{BoundingRect, MultiPoint, Rect};

use super::path::path_coordinates;
use crate::domain::{Point, UpdateSet};

pub const DEFAULT_VIEW_WIDTH: f64 = 1400.0;
pub const DEFAULT_VIEW_HEIGHT: f64 = 920.0;

/// Bounding box in view box coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let multi: MultiPoint<f64> = points.iter().copied().collect();
        multi.bounding_rect().map(Self::from)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        }
    }
}

/// The SVG view box the territory map is drawn into, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEW_WIDTH,
            height: DEFAULT_VIEW_HEIGHT,
        }
    }
}

impl ViewBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Sides of the view box a point falls beyond; empty when inside.
    /// Edges count as inside.
    pub fn outside_sides(&self, point: Point) -> Vec<&'static str> {
        let mut sides = Vec::new();
        if point.x < 0.0 {
            sides.push("left");
        } else if point.x > self.width {
            sides.push("right");
        }
        if point.y < 0.0 {
            sides.push("top");
        } else if point.y > self.height {
            sides.push("bottom");
        }
        sides
    }
}

/// A territory whose label would be drawn outside the view box
#[derive(Debug, Clone, PartialEq)]
pub struct OutsideLabel {
    pub id: String,
    pub position: Point,
    pub sides: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct BoundsReport {
    /// Extent of all outline coordinates and label positions, `None` when the
    /// update set carries no geometry
    pub bounds: Option<Bounds>,
    pub view_box: ViewBox,
    pub outside: Vec<OutsideLabel>,
}

impl BoundsReport {
    /// Translation that moves the geometry's minimum corner to the origin
    pub fn offset(&self) -> Option<(f64, f64)> {
        self.bounds.as_ref().map(|b| (-b.min_x, -b.min_y))
    }

    /// Uniform scale that fits the geometry inside the view box
    pub fn scale_factor(&self) -> Option<f64> {
        let bounds = self.bounds.as_ref()?;
        let fit = |view: f64, range: f64| {
            if range > 0.0 {
                view / range
            } else {
                f64::INFINITY
            }
        };
        let scale = fit(self.view_box.width, bounds.width())
            .min(fit(self.view_box.height, bounds.height()));
        Some(if scale.is_finite() { scale } else { 1.0 })
    }

    pub fn fits(&self) -> bool {
        self.outside.is_empty()
    }
}

/// Measure generated geometry against the map view box
///
/// # Algorithm
/// 1. Collect every outline coordinate and label position
/// 2. Compute their bounding box
/// 3. Flag territories whose label position lies outside the view box
pub fn check_bounds(updates: &UpdateSet, view_box: ViewBox) -> BoundsReport {
    let mut points = Vec::new();
    let mut outside = Vec::new();

    for (id, patch) in updates {
        if let Some(label) = patch.label_position {
            points.push((label.x, label.y));

            let sides = view_box.outside_sides(label);
            if !sides.is_empty() {
                outside.push(OutsideLabel {
                    id: id.clone(),
                    position: label,
                    sides,
                });
            }
        }
        if let Some(outline) = &patch.outline {
            points.extend(path_coordinates(outline));
        }
    }

    BoundsReport {
        bounds: Bounds::from_points(&points),
        view_box,
        outside,
    }
}
