/// A geometric sub-field of a territory record that the patcher can rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Outline,
    Centroid,
    LabelPosition,
    TroopPosition,
    PointsPosition,
}

impl Field {
    /// Point-valued fields, in the order they are written
    pub const POINTS: [Field; 4] = [
        Field::Centroid,
        Field::LabelPosition,
        Field::TroopPosition,
        Field::PointsPosition,
    ];

    /// Key used for this field inside a territory record
    ///
    /// The outline wrapper key is configurable, so `Outline` reports the
    /// default name here.
    pub fn key(self) -> &'static str {
        match self {
            Field::Outline => "outline",
            Field::Centroid => "centroid",
            Field::LabelPosition => "labelPosition",
            Field::TroopPosition => "troopPosition",
            Field::PointsPosition => "pointsPosition",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
