//! Field-level merge of territory geometry into a territory data document
//!
//! The document is a JavaScript-like object literal with one block per
//! territory:
//!
//! ```text
//!   detroit: {
//!     outline: { d: 'M0 0 L1 1 Z' },
//!     centroid: { x: 1.00, y: 1.00 },
//!     ...
//!   },
//! ```
//!
//! Each block is located structurally (start marker, then the first closing
//! line at the same indentation), its geometric fields are rewritten on the
//! block substring, and the block is spliced back. Everything outside the
//! rewritten values is preserved byte for byte.

pub mod block;
pub mod error;
pub mod fields;
pub mod format;

pub use block::{Block, locate_block};
pub use error::PatchError;
pub use fields::{BlockRewrite, FieldMatchers};
pub use format::format_coordinate;

use crate::domain::{Field, PatchReport, PatchStatus, UpdateSet};

pub const DEFAULT_OUTLINE_KEY: &str = "outline";

#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Wrapper key holding the `d:` path string (`polygon` in older files)
    pub outline_key: String,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            outline_key: DEFAULT_OUTLINE_KEY.to_string(),
        }
    }
}

impl PatchOptions {
    pub fn with_outline_key(mut self, key: impl Into<String>) -> Self {
        self.outline_key = key.into();
        self
    }

    /// Key searched for `field` in a territory record
    pub fn field_key(&self, field: Field) -> &str {
        match field {
            Field::Outline => &self.outline_key,
            other => other.key(),
        }
    }
}

/// Patched document text plus the per-territory report
#[derive(Debug, Clone)]
pub struct Patched {
    pub document: String,
    pub report: PatchReport,
}

impl Patched {
    /// True when the document differs from the input it was produced from
    pub fn has_changes(&self) -> bool {
        self.report.changed_count() > 0
    }
}

#[derive(Debug, Clone)]
pub struct Patcher {
    matchers: FieldMatchers,
}

impl Patcher {
    pub fn new(options: &PatchOptions) -> Result<Self, PatchError> {
        Ok(Self {
            matchers: FieldMatchers::new(&options.outline_key)?,
        })
    }

    /// Apply every patch in `updates` to `document`
    ///
    /// # Algorithm
    /// For each territory, in identifier order:
    /// 1. Locate its block; record `NotFound` and move on if absent
    /// 2. Rewrite the requested fields on the block text
    /// 3. Splice the block back over its original span
    ///
    /// Blocks never overlap, so the order of territories does not affect the
    /// result. Applying the same updates twice yields the same document.
    pub fn patch(&self, document: &str, updates: &UpdateSet) -> Result<Patched, PatchError> {
        let mut output = document.to_string();
        let mut report = PatchReport::default();

        for (id, patch) in updates {
            let Some(block) = locate_block(&output, id)? else {
                log::info!("territory {id} not found in document");
                report.push(id, PatchStatus::NotFound);
                continue;
            };

            let rewrite = self.matchers.rewrite(&output[block.span.clone()], patch);
            let changed = rewrite.text != output[block.span.clone()];

            log::debug!(
                "territory {id}: block {:?}, wrote {:?}, changed: {changed}",
                block.span,
                rewrite.written
            );
            if !rewrite.missing.is_empty() {
                log::info!("territory {id}: no marker for {:?}", rewrite.missing);
            }

            if changed {
                output.replace_range(block.span, &rewrite.text);
            }

            report.push(
                id,
                PatchStatus::Updated {
                    written: rewrite.written,
                    missing: rewrite.missing,
                    changed,
                },
            );
        }

        Ok(Patched {
            document: output,
            report,
        })
    }
}

/// Patch `document` with the default options
pub fn patch(document: &str, updates: &UpdateSet) -> Result<Patched, PatchError> {
    Patcher::new(&PatchOptions::default())?.patch(document, updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeometryPatch, Point};

    const DOC: &str = "/** Territory definitions */
const territories = {
  // Great Lakes
  detroit: {
    id: 'detroit',
    name: 'Detroit',
    outline: {
      d: 'M0 0 L10 0 L10 10 Z',
    },
    centroid: { x: 5.00, y: 5.00 },
    labelPosition: { x: 5.00, y: 4.00 },
    troopPosition: { x: 5.00, y: 6.00 },
    pointsPosition: { x: 8.00, y: 8.00 },
  },
  niagara: {
    id: 'niagara',
    outline: { d: 'M20 20 L30 20 Z' },
    centroid: { x: 25.00, y: 20.00 },
    labelPosition: { x: 25.00, y: 19.00 },
    troopPosition: { x: 25.00, y: 21.00 },
    pointsPosition: { x: 28.00, y: 22.00 },
  },
};

export default territories;
";

    fn full_patch() -> GeometryPatch {
        GeometryPatch::default()
            .with_outline("M1 1 L9 1 L9 9 Z")
            .with_point(Field::Centroid, Point::new(4.5, 4.25))
            .with_point(Field::LabelPosition, Point::new(4.0, 3.0))
            .with_point(Field::TroopPosition, Point::new(4.0, 5.0))
            .with_point(Field::PointsPosition, Point::new(7.125, 7.0))
    }

    fn block_text<'a>(doc: &'a str, id: &str) -> &'a str {
        let block = locate_block(doc, id).unwrap().unwrap();
        &doc[block.span]
    }

    #[test]
    fn test_end_to_end_scenario() {
        let doc = "  quebec: {\n    outline: { d: 'M0 0' },\n    centroid: { x: 1.00, y: 1.00 },\n  },";
        let mut updates = UpdateSet::new();
        updates.insert(
            "quebec".to_string(),
            GeometryPatch::default()
                .with_outline("M1 1 L2 2")
                .with_point(Field::Centroid, Point::new(5.5, 6.25)),
        );

        let patched = patch(doc, &updates).unwrap();

        assert_eq!(
            patched.document,
            "  quebec: {\n    outline: { d: 'M1 1 L2 2' },\n    centroid: { x: 5.50, y: 6.25 },\n  },"
        );
        assert_eq!(
            patched.report.get("quebec"),
            Some(&PatchStatus::Updated {
                written: vec![Field::Outline, Field::Centroid],
                missing: vec![],
                changed: true,
            })
        );
    }

    #[test]
    fn test_idempotent() {
        let mut updates = UpdateSet::new();
        updates.insert("detroit".to_string(), full_patch());
        updates.insert(
            "niagara".to_string(),
            GeometryPatch::default().with_point(Field::Centroid, Point::new(-1.0, 2.005)),
        );

        let once = patch(DOC, &updates).unwrap();
        let twice = patch(&once.document, &updates).unwrap();

        assert_eq!(once.document, twice.document);
        assert!(once.has_changes());
        assert!(!twice.has_changes());
        assert_eq!(twice.report.updated_count(), 2);
    }

    #[test]
    fn test_locality() {
        let mut updates = UpdateSet::new();
        updates.insert("detroit".to_string(), full_patch());

        let patched = patch(DOC, &updates).unwrap();

        assert_eq!(
            block_text(&patched.document, "niagara"),
            block_text(DOC, "niagara")
        );
        assert!(patched.document.starts_with("/** Territory definitions */\n"));
        assert!(patched.document.ends_with("};\n\nexport default territories;\n"));
        assert!(patched.document.contains("  // Great Lakes\n"));
    }

    #[test]
    fn test_field_isolation() {
        let mut updates = UpdateSet::new();
        updates.insert(
            "detroit".to_string(),
            GeometryPatch::default().with_point(Field::Centroid, Point::new(3.0, -2.005)),
        );

        let patched = patch(DOC, &updates).unwrap();
        let expected = DOC.replace(
            "centroid: { x: 5.00, y: 5.00 }",
            "centroid: { x: 3.00, y: -2.00 }",
        );

        assert_eq!(patched.document, expected);
    }

    #[test]
    fn test_not_found_leaves_document_unchanged() {
        let mut updates = UpdateSet::new();
        updates.insert("atlantis".to_string(), full_patch());

        let patched = patch(DOC, &updates).unwrap();

        assert_eq!(patched.document, DOC);
        assert_eq!(patched.report.get("atlantis"), Some(&PatchStatus::NotFound));
        assert_eq!(patched.report.not_found(), vec!["atlantis"]);
        assert!(!patched.has_changes());
    }

    #[test]
    fn test_single_line_outline_rewritten() {
        let mut updates = UpdateSet::new();
        updates.insert(
            "niagara".to_string(),
            GeometryPatch::default().with_outline("M0 0 Z"),
        );

        let patched = patch(DOC, &updates).unwrap();

        assert!(patched.document.contains("    outline: { d: 'M0 0 Z' },\n"));
        assert!(patched.document.contains("d: 'M0 0 L10 0 L10 10 Z'"));
    }

    #[test]
    fn test_legacy_polygon_key() {
        let doc = "  detroit: {\n    polygon: {\n      d: 'M0 0',\n    },\n  },\n";
        let mut updates = UpdateSet::new();
        updates.insert(
            "detroit".to_string(),
            GeometryPatch::default().with_outline("M3 3"),
        );

        let patcher = Patcher::new(&PatchOptions::default().with_outline_key("polygon")).unwrap();
        let patched = patcher.patch(doc, &updates).unwrap();

        assert_eq!(
            patched.document,
            "  detroit: {\n    polygon: {\n      d: 'M3 3',\n    },\n  },\n"
        );
    }

    #[test]
    fn test_structural_error_surfaces() {
        let doc = "  detroit: {\n    centroid: { x: 1, y: 1 },\n";
        let mut updates = UpdateSet::new();
        updates.insert("detroit".to_string(), full_patch());

        let err = patch(doc, &updates).unwrap_err();
        assert!(matches!(err, PatchError::UnterminatedBlock { .. }));
    }

    #[test]
    fn test_one_line_block_does_not_reach_next_territory() {
        let doc = "  a: { id: 'a' },\n  b: {\n    centroid: { x: 2.00, y: 2.00 },\n  },\n";
        let mut updates = UpdateSet::new();
        updates.insert(
            "a".to_string(),
            GeometryPatch::default().with_point(Field::Centroid, Point::new(9.0, 9.0)),
        );

        let patched = patch(doc, &updates).unwrap();

        assert_eq!(patched.document, doc);
        assert_eq!(
            patched.report.get("a"),
            Some(&PatchStatus::Updated {
                written: vec![],
                missing: vec![Field::Centroid],
                changed: false,
            })
        );
    }

    #[test]
    fn test_one_line_block_rewritten_in_place() {
        let doc = "  a: { centroid: { x: 1.00, y: 1.00 } },\n  b: {\n    centroid: { x: 2.00, y: 2.00 },\n  },\n";
        let mut updates = UpdateSet::new();
        updates.insert(
            "a".to_string(),
            GeometryPatch::default().with_point(Field::Centroid, Point::new(9.0, 9.0)),
        );

        let patched = patch(doc, &updates).unwrap();

        assert_eq!(
            patched.document,
            "  a: { centroid: { x: 9.00, y: 9.00 } },\n  b: {\n    centroid: { x: 2.00, y: 2.00 },\n  },\n"
        );
    }

    #[test]
    fn test_nested_key_named_like_territory() {
        let doc = "  detroit: {\n    centroid: { x: 1.00, y: 1.00 },\n  },\n  niagara: {\n    bonus: {\n      detroit: { troops: 2 },\n    },\n  },\n";
        let mut updates = UpdateSet::new();
        updates.insert(
            "detroit".to_string(),
            GeometryPatch::default().with_point(Field::Centroid, Point::new(3.0, 4.0)),
        );

        let patched = patch(doc, &updates).unwrap();

        assert_eq!(
            patched.document,
            doc.replace("x: 1.00, y: 1.00", "x: 3.00, y: 4.00")
        );
        assert!(patched.document.contains("      detroit: { troops: 2 },\n"));
    }

    #[test]
    fn test_field_key_follows_outline_key() {
        let options = PatchOptions::default().with_outline_key("polygon");
        assert_eq!(options.field_key(Field::Outline), "polygon");
        assert_eq!(options.field_key(Field::Centroid), "centroid");
        assert_eq!(PatchOptions::default().field_key(Field::Outline), "outline");
    }
}
