use regex::Regex;
use std::ops::Range;

use super::PatchError;
use super::format::{point_literal, quote_payload};
use crate::domain::{Field, GeometryPatch};

/// Result of rewriting the fields of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRewrite {
    pub text: String,
    pub written: Vec<Field>,
    pub missing: Vec<Field>,
}

/// Compiled patterns for the five geometric sub-fields
#[derive(Debug, Clone)]
pub struct FieldMatchers {
    outline: Regex,
    points: Vec<(Field, Regex)>,
}

impl FieldMatchers {
    /// # Arguments
    /// * `outline_key` - Name of the wrapper holding the `d:` path string
    pub fn new(outline_key: &str) -> Result<Self, PatchError> {
        let compile = |target: &str, pattern: String| {
            Regex::new(&pattern).map_err(|source| PatchError::Pattern {
                target: target.to_string(),
                source,
            })
        };

        // Group 1 holds a single-quoted payload, group 2 a double-quoted one
        let key = regex::escape(outline_key);
        let outline = compile(
            outline_key,
            format!(
                r#"\b{key}\s*:\s*\{{[^}}]*?\bd\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#
            ),
        )?;

        let points = Field::POINTS
            .into_iter()
            .map(|field| {
                let key = regex::escape(field.key());
                compile(field.key(), format!(r"\b{key}\s*:\s*\{{[^}}]*\}}"))
                    .map(|re| (field, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { outline, points })
    }

    /// Rewrite the requested fields of `block`
    ///
    /// Only the first occurrence of each field is touched. Requested fields
    /// whose marker is absent are listed in `missing` and otherwise ignored.
    pub fn rewrite(&self, block: &str, patch: &GeometryPatch) -> BlockRewrite {
        let mut text = block.to_string();
        let mut written = Vec::new();
        let mut missing = Vec::new();

        if let Some(outline) = &patch.outline {
            match self.outline_payload(&text) {
                Some((range, quote)) => {
                    text = splice(&text, range, &quote_payload(outline, quote));
                    written.push(Field::Outline);
                }
                None => missing.push(Field::Outline),
            }
        }

        for (field, re) in &self.points {
            let Some(point) = patch.point(*field) else {
                continue;
            };
            match re.find(&text).map(|m| m.range()) {
                Some(range) => {
                    text = splice(&text, range, &point_literal(field.key(), point));
                    written.push(*field);
                }
                None => missing.push(*field),
            }
        }

        BlockRewrite {
            text,
            written,
            missing,
        }
    }

    /// Byte range of the quoted outline payload and the quote it sits in
    fn outline_payload(&self, text: &str) -> Option<(Range<usize>, char)> {
        let caps = self.outline.captures(text)?;
        if let Some(single) = caps.get(1) {
            Some((single.range(), '\''))
        } else {
            caps.get(2).map(|double| (double.range(), '"'))
        }
    }
}

fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}
