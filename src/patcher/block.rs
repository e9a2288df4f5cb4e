use regex::Regex;
use std::ops::Range;

use super::PatchError;

/// The byte span of one territory record in a document
///
/// Runs from the start of the `<indent><id>: {` line to the end of its
/// closing `<indent>},` line, excluding the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub span: Range<usize>,
    pub indent: String,
}

/// Build the start-marker pattern for a territory identifier
///
/// The identifier is always escaped, and may appear bare or quoted.
fn start_marker(id: &str) -> Result<Regex, PatchError> {
    let id_pattern = regex::escape(id);
    Regex::new(&format!(
        r#"(?m)^([ \t]*)(?:{id_pattern}|'{id_pattern}'|"{id_pattern}")[ \t]*:[ \t]*\{{"#
    ))
    .map_err(|source| PatchError::Pattern {
        target: id.to_string(),
        source,
    })
}

/// Pattern for any record key opening an object, anchored at the key
fn sibling_marker() -> Result<Regex, PatchError> {
    Regex::new(r#"^(?:[A-Za-z_$][A-Za-z0-9_$]*|'[^']*'|"[^"]*")[ \t]*:[ \t]*\{"#).map_err(
        |source| PatchError::Pattern {
            target: "record key".to_string(),
            source,
        },
    )
}

/// True when `line` is `<indent>}` optionally followed by `,` and a comment
fn is_closing_line(line: &str, indent: &str) -> bool {
    let Some(rest) = line.strip_prefix(indent) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix('}') else {
        return false;
    };
    let rest = rest.strip_prefix(',').unwrap_or(rest).trim();
    rest.is_empty() || rest.starts_with("//")
}

/// True when the text after an opening `{` closes the record on the same line
///
/// The line must end in `}` or `},` and hold more closing than opening braces,
/// so `a: { centroid: { x: 1 },` still continues on the next line.
fn closes_on_start_line(rest: &str) -> bool {
    let trimmed = rest.trim_end();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if !trimmed.ends_with('}') {
        return false;
    }
    let opens = rest.matches('{').count();
    let closes = rest.matches('}').count();
    closes > opens
}

/// True when `line` opens another record at exactly `indent`
fn opens_sibling(line: &str, indent: &str, sibling: &Regex) -> bool {
    let Some(rest) = line.strip_prefix(indent) else {
        return false;
    };
    !rest.starts_with([' ', '\t']) && sibling.is_match(rest)
}

/// Locate the block for `id`
///
/// Returns `Ok(None)` when the identifier does not occur. Only markers at the
/// shallowest indentation count as blocks; deeper matches are nested keys of
/// other records. A block either closes on its own start line or at the first
/// later line holding a closing brace at exactly the opening indentation;
/// braces inside values are never counted across lines. Reaching the next
/// record at the same indentation first is an `UnterminatedBlock`.
pub fn locate_block(document: &str, id: &str) -> Result<Option<Block>, PatchError> {
    let marker = start_marker(id)?;
    let candidates: Vec<(usize, usize, &str)> = marker
        .captures_iter(document)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let indent = caps.get(1)?;
            Some((whole.start(), whole.end(), indent.as_str()))
        })
        .collect();

    let Some(top_level) = candidates.iter().map(|(_, _, indent)| indent.len()).min() else {
        return Ok(None);
    };
    let mut top = candidates
        .into_iter()
        .filter(|(_, _, indent)| indent.len() == top_level);

    let Some((start, marker_end, indent)) = top.next() else {
        return Ok(None);
    };
    let indent = indent.to_string();

    if let Some((second, _, _)) = top.next() {
        return Err(PatchError::DuplicateBlock {
            id: id.to_string(),
            first: start,
            second,
        });
    }

    let unterminated = || PatchError::UnterminatedBlock {
        id: id.to_string(),
        start,
        indent: indent.len(),
    };

    let rest_of_line = &document[marker_end..];
    let line_len = rest_of_line.find('\n').unwrap_or(rest_of_line.len());
    let start_rest = rest_of_line[..line_len].trim_end_matches('\r');
    if closes_on_start_line(start_rest) {
        return Ok(Some(Block {
            span: start..marker_end + start_rest.len(),
            indent,
        }));
    }
    if line_len == rest_of_line.len() {
        return Err(unterminated());
    }

    let sibling = sibling_marker()?;
    let mut offset = marker_end + line_len + 1;

    for line in document[offset..].split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if is_closing_line(content, &indent) {
            return Ok(Some(Block {
                span: start..offset + content.len(),
                indent,
            }));
        }
        if opens_sibling(content, &indent, &sibling) {
            return Err(unterminated());
        }
        offset += line.len();
    }

    Err(unterminated())
}
