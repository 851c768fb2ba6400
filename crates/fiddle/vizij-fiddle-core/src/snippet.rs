//! Snippet store: named example documents derived from one raw source block.
//!
//! A fiddle's source prop can hold several independently selectable examples,
//! separated by marker lines. Parsing is forgiving: a block without markers is
//! one snippet, and a marker without a name still opens a section.

use crate::document::DocText;

/// Marker opening a named section inside a source block.
pub const SNIPPET_MARKER: &str = "// snippet";

/// A named, independently selectable example document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub name: String,
    pub source: DocText,
}

impl Snippet {
    /// Create a new snippet
    pub fn new(name: impl Into<String>, source: impl Into<DocText>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Split a raw source block into its named sections.
///
/// Always yields at least one snippet: a block with no markers becomes a
/// single snippet named `Example`. With markers present, the list length
/// equals the number of marker lines, in order; lines before the first marker
/// are treated as preamble and dropped. Unnamed markers fall back to
/// `Snippet N`.
pub fn parse_snippet_block(block: &str) -> Vec<Snippet> {
    let mut sections: Vec<(String, Vec<&str>)> = Vec::new();
    let mut preamble: Vec<&str> = Vec::new();

    for line in block.lines() {
        if let Some(name) = marker_name(line) {
            sections.push((name, Vec::new()));
        } else if let Some((_, lines)) = sections.last_mut() {
            lines.push(line);
        } else {
            preamble.push(line);
        }
    }

    if sections.is_empty() {
        return vec![Snippet::new("Example", join_trimmed(&preamble))];
    }

    sections
        .into_iter()
        .enumerate()
        .map(|(index, (name, lines))| {
            let name = if name.is_empty() {
                format!("Snippet {}", index + 1)
            } else {
                name
            };
            Snippet::new(name, join_trimmed(&lines))
        })
        .collect()
}

/// Extract the section name if this line is a marker.
fn marker_name(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(SNIPPET_MARKER)?;
    if rest.is_empty() {
        return Some(String::new());
    }
    // Reject things like `// snippets` that merely share the prefix.
    if rest.starts_with(|c: char| c.is_whitespace()) {
        Some(rest.trim().to_string())
    } else {
        None
    }
}

/// Join section lines, dropping blank lines at both edges.
fn join_trimmed(lines: &[&str]) -> String {
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_without_markers_is_one_snippet() {
        let snippets = parse_snippet_block("const a = 1;\nconst b = 2;");
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].name, "Example");
        assert_eq!(snippets[0].source.as_str(), "const a = 1;\nconst b = 2;");
    }

    #[test]
    fn marker_prefix_must_be_a_whole_word() {
        let snippets = parse_snippet_block("// snippets are great\ncode();");
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].name, "Example");
    }

    #[test]
    fn unnamed_marker_gets_positional_name() {
        let snippets = parse_snippet_block("// snippet\nfirst();\n// snippet Named\nsecond();");
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].name, "Snippet 1");
        assert_eq!(snippets[1].name, "Named");
    }

    #[test]
    fn blank_edges_are_trimmed_but_interior_kept() {
        let snippets = parse_snippet_block("// snippet A\n\nfirst();\n\nsecond();\n\n");
        assert_eq!(snippets[0].source.as_str(), "first();\n\nsecond();");
    }
}
