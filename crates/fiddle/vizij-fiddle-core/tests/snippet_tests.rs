use vizij_fiddle::{parse_snippet_block, DocText};

#[test]
fn test_two_sections_in_order() {
    let snippets = parse_snippet_block("// snippet A\ncircle();\n// snippet B\nsquare();");
    assert_eq!(snippets.len(), 2);
    assert_eq!(snippets[0].name, "A");
    assert_eq!(snippets[0].source, DocText::from("circle();"));
    assert_eq!(snippets[1].name, "B");
    assert_eq!(snippets[1].source, DocText::from("square();"));
}

#[test]
fn test_list_length_matches_marker_count() {
    for count in 1..6 {
        let mut block = String::new();
        for i in 0..count {
            block.push_str(&format!("// snippet S{i}\nlet x = {i};\n"));
        }
        assert_eq!(parse_snippet_block(&block).len(), count);
    }
}

#[test]
fn test_indented_markers_are_recognized() {
    let snippets = parse_snippet_block("  // snippet Indented\n  body();");
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].name, "Indented");
    assert_eq!(snippets[0].source.as_str(), "  body();");
}

#[test]
fn test_preamble_before_first_marker_is_dropped() {
    let snippets = parse_snippet_block("import thing;\n// snippet Only\nbody();");
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].source.as_str(), "body();");
}

#[test]
fn test_empty_block_is_one_empty_snippet() {
    let snippets = parse_snippet_block("");
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].name, "Example");
    assert!(snippets[0].source.is_empty());
}

#[test]
fn test_marker_with_no_body_keeps_its_slot() {
    let snippets = parse_snippet_block("// snippet Empty\n// snippet Full\nbody();");
    assert_eq!(snippets.len(), 2);
    assert!(snippets[0].source.is_empty());
    assert_eq!(snippets[1].source.as_str(), "body();");
}

#[test]
fn test_fixture_blocks_parse() {
    let two = vizij_fiddle_fixtures::load_fiddle("two-sections").unwrap();
    let snippets = parse_snippet_block(&two);
    assert_eq!(snippets.len(), 2);
    assert_eq!(snippets[0].name, "Circle");
    assert_eq!(snippets[1].name, "Square");

    let single = vizij_fiddle_fixtures::load_fiddle("single").unwrap();
    assert_eq!(parse_snippet_block(&single).len(), 1);

    let many = vizij_fiddle_fixtures::load_fiddle("many-sections").unwrap();
    assert_eq!(parse_snippet_block(&many).len(), 3);
}
