use forge_types::normalize_tags;

#[test]
fn lowercases_and_trims() {
    assert_eq!(normalize_tags(&["  Rust ", "CLI"]), vec!["rust", "cli"]);
}

#[test]
fn drops_empty_tags() {
    assert_eq!(normalize_tags(&["", "   ", "python"]), vec!["python"]);
}

#[test]
fn collapses_case_insensitive_duplicates() {
    assert_eq!(
        normalize_tags(&["Python", "cli", "PYTHON", "python "]),
        vec!["python", "cli"]
    );
}

#[test]
fn keeps_first_occurrence_order() {
    assert_eq!(normalize_tags(&["b", "a", "b", "c"]), vec!["b", "a", "c"]);
}

#[test]
fn empty_input() {
    let tags: [&str; 0] = [];
    assert!(normalize_tags(&tags).is_empty());
}
