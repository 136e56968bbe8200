use crate::layout::{NodeMap, TreeNode};

/// Case-insensitive substring match over "preferred-or-first last". An empty
/// or whitespace query matches nobody. Results come back in input record
/// order, ready for the UI to cycle through and center on.
pub fn search_nodes<'a>(nodes: &'a NodeMap, query: &str) -> Vec<&'a TreeNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    nodes
        .values()
        .filter(|node| node.person.display_name().to_lowercase().contains(&needle))
        .collect()
}
