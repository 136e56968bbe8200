use std::collections::HashSet;

use crate::ir::Dataset;
use crate::view::ViewState;

use super::NodeMap;

/// Marks a person and their whole descendant closure hidden: children,
/// recursively, plus every partner encountered and that partner's closure.
/// Work-stack traversal with the hidden set doubling as the visited marker,
/// so cyclic relationship data terminates.
fn add_subtree(start: &str, nodes: &NodeMap, hidden: &mut HashSet<String>) {
    let mut stack = vec![start.to_string()];
    while let Some(current) = stack.pop() {
        if !hidden.insert(current.clone()) {
            continue;
        }
        if let Some(node) = nodes.get(&current) {
            stack.extend(node.children.iter().cloned());
            stack.extend(node.partners.iter().cloned());
        }
    }
}

/// The set of ids hidden by the current collapse state, computed on the
/// unfiltered graph. A collapsed couple hides the union of both partners'
/// children and everything below them; a collapsed single hides their own
/// children the same way. The collapse anchors themselves stay visible.
pub fn hidden_descendants(view: &ViewState, nodes: &NodeMap) -> HashSet<String> {
    let mut hidden: HashSet<String> = HashSet::new();

    for key in &view.collapsed_couples {
        let Some((a, b)) = key.split_once('|') else {
            continue;
        };
        let mut children: Vec<&str> = Vec::new();
        for id in [a, b] {
            if let Some(node) = nodes.get(id) {
                for child in &node.children {
                    if !children.contains(&child.as_str()) {
                        children.push(child);
                    }
                }
            }
        }
        for child in children {
            add_subtree(child, nodes, &mut hidden);
        }
    }

    for single_id in &view.collapsed_singles {
        if let Some(node) = nodes.get(single_id) {
            for child in &node.children {
                add_subtree(child, nodes, &mut hidden);
            }
        }
    }

    hidden
}

/// Drops hidden people and every record touching them. The reduced snapshot
/// feeds a second, independent graph build; the full graph is never pruned in
/// place.
pub fn filter_dataset(dataset: &Dataset, hidden: &HashSet<String>) -> Dataset {
    let kept: HashSet<&str> = dataset
        .people
        .iter()
        .filter(|p| !hidden.contains(&p.id))
        .map(|p| p.id.as_str())
        .collect();
    Dataset {
        people: dataset
            .people
            .iter()
            .filter(|p| kept.contains(p.id.as_str()))
            .cloned()
            .collect(),
        marriages: dataset
            .marriages
            .iter()
            .filter(|m| kept.contains(m.partner_a.as_str()) && kept.contains(m.partner_b.as_str()))
            .cloned()
            .collect(),
        parent_child: dataset
            .parent_child
            .iter()
            .filter(|pc| kept.contains(pc.parent_id.as_str()) && kept.contains(pc.child_id.as_str()))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Marriage, ParentChild, Person};
    use crate::layout::build_graph;
    use crate::view::couple_key;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            ..Person::default()
        }
    }

    fn marriage(id: &str, a: &str, b: &str) -> Marriage {
        Marriage {
            id: id.to_string(),
            partner_a: a.to_string(),
            partner_b: b.to_string(),
        }
    }

    fn parent_child(id: &str, parent: &str, child: &str) -> ParentChild {
        ParentChild {
            id: id.to_string(),
            parent_id: parent.to_string(),
            child_id: child.to_string(),
        }
    }

    /// Couple (a,b), child c married to d, grandchild e.
    fn family() -> Dataset {
        Dataset {
            people: vec![person("a"), person("b"), person("c"), person("d"), person("e")],
            marriages: vec![marriage("m1", "a", "b"), marriage("m2", "c", "d")],
            parent_child: vec![
                parent_child("pc1", "a", "c"),
                parent_child("pc2", "b", "c"),
                parent_child("pc3", "c", "e"),
                parent_child("pc4", "d", "e"),
            ],
        }
    }

    #[test]
    fn collapsing_a_couple_hides_the_descendant_closure() {
        let dataset = family();
        let nodes = build_graph(&dataset);
        let mut view = ViewState::default();
        view.collapsed_couples.insert(couple_key("a", "b"));
        let hidden = hidden_descendants(&view, &nodes);
        assert_eq!(
            hidden,
            ["c", "d", "e"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn collapsing_a_single_hides_their_children_only_downward() {
        let dataset = Dataset {
            people: vec![person("s"), person("c"), person("g")],
            marriages: vec![],
            parent_child: vec![parent_child("pc1", "s", "c"), parent_child("pc2", "c", "g")],
        };
        let nodes = build_graph(&dataset);
        let mut view = ViewState::default();
        view.collapsed_singles.insert("s".to_string());
        let hidden = hidden_descendants(&view, &nodes);
        assert!(hidden.contains("c"));
        assert!(hidden.contains("g"));
        assert!(!hidden.contains("s"));
    }

    #[test]
    fn cyclic_records_terminate() {
        // a is recorded as parent of b and b as parent of a.
        let dataset = Dataset {
            people: vec![person("a"), person("b")],
            marriages: vec![],
            parent_child: vec![parent_child("pc1", "a", "b"), parent_child("pc2", "b", "a")],
        };
        let nodes = build_graph(&dataset);
        let mut view = ViewState::default();
        view.collapsed_singles.insert("a".to_string());
        let hidden = hidden_descendants(&view, &nodes);
        // The cycle pulls a itself into the closure; the point is termination.
        assert!(hidden.contains("b"));
    }

    #[test]
    fn filter_drops_records_touching_hidden_ids() {
        let dataset = family();
        let hidden: HashSet<String> = ["c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let filtered = filter_dataset(&dataset, &hidden);
        assert_eq!(filtered.people.len(), 2);
        assert_eq!(filtered.marriages.len(), 1);
        assert!(filtered.parent_child.is_empty());
    }

    #[test]
    fn empty_view_hides_nothing() {
        let dataset = family();
        let nodes = build_graph(&dataset);
        let hidden = hidden_descendants(&ViewState::default(), &nodes);
        assert!(hidden.is_empty());
        let filtered = filter_dataset(&dataset, &hidden);
        assert_eq!(filtered.people.len(), dataset.people.len());
    }
}
