use indexmap::IndexMap;

use crate::ir::Dataset;

use super::{NodeMap, TreeNode};

/// Builds the id -> node index from flat records. Pure index construction:
/// no traversal happens here, so cyclic relationship data cannot loop.
///
/// A marriage or parent-child record is linked only when both referenced ids
/// exist in the people table; anything else is dropped without error.
pub fn build_graph(dataset: &Dataset) -> NodeMap {
    let mut nodes: NodeMap = IndexMap::with_capacity(dataset.people.len());
    for person in &dataset.people {
        nodes.insert(person.id.clone(), TreeNode::new(person.clone()));
    }

    for marriage in &dataset.marriages {
        if !nodes.contains_key(&marriage.partner_a) || !nodes.contains_key(&marriage.partner_b) {
            continue;
        }
        if let Some(a) = nodes.get_mut(&marriage.partner_a) {
            a.partners.push(marriage.partner_b.clone());
        }
        if let Some(b) = nodes.get_mut(&marriage.partner_b) {
            b.partners.push(marriage.partner_a.clone());
        }
    }

    for pc in &dataset.parent_child {
        if !nodes.contains_key(&pc.parent_id) || !nodes.contains_key(&pc.child_id) {
            continue;
        }
        if let Some(parent) = nodes.get_mut(&pc.parent_id) {
            parent.children.push(pc.child_id.clone());
        }
        if let Some(child) = nodes.get_mut(&pc.child_id) {
            child
                .parents
                .get_or_insert_with(Vec::new)
                .push(pc.parent_id.clone());
        }
    }

    nodes
}
