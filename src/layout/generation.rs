use std::collections::{HashMap, HashSet};

use super::NodeMap;

/// Unifies generation numbers so that every marriage-connected component
/// shares one row: the minimum recorded generation among its members, with
/// absent generations defaulting to 0.
///
/// Marriage chains can be arbitrarily long (and cyclic in dirty data), so the
/// component walk uses an explicit stack rather than recursion. Running the
/// pass twice yields the same assignment.
pub fn resolve_generations(nodes: &NodeMap) -> HashMap<String, i64> {
    let mut gen_by_id: HashMap<String, i64> = nodes
        .iter()
        .map(|(id, node)| (id.clone(), node.person.generation.unwrap_or(0)))
        .collect();

    // Partners as an undirected graph.
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in nodes.values() {
        for partner in &node.partners {
            adj.entry(node.id()).or_default().push(partner);
            adj.entry(partner).or_default().push(node.id());
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for id in nodes.keys() {
        if seen.contains(id.as_str()) {
            continue;
        }
        seen.insert(id.as_str());
        let mut stack: Vec<&str> = vec![id.as_str()];
        let mut component: Vec<&str> = Vec::new();
        while let Some(current) = stack.pop() {
            component.push(current);
            if let Some(neighbors) = adj.get(current) {
                for &neighbor in neighbors {
                    if seen.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }
        let min_gen = component
            .iter()
            .map(|member| gen_by_id.get(*member).copied().unwrap_or(0))
            .min()
            .unwrap_or(0);
        for member in component {
            gen_by_id.insert(member.to_string(), min_gen);
        }
    }

    gen_by_id
}
