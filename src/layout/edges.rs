use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::LayoutConfig;
use crate::ir::Dataset;
use crate::view::{ViewState, couple_key};

use super::{GenerationGuide, MarriageEdge, NodeMap, ParentEdge, PositionedNode};

/// A child whose first two recorded parents form a collapsed couple gets no
/// edges at all; it has no position this pass.
fn is_child_of_collapsed_couple(child_id: &str, nodes: &NodeMap, view: &ViewState) -> bool {
    let Some(parents) = nodes.get(child_id).map(|node| node.parent_ids()) else {
        return false;
    };
    let [p1, p2, ..] = parents else {
        return false;
    };
    view.collapsed_couples.contains(&couple_key(p1, p2))
}

/// Parent -> child connectors. A child with two or more recorded parents
/// whose first two are married to each other gets a single edge dropped from
/// the midpoint between them; every other parent-child record contributes one
/// direct edge. Endpoints without a position are skipped silently.
pub(super) fn parent_edges(
    dataset: &Dataset,
    nodes: &NodeMap,
    positions: &IndexMap<String, PositionedNode>,
    view: &ViewState,
    config: &LayoutConfig,
) -> Vec<ParentEdge> {
    let married_pairs: HashSet<String> = dataset
        .marriages
        .iter()
        .map(|m| couple_key(&m.partner_a, &m.partner_b))
        .collect();

    let mut child_to_parents: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for pc in &dataset.parent_child {
        let parents = child_to_parents.entry(pc.child_id.as_str()).or_default();
        if !parents.contains(&pc.parent_id.as_str()) {
            parents.push(&pc.parent_id);
        }
    }

    let half_card = config.card_height / 2.0;
    let mut edges: Vec<ParentEdge> = Vec::new();
    let mut handled: HashSet<&str> = HashSet::new();

    for (child_id, parents) in &child_to_parents {
        if is_child_of_collapsed_couple(child_id, nodes, view) {
            handled.insert(child_id);
            continue;
        }
        let [p1, p2, ..] = parents.as_slice() else {
            continue;
        };
        if !married_pairs.contains(&couple_key(p1, p2)) {
            continue;
        }
        let (a, b) = if p1 < p2 { (*p1, *p2) } else { (*p2, *p1) };
        let (Some(pa), Some(pb), Some(child)) =
            (positions.get(a), positions.get(b), positions.get(*child_id))
        else {
            continue;
        };
        edges.push(ParentEdge {
            key: format!("{a}-{b}-{child_id}"),
            x1: (pa.x + pb.x) / 2.0,
            y1: pa.y.max(pb.y) + half_card,
            x2: child.x,
            y2: child.y - half_card,
        });
        handled.insert(child_id);
    }

    for pc in &dataset.parent_child {
        if handled.contains(pc.child_id.as_str()) {
            continue;
        }
        if is_child_of_collapsed_couple(&pc.child_id, nodes, view) {
            continue;
        }
        let (Some(parent), Some(child)) =
            (positions.get(&pc.parent_id), positions.get(&pc.child_id))
        else {
            continue;
        };
        edges.push(ParentEdge {
            key: pc.id.clone(),
            x1: parent.x,
            y1: parent.y + half_card,
            x2: child.x,
            y2: child.y - half_card,
        });
    }

    edges
}

/// One horizontal connector per marriage whose partners are both positioned,
/// spanning the gap between the two cards at the shared row.
pub(super) fn marriage_edges(
    dataset: &Dataset,
    positions: &IndexMap<String, PositionedNode>,
    config: &LayoutConfig,
) -> Vec<MarriageEdge> {
    let half_card = config.card_width / 2.0;
    dataset
        .marriages
        .iter()
        .filter_map(|m| {
            let a = positions.get(&m.partner_a)?;
            let b = positions.get(&m.partner_b)?;
            Some(MarriageEdge {
                id: m.id.clone(),
                x1: a.x + half_card,
                x2: b.x - half_card,
                y: a.y,
            })
        })
        .collect()
}

/// One guide line per generation present among the positioned nodes, spanning
/// the drawing's x extent plus a margin.
pub(super) fn generation_guides(
    positions: &IndexMap<String, PositionedNode>,
    config: &LayoutConfig,
) -> Vec<GenerationGuide> {
    if positions.is_empty() {
        return Vec::new();
    }
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    for node in positions.values() {
        min_x = min_x.min(node.x);
        max_x = max_x.max(node.x);
    }
    let mut depths: Vec<i64> = positions.values().map(|node| node.depth).collect();
    depths.sort_unstable();
    depths.dedup();
    depths
        .into_iter()
        .map(|generation| GenerationGuide {
            generation,
            y: generation as f32 * config.level_gap,
            x1: min_x - config.guide_margin,
            x2: max_x + config.guide_margin,
        })
        .collect()
}
