mod blocks;
mod edges;
mod generation;
mod graph;
mod placement;
mod visibility;
pub(crate) mod types;
pub use types::*;

pub use blocks::{UNKNOWN_BIRTH_RANK, birth_rank};
pub use generation::resolve_generations;
pub use graph::build_graph;
pub use visibility::{filter_dataset, hidden_descendants};

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::config::LayoutConfig;
use crate::ir::Dataset;
use crate::view::ViewState;

/// One full layout pass: a pure function from a record snapshot plus view
/// state to positioned nodes and edges.
///
/// Collapse works by input filtering. The graph is built once unfiltered just
/// to compute the hidden set, the records are reduced, and a second build
/// feeds normalization, block assembly and placement. Generations are placed
/// strictly top-down because a row's ordering weights read the positions of
/// the row above.
pub fn compute_layout(dataset: &Dataset, view: &ViewState, config: &LayoutConfig) -> Layout {
    let full = build_graph(dataset);
    let hidden = hidden_descendants(view, &full);
    let filtered = filter_dataset(dataset, &hidden);
    let node_by_id = build_graph(&filtered);
    let generations = resolve_generations(&node_by_id);

    // Rows keyed by resolved generation; members keep input record order.
    let mut rows: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for id in node_by_id.keys() {
        let g = generations.get(id).copied().unwrap_or(0);
        rows.entry(g).or_default().push(id.clone());
    }

    let mut positions: IndexMap<String, PositionedNode> = IndexMap::new();
    for (&g, member_ids) in &rows {
        if member_ids.is_empty() {
            continue;
        }
        let row_blocks = blocks::assemble_blocks(
            g,
            member_ids,
            &node_by_id,
            &generations,
            &positions,
            &view.anchored_couples,
        );
        placement::place_generation(g, row_blocks, &node_by_id, &mut positions, config);
    }

    let parent_edges = edges::parent_edges(&filtered, &node_by_id, &positions, view, config);
    let marriage_edges = edges::marriage_edges(&filtered, &positions, config);
    let guides = edges::generation_guides(&positions, config);
    let (width, height) = extents(&positions, config);

    Layout {
        node_by_id,
        positions,
        parent_edges,
        marriage_edges,
        guides,
        hidden,
        width,
        height,
    }
}

fn extents(positions: &IndexMap<String, PositionedNode>, config: &LayoutConfig) -> (f32, f32) {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for node in positions.values() {
        min_x = min_x.min(node.x - config.card_width / 2.0);
        min_y = min_y.min(node.y - config.card_height / 2.0);
        max_x = max_x.max(node.x + config.card_width / 2.0);
        max_y = max_y.max(node.y + config.card_height / 2.0);
    }
    let width = if min_x == f32::MAX {
        1.0
    } else {
        (max_x - min_x).max(1.0)
    };
    let height = if min_y == f32::MAX {
        1.0
    } else {
        (max_y - min_y).max(1.0)
    };
    (width, height)
}
