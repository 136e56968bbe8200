use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::config::LayoutConfig;

use super::{Block, NodeMap, PositionedNode};

/// Orders one generation's blocks and assigns coordinates.
///
/// Blocks are clustered by parents key; clusters go left-to-right by the mean
/// x of their parents so children land roughly under them. Within a cluster,
/// birth rank decides, then the "last first" name as a deterministic
/// tie-break. Placement walks a cursor left to right and finally re-centers
/// the row around zero; rows are centered independently, so cross-generation
/// alignment stays approximate by design of the weight heuristic.
pub(super) fn place_generation(
    generation: i64,
    blocks: Vec<Block>,
    nodes: &NodeMap,
    positions: &mut IndexMap<String, PositionedNode>,
    config: &LayoutConfig,
) {
    let y = generation as f32 * config.level_gap;

    // Cluster by parents key, first appearance order.
    let mut groups: IndexMap<String, Vec<Block>> = IndexMap::new();
    for block in blocks {
        groups
            .entry(block.parents_key.clone())
            .or_default()
            .push(block);
    }

    // Clusters by ascending mean parent x; stable, so ties keep input order.
    let mut ordered_groups: Vec<(f32, Vec<Block>)> = groups
        .into_values()
        .map(|group| {
            let mean = group.iter().map(|b| b.weight).sum::<f32>() / group.len() as f32;
            (mean, group)
        })
        .collect();
    ordered_groups.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let sort_name = |block: &Block| {
        block
            .ids
            .first()
            .and_then(|id| nodes.get(id))
            .map(|node| node.person.sort_name())
            .unwrap_or_default()
    };

    let mut ordered_blocks: Vec<Block> = Vec::new();
    for (_, mut group) in ordered_groups {
        group.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| sort_name(a).cmp(&sort_name(b)))
        });
        ordered_blocks.append(&mut group);
    }

    // Cursor placement with variable block widths.
    let mut placed: Vec<String> = Vec::new();
    let mut x_cursor = 0.0_f32;
    for block in &ordered_blocks {
        let block_width = if block.ids.len() == 2 {
            config.partner_gap + config.card_width
        } else {
            config.card_width
        };
        let center = x_cursor + block_width / 2.0;
        if let [anchor, mate] = block.ids.as_slice() {
            positions.insert(
                anchor.clone(),
                PositionedNode {
                    id: anchor.clone(),
                    x: center - config.partner_gap / 2.0,
                    y,
                    depth: generation,
                },
            );
            positions.insert(
                mate.clone(),
                PositionedNode {
                    id: mate.clone(),
                    x: center + config.partner_gap / 2.0,
                    y,
                    depth: generation,
                },
            );
            placed.push(anchor.clone());
            placed.push(mate.clone());
        } else if let Some(id) = block.ids.first() {
            positions.insert(
                id.clone(),
                PositionedNode {
                    id: id.clone(),
                    x: center,
                    y,
                    depth: generation,
                },
            );
            placed.push(id.clone());
        }
        x_cursor += block_width + config.block_margin;
    }

    // Re-center the row around zero. Only members placed this pass move; a
    // collapsed-away partner has no position and contributes nothing.
    let xs: Vec<f32> = placed
        .iter()
        .filter_map(|id| positions.get(id).map(|p| p.x))
        .collect();
    let Some(min) = xs.iter().copied().reduce(f32::min) else {
        return;
    };
    let max = xs.iter().copied().fold(min, f32::max);
    let mid = (min + max) / 2.0;
    for id in &placed {
        if let Some(position) = positions.get_mut(id) {
            position.x -= mid;
        }
    }
}
