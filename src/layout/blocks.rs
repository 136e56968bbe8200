use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{Gender, Person};
use crate::view::couple_key;

use super::{Block, NodeMap, PositionedNode};

/// Sort rank for a birth date no parse can reach: unknown dates go last.
pub const UNKNOWN_BIRTH_RANK: i64 = i64::MAX;

static LEADING_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+").unwrap());

/// Leading integer of a free-text birth date ("1952-03-01" -> 1952), or the
/// unknown sentinel when nothing numeric leads the string.
pub fn birth_rank(person: &Person) -> i64 {
    let Some(raw) = person.birth_date.as_deref() else {
        return UNKNOWN_BIRTH_RANK;
    };
    let Some(m) = LEADING_INT_RE.find(raw.trim_start()) else {
        return UNKNOWN_BIRTH_RANK;
    };
    m.as_str().parse().unwrap_or(UNKNOWN_BIRTH_RANK)
}

fn node_birth_rank(id: &str, nodes: &NodeMap) -> i64 {
    nodes
        .get(id)
        .map(|node| birth_rank(&node.person))
        .unwrap_or(UNKNOWN_BIRTH_RANK)
}

/// Mean x of the members' distinct parents that already have a position
/// (parents live in shallower generations, placed earlier). 0 when no parent
/// is placed, which leaves the sibling group order to input order.
fn parent_average_x(
    member_ids: &[&str],
    nodes: &NodeMap,
    positions: &IndexMap<String, PositionedNode>,
) -> f32 {
    let mut parent_ids: HashSet<&str> = HashSet::new();
    for id in member_ids {
        if let Some(node) = nodes.get(*id) {
            for parent in node.parent_ids() {
                parent_ids.insert(parent);
            }
        }
    }
    let xs: Vec<f32> = parent_ids
        .iter()
        .filter_map(|parent| positions.get(*parent).map(|p| p.x))
        .collect();
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f32>() / xs.len() as f32
}

/// Sorted pipe-joined union of the members' parent ids. Parentless blocks get
/// a unique `single:` key so they never group with each other.
fn parents_key(member_ids: &[&str], anchor: &str, nodes: &NodeMap) -> String {
    let mut parents: Vec<&str> = Vec::new();
    for id in member_ids {
        if let Some(node) = nodes.get(*id) {
            parents.extend(node.parent_ids().iter().map(String::as_str));
        }
    }
    parents.sort_unstable();
    if parents.is_empty() {
        return format!("single:{anchor}");
    }
    parents.join("|")
}

/// Partitions one generation's members into couple and singleton blocks.
///
/// Members are visited in input order; the first pairing wins. A member pairs
/// with the first partner whose resolved generation matches this row and who
/// is still unplaced; otherwise it stands alone. Couples whose key is in the
/// anchored set degenerate to a singleton: only the anchor is placed, the
/// partner keeps its records but gets no position this pass.
pub(super) fn assemble_blocks(
    generation: i64,
    member_ids: &[String],
    nodes: &NodeMap,
    generations: &HashMap<String, i64>,
    positions: &IndexMap<String, PositionedNode>,
    anchored_couples: &std::collections::BTreeSet<String>,
) -> Vec<Block> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut blocks: Vec<Block> = Vec::new();

    for id in member_ids {
        if !seen.insert(id) {
            continue;
        }
        let partner = nodes.get(id).and_then(|node| {
            node.partners
                .iter()
                .find(|p| generations.get(*p).copied().unwrap_or(0) == generation)
        });
        match partner {
            Some(partner) if !seen.contains(partner.as_str()) => {
                seen.insert(partner);
                let (anchor, mate) = anchor_pair(id, partner, nodes);
                let rank = node_birth_rank(anchor, nodes).min(node_birth_rank(mate, nodes));
                let key = parents_key(&[anchor, mate], anchor, nodes);
                let weight = parent_average_x(&[anchor, mate], nodes, positions);
                let anchored = anchored_couples.contains(&couple_key(anchor, mate));
                let ids = if anchored {
                    vec![anchor.to_string()]
                } else {
                    vec![anchor.to_string(), mate.to_string()]
                };
                blocks.push(Block {
                    ids,
                    rank,
                    parents_key: key,
                    weight,
                });
            }
            _ => {
                blocks.push(Block {
                    ids: vec![id.clone()],
                    rank: node_birth_rank(id, nodes),
                    parents_key: parents_key(&[id], id, nodes),
                    weight: parent_average_x(&[id], nodes, positions),
                });
            }
        }
    }

    blocks
}

/// Picks the left-hand anchor of a couple: whichever member is recorded male,
/// falling back to the member encountered first. Pure placement convention.
fn anchor_pair<'a>(a: &'a str, b: &'a str, nodes: &NodeMap) -> (&'a str, &'a str) {
    let gender_of = |id: &str| nodes.get(id).and_then(|node| node.person.gender);
    if gender_of(a) == Some(Gender::M) {
        (a, b)
    } else if gender_of(b) == Some(Gender::M) {
        (b, a)
    } else {
        (a, b)
    }
}
