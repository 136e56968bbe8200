use indexmap::IndexMap;
use std::collections::HashSet;

use crate::ir::Person;

/// A person plus computed adjacency. Rebuilt from scratch on every layout
/// pass; never persisted.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub person: Person,
    /// Child ids in input record order.
    pub children: Vec<String>,
    /// Spouse ids, one entry per marriage record. Duplicate records stay
    /// duplicated.
    pub partners: Vec<String>,
    /// Parent ids, present only once a parent is recorded.
    pub parents: Option<Vec<String>>,
}

impl TreeNode {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            children: Vec::new(),
            partners: Vec::new(),
            parents: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.person.id
    }

    pub fn parent_ids(&self) -> &[String] {
        self.parents.as_deref().unwrap_or(&[])
    }
}

/// Id -> node, in input record order. Iteration order feeds the per-generation
/// member lists, so it must match the people table.
pub type NodeMap = IndexMap<String, TreeNode>;

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub depth: i64,
}

/// One or two people placed as a unit. Lives only inside a single placement
/// pass.
#[derive(Debug, Clone)]
pub struct Block {
    /// `[anchor]` or `[anchor, partner]`.
    pub ids: Vec<String>,
    /// Minimum birth rank among members; unknown dates sort last.
    pub rank: i64,
    /// Sibling-group key: sorted parent ids, or a unique `single:` key.
    pub parents_key: String,
    /// Mean x of the members' already-placed parents.
    pub weight: f32,
}

/// A parent -> child connector. Either one edge per parent, or a single edge
/// dropped from the midpoint of a married pair.
#[derive(Debug, Clone)]
pub struct ParentEdge {
    pub key: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Horizontal connector between a positioned spouse pair.
#[derive(Debug, Clone)]
pub struct MarriageEdge {
    pub id: String,
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

/// One horizontal guide line per generation present in the drawing.
#[derive(Debug, Clone)]
pub struct GenerationGuide {
    pub generation: i64,
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone)]
pub struct Layout {
    /// The filtered graph, for display-field and relationship lookups.
    pub node_by_id: NodeMap,
    /// Positions keyed by id; a later placement for the same id overrides an
    /// earlier one.
    pub positions: IndexMap<String, PositionedNode>,
    pub parent_edges: Vec<ParentEdge>,
    pub marriage_edges: Vec<MarriageEdge>,
    pub guides: Vec<GenerationGuide>,
    /// Ids hidden by the current collapse state. These have no position and
    /// no edges this pass.
    pub hidden: HashSet<String>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn nodes(&self) -> impl Iterator<Item = &PositionedNode> {
        self.positions.values()
    }

    pub fn position(&self, id: &str) -> Option<&PositionedNode> {
        self.positions.get(id)
    }
}
