use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::layout::Layout;

/// JSON-friendly snapshot of one layout pass, for tooling and golden tests.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub parent_edges: Vec<ParentEdgeDump>,
    pub marriage_edges: Vec<MarriageEdgeDump>,
    pub guides: Vec<GuideDump>,
    pub hidden: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub depth: i64,
    pub name: String,
    pub gender: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParentEdgeDump {
    pub key: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Serialize)]
pub struct MarriageEdgeDump {
    pub id: String,
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct GuideDump {
    pub generation: i64,
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes()
            .map(|node| {
                let person = layout.node_by_id.get(&node.id).map(|n| &n.person);
                NodeDump {
                    id: node.id.clone(),
                    x: node.x,
                    y: node.y,
                    depth: node.depth,
                    name: person.map(|p| p.display_name()).unwrap_or_default(),
                    gender: person
                        .and_then(|p| p.gender)
                        .map(|gender| format!("{gender:?}")),
                    status: person
                        .and_then(|p| p.status)
                        .map(|status| format!("{status:?}")),
                }
            })
            .collect();

        let parent_edges = layout
            .parent_edges
            .iter()
            .map(|edge| ParentEdgeDump {
                key: edge.key.clone(),
                x1: edge.x1,
                y1: edge.y1,
                x2: edge.x2,
                y2: edge.y2,
            })
            .collect();

        let marriage_edges = layout
            .marriage_edges
            .iter()
            .map(|edge| MarriageEdgeDump {
                id: edge.id.clone(),
                x1: edge.x1,
                x2: edge.x2,
                y: edge.y,
            })
            .collect();

        let guides = layout
            .guides
            .iter()
            .map(|guide| GuideDump {
                generation: guide.generation,
                y: guide.y,
                x1: guide.x1,
                x2: guide.x2,
            })
            .collect();

        let mut hidden: Vec<String> = layout.hidden.iter().cloned().collect();
        hidden.sort_unstable();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            parent_edges,
            marriage_edges,
            guides,
            hidden,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
