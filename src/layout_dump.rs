use crate::ir::{Node, Tier};
use crate::layout::{Layout, LegendLayout, RowOffsets, TitleLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub rows: RowOffsets,
    pub nodes: Vec<NodeDump>,
    pub legend: LegendLayout,
    pub title: Option<TitleLayout>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    /// Child indices from the root, e.g. `[1, 0]` is the first child of the
    /// second goal.
    pub path: Vec<usize>,
    pub label: String,
    pub tier: Tier,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub span: f32,
    pub leaf_count: usize,
    pub description: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let mut nodes = Vec::new();
        collect_nodes(&layout.tree.root, &mut Vec::new(), &mut nodes);
        LayoutDump {
            width: layout.width,
            height: layout.height,
            rows: layout.rows,
            nodes,
            legend: layout.legend.clone(),
            title: layout.title.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn collect_nodes(node: &Node, path: &mut Vec<usize>, out: &mut Vec<NodeDump>) {
    out.push(NodeDump {
        path: path.clone(),
        label: node.label.clone(),
        tier: node.tier,
        x: node.x,
        y: node.y,
        w: node.w,
        h: node.h,
        span: node.span,
        leaf_count: node.leaf_count(),
        description: node.description.clone(),
    });
    for (idx, child) in node.children.iter().enumerate() {
        path.push(idx);
        collect_nodes(child, path, out);
        path.pop();
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
