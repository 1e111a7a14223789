use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Start,
    Goal,
    Criterion,
    Tool,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Start, Tier::Goal, Tier::Criterion, Tier::Tool];
}

/// One box in the diagram. Geometry fields start at zero and are written by
/// the layout passes, each exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub tier: Tier,
    pub description: Option<String>,
    /// Center x.
    pub x: f32,
    /// Center y.
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Horizontal footprint of the whole subtree rooted here.
    pub span: f32,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>, tier: Tier) -> Self {
        Self {
            label: label.into(),
            tier,
            description: None,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            span: 0.0,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.tier == Tier::Tool || self.children.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children.iter().map(Node::leaf_count).sum()
    }

    pub fn top_center(&self) -> (f32, f32) {
        (self.x, self.y - self.h / 2.0)
    }

    pub fn bottom_center(&self) -> (f32, f32) {
        (self.x, self.y + self.h / 2.0)
    }

    /// `(x0, y0, x1, y1)` of the box.
    pub fn bbox(&self) -> (f32, f32, f32, f32) {
        let hw = self.w / 2.0;
        let hh = self.h / 2.0;
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }

    /// Interval reserved for this subtree on the x axis.
    pub fn span_interval(&self) -> (f32, f32) {
        (self.x - self.span / 2.0, self.x + self.span / 2.0)
    }

    /// Depth-first, parents before children, children in declaration order.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    pub title: Option<String>,
    pub root: Node,
}

impl DecisionTree {
    pub fn new(root: Node) -> Self {
        Self { title: None, root }
    }

    pub fn nodes(&self) -> Vec<&Node> {
        self.root.descendants()
    }

    pub fn nodes_breadth_first(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([&self.root]);
        while let Some(node) = queue.pop_front() {
            out.push(node);
            queue.extend(node.children.iter());
        }
        out
    }

    /// Whether any node anywhere sits on the criterion tier. Decides if tools
    /// get their own row.
    pub fn uses_criteria(&self) -> bool {
        self.nodes().iter().any(|node| node.tier == Tier::Criterion)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }
}
