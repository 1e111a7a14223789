use serde::Serialize;

use crate::ir::{DecisionTree, Tier};

/// Center y of each tier's row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowOffsets {
    pub start: f32,
    pub goal: f32,
    pub criterion: f32,
    pub tool: f32,
}

impl RowOffsets {
    pub fn for_tier(&self, tier: Tier) -> f32 {
        match tier {
            Tier::Start => self.start,
            Tier::Goal => self.goal,
            Tier::Criterion => self.criterion,
            Tier::Tool => self.tool,
        }
    }

    /// Row of the lowest tier.
    pub fn bottom(&self) -> f32 {
        self.start.max(self.goal).max(self.criterion).max(self.tool)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub tier: Tier,
    pub label: String,
    /// Left edge of the swatch.
    pub swatch_x: f32,
    /// Left edge of the label text.
    pub label_x: f32,
    pub label_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    /// Top edge of the swatch row.
    pub y: f32,
    pub width: f32,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleLayout {
    pub text: String,
    pub x: f32,
    /// Top edge of the text.
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub tree: DecisionTree,
    pub rows: RowOffsets,
    pub legend: LegendLayout,
    pub title: Option<TitleLayout>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    /// Pixel dimensions of the canvas.
    pub fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}
