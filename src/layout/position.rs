use super::*;

/// Pre-order: centers `node` at `center_x` and packs its children's span
/// intervals side by side, the packed run centered under the node.
pub(super) fn position_subtree(node: &mut Node, center_x: f32, config: &LayoutConfig) {
    node.x = center_x;
    if node.children.is_empty() {
        return;
    }
    let gap = config.sibling_gap(node.tier);
    let used = span::children_extent(&node.children, gap);
    let mut left = center_x - used / 2.0;
    for child in &mut node.children {
        let child_center = left + child.span / 2.0;
        position_subtree(child, child_center, config);
        left += child.span + gap;
    }
}

/// Tools take the criterion row when no criterion exists anywhere.
pub(super) fn row_offsets(uses_criteria: bool, config: &LayoutConfig) -> RowOffsets {
    let top = config.margin_top + config.node_height / 2.0;
    let row = config.row_spacing;
    RowOffsets {
        start: top,
        goal: top + row,
        criterion: top + row * 2.0,
        tool: if uses_criteria {
            top + row * 3.0
        } else {
            top + row * 2.0
        },
    }
}

pub(super) fn assign_rows(tree: &mut DecisionTree, config: &LayoutConfig) -> RowOffsets {
    let rows = row_offsets(tree.uses_criteria(), config);
    tree.root.visit_mut(&mut |node: &mut Node| {
        node.y = rows.for_tier(node.tier);
    });
    rows
}
