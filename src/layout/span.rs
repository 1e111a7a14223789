use super::*;

/// Width taken by `children` laid side by side, `gap` apart.
pub(super) fn children_extent(children: &[Node], gap: f32) -> f32 {
    if children.is_empty() {
        return 0.0;
    }
    let total: f32 = children.iter().map(|child| child.span).sum();
    total + gap * (children.len() as f32 - 1.0)
}

/// Post-order: children first, then `span = max(w, extent of children)`.
pub(super) fn compute_spans(node: &mut Node, config: &LayoutConfig) {
    if node.is_leaf() {
        node.span = node.w;
        return;
    }
    for child in &mut node.children {
        compute_spans(child, config);
    }
    let gap = config.sibling_gap(node.tier);
    node.span = node.w.max(children_extent(&node.children, gap));
}
