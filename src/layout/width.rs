use super::*;

/// Box width for a label of `text_width` pixels.
pub(super) fn clamp_node_width(text_width: f32, max_width: f32, config: &LayoutConfig) -> f32 {
    let padded = text_width + config.node_h_pad * 2.0;
    padded.min(max_width).max(config.node_min_width)
}

/// Sets `w` and `h` on every node. The start node has no upper bound.
pub(super) fn resolve_widths(
    root: &mut Node,
    theme: &Theme,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) {
    root.visit_mut(&mut |node: &mut Node| {
        let font = theme.label_font(node.tier);
        let max_width = if node.tier == Tier::Start {
            f32::INFINITY
        } else {
            config.node_max_width
        };
        let text_width = measure.text_width(&node.label, &font);
        node.w = clamp_node_width(text_width, max_width, config);
        node.h = config.node_height;
    });
}
