//! Horizontal tree layout.
//!
//! The pipeline runs in a fixed order, each pass writing one set of geometry
//! fields: widths, then spans (post-order), then x positions (pre-order from
//! the canvas center), then rows, then canvas size with legend and title.

use crate::config::LayoutConfig;
use crate::ir::{DecisionTree, Node, Tier};
use crate::theme::Theme;

mod canvas;
mod position;
mod span;
mod text;
mod types;
mod width;

pub use text::{ApproxMetrics, FontMetrics, TextMeasure};
pub use types::{Layout, LegendItem, LegendLayout, RowOffsets, TitleLayout};

pub fn compute_layout(
    tree: &DecisionTree,
    theme: &Theme,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Layout {
    let mut tree = tree.clone();

    width::resolve_widths(&mut tree.root, theme, config, measure);
    span::compute_spans(&mut tree.root, config);

    let legend_entries = canvas::measure_legend(theme, measure);
    let legend_width = canvas::legend_width(&legend_entries, config);
    let width = canvas::canvas_width(tree.root.span, legend_width, config);
    position::position_subtree(&mut tree.root, width / 2.0, config);
    let rows = position::assign_rows(&mut tree, config);
    let height = canvas::canvas_height(&rows, config);

    let legend = canvas::place_legend(legend_entries, width, &rows, config);
    let title = canvas::place_title(tree.title.as_deref(), width, &legend, config);

    tracing::debug!(
        nodes = tree.node_count(),
        leaves = tree.root.leaf_count(),
        root_span = tree.root.span,
        width,
        height,
        "computed layout"
    );

    Layout {
        tree,
        rows,
        legend,
        title,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_tree;

    fn layout_of(input: &str) -> Layout {
        let tree = parse_tree(input).unwrap();
        compute_layout(&tree, &Theme::galaxy(), &LayoutConfig::default(), &ApproxMetrics)
    }

    #[test]
    fn root_is_centered_on_canvas() {
        let layout = layout_of(
            r#"{"start_question": "Q", "goals": [
                {"label": "A", "tools": [{"name": "t1"}, {"name": "t2"}]},
                {"label": "B", "tools": [{"name": "t3"}]}
            ]}"#,
        );
        assert_eq!(layout.tree.root.x, layout.width / 2.0);
        assert!(layout.width >= layout.tree.root.span + 160.0);
    }

    #[test]
    fn small_tree_is_widened_to_fit_the_legend() {
        let layout = layout_of(r#"{"start_question": "Q", "goals": []}"#);
        assert!(layout.width >= layout.legend.width + 160.0);
        let first = &layout.legend.items[0];
        assert!(first.swatch_x >= 80.0 - 1e-3);
    }

    #[test]
    fn every_span_covers_its_box() {
        let layout = layout_of(
            r#"{"start_question": "Which aligner should I use for my sequencing reads?", "goals": [
                {"label": "Map", "criteria": [
                    {"label": "Short", "tools": [{"name": "BWA"}, {"name": "Bowtie2"}]},
                    {"label": "Long", "tools": [{"name": "minimap2"}]}
                ]},
                {"label": "Assemble", "tools": []}
            ]}"#,
        );
        for node in layout.tree.nodes() {
            assert!(node.span >= node.w, "{} span {} < w {}", node.label, node.span, node.w);
            assert_eq!(node.h, 60.0);
        }
    }

    #[test]
    fn childless_goal_still_gets_a_box() {
        let layout = layout_of(r#"{"start_question": "Q", "goals": [{"label": "G", "tools": []}]}"#);
        let goal = &layout.tree.root.children[0];
        assert_eq!(goal.w, 180.0);
        assert_eq!(goal.x, layout.tree.root.x);
        assert_eq!(goal.y, layout.rows.goal);
    }

    #[test]
    fn input_tree_is_left_untouched() {
        let tree = parse_tree(r#"{"start_question": "Q", "goals": []}"#).unwrap();
        let _ = compute_layout(&tree, &Theme::galaxy(), &LayoutConfig::default(), &ApproxMetrics);
        assert_eq!(tree.root.w, 0.0);
        assert_eq!(tree.root.span, 0.0);
    }
}
