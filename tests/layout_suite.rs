use std::path::Path;

use decision_tree_renderer::layout_dump::LayoutDump;
use decision_tree_renderer::{
    ApproxMetrics, Config, DecisionTree, DiagramError, FontSet, Layout, LayoutConfig,
    MalformedDefinitionError, Node, TextMeasure, Theme, Tier, compute_layout, parse_tree,
    render_svg,
};
use decision_tree_renderer::theme::FontSpec;

const FIXTURES: [&str; 5] = [
    "mapping.json",
    "direct_tools.json",
    "wide_shallow.json",
    "narrow_deep.json",
    "irregular.json5",
];

fn fixture_source(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("fixture {name}: {err}"))
}

fn layout_fixture(name: &str) -> Layout {
    let tree = parse_tree(&fixture_source(name)).expect("fixture should parse");
    compute_layout(&tree, &Theme::galaxy(), &LayoutConfig::default(), &ApproxMetrics)
}

/// Sibling span intervals must abut with exactly one gap between them and be
/// centered on the parent.
fn assert_packed(node: &Node, config: &LayoutConfig) {
    assert!(node.span >= node.w, "{}: span {} < w {}", node.label, node.span, node.w);
    if node.children.is_empty() {
        return;
    }
    let gap = config.sibling_gap(node.tier);
    for pair in node.children.windows(2) {
        let (_, left_end) = pair[0].span_interval();
        let (right_start, _) = pair[1].span_interval();
        assert!(
            (right_start - left_end - gap).abs() < 1e-2,
            "{} / {}: spacing {} != gap {}",
            pair[0].label,
            pair[1].label,
            right_start - left_end,
            gap
        );
    }
    let first = node.children[0].span_interval().0;
    let last = node.children[node.children.len() - 1].span_interval().1;
    assert!(
        ((first + last) / 2.0 - node.x).abs() < 1e-2,
        "{}: children not centered",
        node.label
    );
    assert!(last - first <= node.span + 1e-2);
    for child in &node.children {
        assert_packed(child, config);
    }
}

#[test]
fn render_all_fixtures() {
    let config = Config::default();
    for name in FIXTURES {
        let layout = layout_fixture(name);
        let svg = render_svg(&layout, &config.theme, &config.layout, &FontSet::system());
        assert!(svg.contains("<svg"), "{name}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{name}: missing </svg tag");
        let edges = layout.tree.node_count() - 1;
        assert_eq!(svg.matches("<polygon").count(), edges, "{name}: one arrow per edge");
    }
}

#[test]
fn fixtures_keep_siblings_apart() {
    let config = LayoutConfig::default();
    for name in FIXTURES {
        let layout = layout_fixture(name);
        assert_packed(&layout.tree.root, &config);
    }
}

#[test]
fn every_box_fits_on_the_canvas() {
    for name in FIXTURES {
        let layout = layout_fixture(name);
        for node in layout.tree.nodes() {
            let (x0, y0, x1, y1) = node.bbox();
            assert!(x0 >= 0.0 && x1 <= layout.width, "{name}: {} overflows x", node.label);
            assert!(y0 >= 0.0 && y1 <= layout.legend.y, "{name}: {} overlaps legend", node.label);
        }
        let legend_right = layout
            .legend
            .items
            .last()
            .map(|item| item.label_x + item.label_width)
            .unwrap_or_default();
        assert!(legend_right <= layout.width, "{name}: legend overflows");
    }
}

#[test]
fn rows_depend_on_criteria_usage() {
    let direct = layout_fixture("direct_tools.json");
    let tool = &direct.tree.root.children[0].children[0];
    assert_eq!(tool.y, direct.rows.criterion);

    let mapping = layout_fixture("mapping.json");
    let tool = &mapping.tree.root.children[0].children[0].children[0];
    assert_eq!(tool.y, mapping.rows.tool);
    assert!(mapping.height > direct.height);
}

#[test]
fn irregular_tree_uses_criterion_row_for_direct_tools() {
    let layout = layout_fixture("irregular.json5");
    // criteria exist somewhere, so tools directly under a goal still sit on
    // the tool row
    let annotation_tool = &layout.tree.root.children[1].children[0];
    assert_eq!(annotation_tool.tier, Tier::Tool);
    assert_eq!(annotation_tool.y, layout.rows.tool);
    let empty_criterion = &layout.tree.root.children[0].children[2];
    assert!(empty_criterion.children.is_empty());
    assert_eq!(empty_criterion.span, empty_criterion.w);
}

#[test]
fn long_start_label_widens_the_canvas() {
    let layout = layout_fixture("narrow_deep.json");
    let root = &layout.tree.root;
    assert!(root.w > 400.0, "start node is not capped");
    assert_eq!(root.span, root.w);
    assert_eq!(layout.width, (root.w + 160.0).ceil());
    for node in layout.tree.nodes() {
        assert_eq!(node.x, root.x);
    }
}

struct Fixed(f32);

impl TextMeasure for Fixed {
    fn text_width(&self, _text: &str, _font: &FontSpec) -> f32 {
        self.0
    }
}

#[test]
fn width_resolver_clamps_measured_text() {
    let tree = parse_tree(r#"{"start_question": "Q", "goals": [{"label": "G", "tools": []}]}"#).unwrap();
    let narrow = compute_layout(&tree, &Theme::galaxy(), &LayoutConfig::default(), &Fixed(50.0));
    assert_eq!(narrow.tree.root.children[0].w, 180.0);
    let wide = compute_layout(&tree, &Theme::galaxy(), &LayoutConfig::default(), &Fixed(400.0));
    assert_eq!(wide.tree.root.children[0].w, 400.0);
    assert_eq!(wide.tree.root.w, 460.0);
}

#[test]
fn two_children_of_different_spans() {
    let config = LayoutConfig {
        cluster_gap: 40.0,
        min_canvas_width: 1000.0,
        margin_x: 0.0,
        node_min_width: 100.0,
        ..LayoutConfig::default()
    };
    let mut root = Node::new("Q", Tier::Start);
    root.children.push(Node::new("left", Tier::Goal));
    root.children.push(Node::new("right", Tier::Goal));
    let tree = DecisionTree::new(root);

    struct ByLabel;
    impl TextMeasure for ByLabel {
        fn text_width(&self, text: &str, _font: &FontSpec) -> f32 {
            match text {
                "left" => 40.0,
                "right" => 140.0,
                _ => 0.0,
            }
        }
    }

    let layout = compute_layout(&tree, &Theme::galaxy(), &config, &ByLabel);
    let root = &layout.tree.root;
    assert_eq!(root.children[0].span, 100.0);
    assert_eq!(root.children[1].span, 200.0);
    assert_eq!(root.span, 340.0);
    assert_eq!(root.x, 500.0);
    assert_eq!(root.children[0].x, 380.0);
    assert_eq!(root.children[1].x, 570.0);
}

#[test]
fn single_child_is_centered_under_root() {
    let tree = parse_tree(
        r#"{"start_question": "Only one way", "goals": [{"label": "Go", "tools": [{"name": "T"}]}]}"#,
    )
    .unwrap();
    let layout = compute_layout(&tree, &Theme::galaxy(), &LayoutConfig::default(), &ApproxMetrics);
    let root = &layout.tree.root;
    assert_eq!(root.children[0].x, root.x);
    assert_eq!(root.children[0].children[0].x, root.x);
}

#[test]
fn pipeline_is_deterministic() {
    let config = Config::default();
    for name in FIXTURES {
        let source = fixture_source(name);
        let first = {
            let tree = parse_tree(&source).unwrap();
            let layout = compute_layout(&tree, &config.theme, &config.layout, &ApproxMetrics);
            (
                LayoutDump::from_layout(&layout).to_json().unwrap(),
                render_svg(&layout, &config.theme, &config.layout, &FontSet::system()),
            )
        };
        let second = {
            let tree = parse_tree(&source).unwrap();
            let layout = compute_layout(&tree, &config.theme, &config.layout, &ApproxMetrics);
            (
                LayoutDump::from_layout(&layout).to_json().unwrap(),
                render_svg(&layout, &config.theme, &config.layout, &FontSet::system()),
            )
        };
        assert_eq!(first, second, "{name}: geometry differs between runs");
    }
}

#[test]
fn goal_without_children_is_malformed() {
    let err = parse_tree(r#"{"start_question": "Q", "goals": [{"label": "G"}]}"#).unwrap_err();
    assert!(matches!(
        err,
        DiagramError::Malformed(MalformedDefinitionError::GoalWithoutChildren { .. })
    ));
}
