use super::*;

/// Legend entry before placement: tier, label text, measured label width.
pub(super) struct LegendEntry {
    tier: Tier,
    label: String,
    label_width: f32,
}

pub(super) fn measure_legend(
    theme: &Theme,
    measure: &dyn TextMeasure,
) -> Vec<LegendEntry> {
    let font = theme.legend_font();
    Tier::ALL
        .iter()
        .map(|tier| {
            let label = theme.tier(*tier).legend_label.clone();
            let label_width = measure.text_width(&label, &font);
            LegendEntry {
                tier: *tier,
                label,
                label_width,
            }
        })
        .collect()
}

pub(super) fn legend_width(entries: &[LegendEntry], config: &LayoutConfig) -> f32 {
    if entries.is_empty() {
        return 0.0;
    }
    entries
        .iter()
        .map(|entry| config.legend_swatch_size + config.legend_label_gap + entry.label_width)
        .sum::<f32>()
        + config.legend_item_gap * (entries.len() as f32 - 1.0)
}

/// `max(min_canvas_width, root_span + 2·margin_x)`, widened further only when
/// the legend is wider than the tree, so the legend is never clipped.
pub(super) fn canvas_width(root_span: f32, legend_width: f32, config: &LayoutConfig) -> f32 {
    (root_span + config.margin_x * 2.0)
        .max(legend_width + config.margin_x * 2.0)
        .max(config.min_canvas_width)
        .ceil()
}

/// Top edge of the legend swatches.
fn legend_top(rows: &RowOffsets, config: &LayoutConfig) -> f32 {
    rows.bottom()
        + config.node_height / 2.0
        + config.desc_offset_y
        + config.desc_allowance
        + config.legend_margin_top
}

/// Every allowance is reserved whether or not it gets used.
pub(super) fn canvas_height(rows: &RowOffsets, config: &LayoutConfig) -> f32 {
    let legend_space = config.legend_swatch_size;
    let title_space = config.title_margin_top + config.title_allowance;
    (legend_top(rows, config) + legend_space + title_space + config.bottom_margin).ceil()
}

pub(super) fn place_legend(
    entries: Vec<LegendEntry>,
    canvas_width: f32,
    rows: &RowOffsets,
    config: &LayoutConfig,
) -> LegendLayout {
    let width = legend_width(&entries, config);
    let mut x = (canvas_width - width) / 2.0;
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let label_x = x + config.legend_swatch_size + config.legend_label_gap;
        x = label_x + entry.label_width + config.legend_item_gap;
        items.push(LegendItem {
            tier: entry.tier,
            label: entry.label,
            swatch_x: label_x - config.legend_swatch_size - config.legend_label_gap,
            label_x,
            label_width: entry.label_width,
        });
    }

    LegendLayout {
        y: legend_top(rows, config),
        width,
        items,
    }
}

pub(super) fn place_title(
    title: Option<&str>,
    canvas_width: f32,
    legend: &LegendLayout,
    config: &LayoutConfig,
) -> Option<TitleLayout> {
    let text = title.filter(|text| !text.is_empty())?;
    Some(TitleLayout {
        text: text.to_string(),
        x: canvas_width / 2.0,
        y: legend.y + config.legend_swatch_size + config.title_margin_top,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_tree_gets_minimum_width() {
        let config = LayoutConfig::default();
        assert_eq!(canvas_width(180.0, 300.0, &config), 600.0);
        assert_eq!(canvas_width(1000.0, 300.0, &config), 1160.0);
        assert_eq!(canvas_width(1000.4, 300.0, &config), 1161.0);
    }

    #[test]
    fn wide_legend_widens_small_trees() {
        let config = LayoutConfig::default();
        assert_eq!(canvas_width(180.0, 700.0, &config), 860.0);
    }

    #[test]
    fn legend_narrower_than_tree_leaves_width_alone() {
        let config = LayoutConfig::default();
        for span in [180.0, 440.0, 700.0, 1500.0] {
            let plain = (span + config.margin_x * 2.0)
                .max(config.min_canvas_width)
                .ceil();
            assert_eq!(canvas_width(span, 100.0, &config), plain);
            assert_eq!(canvas_width(span, span, &config), plain);
        }
    }

    #[test]
    fn height_reserves_every_allowance() {
        let config = LayoutConfig::default();
        let rows = position::row_offsets(true, &config);
        // 660 + 30 + 12 + 20 + 50 + 28 + 20 + 25 + 50
        assert_eq!(canvas_height(&rows, &config), 895.0);
        let rows = position::row_offsets(false, &config);
        assert_eq!(canvas_height(&rows, &config), 705.0);
    }

    #[test]
    fn legend_width_sums_swatches_labels_and_gaps() {
        let config = LayoutConfig::default();
        let entries: Vec<LegendEntry> = [10.0, 20.0]
            .iter()
            .map(|w| LegendEntry {
                tier: Tier::Goal,
                label: String::new(),
                label_width: *w,
            })
            .collect();
        assert_eq!(legend_width(&entries, &config), (28.0 + 10.0) * 2.0 + 30.0 + 50.0);
    }

    #[test]
    fn legend_is_centered_on_canvas() {
        let config = LayoutConfig::default();
        let rows = position::row_offsets(true, &config);
        let entries = measure_legend(&Theme::galaxy(), &ApproxMetrics);
        let legend = place_legend(entries, 1000.0, &rows, &config);
        assert_eq!(legend.items.len(), 4);
        let first = &legend.items[0];
        let last = &legend.items[3];
        let right = last.label_x + last.label_width;
        assert!((first.swatch_x - (1000.0 - right)).abs() < 1e-3);
        assert!((right - first.swatch_x - legend.width).abs() < 1e-3);
        assert_eq!(legend.y, 660.0 + 30.0 + 12.0 + 20.0 + 50.0);
        assert_eq!(first.tier, Tier::Start);
    }

    #[test]
    fn title_sits_below_legend() {
        let config = LayoutConfig::default();
        let legend = LegendLayout {
            y: 100.0,
            width: 0.0,
            items: Vec::new(),
        };
        let title = place_title(Some("Tools"), 800.0, &legend, &config).unwrap();
        assert_eq!(title.x, 400.0);
        assert_eq!(title.y, 148.0);
        assert!(place_title(Some(""), 800.0, &legend, &config).is_none());
        assert!(place_title(None, 800.0, &legend, &config).is_none());
    }
}
