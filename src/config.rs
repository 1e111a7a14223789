use crate::ir::Tier;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_height: f32,
    pub node_corner_radius: f32,
    pub node_h_pad: f32,
    pub node_min_width: f32,
    pub node_max_width: f32,
    pub row_spacing: f32,
    pub margin_x: f32,
    pub margin_top: f32,
    /// Gap between tool siblings under a criterion.
    pub tool_h_gap: f32,
    /// Gap between siblings under a goal or the start node.
    pub cluster_gap: f32,
    pub min_canvas_width: f32,
    pub desc_offset_y: f32,
    pub desc_allowance: f32,
    pub arrow_width: f32,
    pub arrowhead_length: f32,
    pub arrowhead_half_width: f32,
    pub legend_swatch_size: f32,
    pub legend_swatch_radius: f32,
    pub legend_label_gap: f32,
    pub legend_item_gap: f32,
    pub legend_margin_top: f32,
    pub title_margin_top: f32,
    pub title_allowance: f32,
    pub bottom_margin: f32,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_height: 60.0,
            node_corner_radius: 11.0,
            node_h_pad: 30.0,
            node_min_width: 180.0,
            node_max_width: 400.0,
            row_spacing: 190.0,
            margin_x: 80.0,
            margin_top: 60.0,
            tool_h_gap: 40.0,
            cluster_gap: 80.0,
            min_canvas_width: 600.0,
            desc_offset_y: 12.0,
            desc_allowance: 20.0,
            arrow_width: 2.0,
            arrowhead_length: 12.0,
            arrowhead_half_width: 5.0,
            legend_swatch_size: 28.0,
            legend_swatch_radius: 5.0,
            legend_label_gap: 10.0,
            legend_item_gap: 50.0,
            legend_margin_top: 50.0,
            title_margin_top: 20.0,
            title_allowance: 25.0,
            bottom_margin: 50.0,
            fast_text_metrics: false,
        }
    }
}

impl LayoutConfig {
    /// Horizontal gap between the children of a node on `parent` tier.
    pub fn sibling_gap(&self, parent: Tier) -> f32 {
        match parent {
            Tier::Criterion => self.tool_h_gap,
            Tier::Start | Tier::Goal | Tier::Tool => self.cluster_gap,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Written into the PNG `pHYs` chunk. Pixel size does not depend on it.
    pub dpi: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { dpi: 150 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub bold: Option<PathBuf>,
    pub regular: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    /// Directories searched, in order, for the Atkinson Hyperlegible and
    /// DejaVu Sans files.
    pub search_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(home) = std::env::var_os("HOME") {
            search_dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
        search_dirs.push(PathBuf::from("/usr/share/fonts/truetype/dejavu"));
        Self {
            bold: None,
            regular: None,
            italic: None,
            search_dirs,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub fonts: FontConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_height: Option<f32>,
    node_corner_radius: Option<f32>,
    node_h_pad: Option<f32>,
    node_min_width: Option<f32>,
    node_max_width: Option<f32>,
    row_spacing: Option<f32>,
    margin_x: Option<f32>,
    margin_top: Option<f32>,
    tool_h_gap: Option<f32>,
    cluster_gap: Option<f32>,
    min_canvas_width: Option<f32>,
    desc_offset_y: Option<f32>,
    bottom_margin: Option<f32>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TierStyleFile {
    fill: Option<String>,
    text_color: Option<String>,
    font_size: Option<f32>,
    legend_label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TiersFile {
    start: Option<TierStyleFile>,
    goal: Option<TierStyleFile>,
    criterion: Option<TierStyleFile>,
    tool: Option<TierStyleFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FontsFile {
    bold: Option<PathBuf>,
    regular: Option<PathBuf>,
    italic: Option<PathBuf>,
    search_dirs: Option<Vec<PathBuf>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    tiers: Option<TiersFile>,
    fonts: Option<FontsFile>,
    dpi: Option<u32>,
    background: Option<String>,
    line_color: Option<String>,
    ink_color: Option<String>,
    description_font_size: Option<f32>,
    legend_font_size: Option<f32>,
    title_font_size: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(layout) = parsed.layout {
        apply_layout_overrides(&mut config.layout, layout);
    }

    if let Some(tiers) = parsed.tiers {
        let entries = [
            (Tier::Start, tiers.start),
            (Tier::Goal, tiers.goal),
            (Tier::Criterion, tiers.criterion),
            (Tier::Tool, tiers.tool),
        ];
        for (tier, overrides) in entries {
            let Some(overrides) = overrides else {
                continue;
            };
            let style = config.theme.tiers.get_mut(tier);
            if let Some(v) = overrides.fill {
                style.fill = v;
            }
            if let Some(v) = overrides.text_color {
                style.text_color = v;
            }
            if let Some(v) = overrides.font_size {
                style.font_size = v;
            }
            if let Some(v) = overrides.legend_label {
                style.legend_label = v;
            }
        }
    }

    if let Some(fonts) = parsed.fonts {
        if let Some(v) = fonts.bold {
            config.fonts.bold = Some(v);
        }
        if let Some(v) = fonts.regular {
            config.fonts.regular = Some(v);
        }
        if let Some(v) = fonts.italic {
            config.fonts.italic = Some(v);
        }
        if let Some(v) = fonts.search_dirs {
            config.fonts.search_dirs = v;
        }
    }

    if let Some(v) = parsed.dpi {
        config.render.dpi = v;
    }
    if let Some(v) = parsed.background {
        config.theme.background = v;
    }
    if let Some(v) = parsed.line_color {
        config.theme.line_color = v;
    }
    if let Some(v) = parsed.ink_color {
        config.theme.ink_color = v;
    }
    if let Some(v) = parsed.description_font_size {
        config.theme.description_font_size = v;
    }
    if let Some(v) = parsed.legend_font_size {
        config.theme.legend_font_size = v;
    }
    if let Some(v) = parsed.title_font_size {
        config.theme.title_font_size = v;
    }

    Ok(config)
}

fn apply_layout_overrides(layout: &mut LayoutConfig, file: LayoutConfigFile) {
    if let Some(v) = file.node_height {
        layout.node_height = v;
    }
    if let Some(v) = file.node_corner_radius {
        layout.node_corner_radius = v;
    }
    if let Some(v) = file.node_h_pad {
        layout.node_h_pad = v;
    }
    if let Some(v) = file.node_min_width {
        layout.node_min_width = v;
    }
    if let Some(v) = file.node_max_width {
        layout.node_max_width = v;
    }
    if let Some(v) = file.row_spacing {
        layout.row_spacing = v;
    }
    if let Some(v) = file.margin_x {
        layout.margin_x = v;
    }
    if let Some(v) = file.margin_top {
        layout.margin_top = v;
    }
    if let Some(v) = file.tool_h_gap {
        layout.tool_h_gap = v;
    }
    if let Some(v) = file.cluster_gap {
        layout.cluster_gap = v;
    }
    if let Some(v) = file.min_canvas_width {
        layout.min_canvas_width = v;
    }
    if let Some(v) = file.desc_offset_y {
        layout.desc_offset_y = v;
    }
    if let Some(v) = file.bottom_margin {
        layout.bottom_margin = v;
    }
    if let Some(v) = file.fast_text_metrics {
        layout.fast_text_metrics = v;
    }
}
