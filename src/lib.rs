#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod fonts;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::{DiagramError, FontUnavailableError, MalformedDefinitionError};
pub use fonts::FontSet;
pub use ir::{DecisionTree, Node, Tier};
pub use layout::{ApproxMetrics, FontMetrics, Layout, TextMeasure, compute_layout};
pub use parser::{Definition, build_tree, parse_definition, parse_tree};
pub use render::render_svg;
pub use theme::Theme;

/// A rendered SVG document and the layout it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    pub svg: String,
    pub layout: Layout,
}

impl RenderedDiagram {
    pub fn size(&self) -> (u32, u32) {
        self.layout.size()
    }
}

/// Lays out `tree` with the measurer `config` asks for and renders it to SVG.
pub fn render_tree_svg(tree: &DecisionTree, config: &Config, fonts: &FontSet) -> RenderedDiagram {
    let layout = if config.layout.fast_text_metrics {
        compute_layout(tree, &config.theme, &config.layout, &ApproxMetrics)
    } else {
        let metrics = FontMetrics::new(fonts.clone());
        compute_layout(tree, &config.theme, &config.layout, &metrics)
    };
    let svg = render_svg(&layout, &config.theme, &config.layout, fonts);
    RenderedDiagram { svg, layout }
}

/// Parses a JSON/JSON5 definition and renders it to SVG.
pub fn render_definition_svg(source: &str, config: &Config) -> Result<RenderedDiagram, DiagramError> {
    let tree = parse_tree(source)?;
    let fonts = FontSet::resolve(&config.fonts);
    Ok(render_tree_svg(&tree, config, &fonts))
}
