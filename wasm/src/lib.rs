use decision_tree_renderer::config::{Config, parse_config};
use decision_tree_renderer::render_definition_svg;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecisionTreeRenderOptions {
    /// Same shape as the CLI `--config` file.
    config: Option<serde_json::Value>,
    /// Defaults to true: there are no font files to read in the browser.
    fast_text: Option<bool>,
}

fn build_config(options: DecisionTreeRenderOptions) -> Result<Config, String> {
    let mut config = match options.config {
        Some(raw) => parse_config(&raw.to_string()).map_err(|error| error.to_string())?,
        None => Config::default(),
    };
    config.layout.fast_text_metrics = options.fast_text.unwrap_or(true);
    Ok(config)
}

#[wasm_bindgen]
pub fn render_decision_tree_svg(
    definition: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<DecisionTreeRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        DecisionTreeRenderOptions::default()
    };

    let config = build_config(options).map_err(|error| JsValue::from_str(&error))?;
    render_definition_svg(definition, &config)
        .map(|rendered| rendered.svg)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
